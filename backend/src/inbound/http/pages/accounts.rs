//! Signup and signin pages.

use actix_web::{HttpResponse, get, post, web};
use serde_json::{Value, json};

use crate::domain::forms::{FieldErrors, SignInForm, SignUpForm};
use crate::domain::ports::{AccountError, Template};
use crate::domain::{ApiResult, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

use super::{form_context, render_page, see_other};

fn signup_values(form: &SignUpForm) -> Value {
    // Passwords are never echoed back into the page.
    json!({
        "username": form.username.clone().unwrap_or_default(),
        "email": form.email.clone().unwrap_or_default(),
    })
}

fn signin_values(form: &SignInForm) -> Value {
    json!({ "username": form.username.clone().unwrap_or_default() })
}

fn map_account_error(err: AccountError) -> Error {
    match err {
        AccountError::UsernameTaken => Error::conflict(err.to_string()),
        AccountError::InvalidCredentials => Error::unauthorized(err.to_string()),
        AccountError::Store { message } => Error::internal(message),
    }
}

/// Render the empty signup form.
#[get("/signup/")]
pub async fn signup_page(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render_page(
        &state,
        Template::SignUp,
        json!({
            "title": "Sign up",
            "form": form_context(signup_values(&SignUpForm::default()), &FieldErrors::new()),
        }),
    )
}

/// Register an account, sign the visitor in, and redirect home.
///
/// A taken username comes back from the account service, not the form
/// validator, and is folded into the same field-error rendering so the
/// visitor sees one consistent page.
#[post("/signup/")]
pub async fn submit_signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SignUpForm>,
) -> ApiResult<HttpResponse> {
    let rendered_errors = match form.validate() {
        Ok(account) => match state.accounts.register(&account).await {
            Ok(username) => {
                session.persist_identity(&username)?;
                return Ok(see_other("/"));
            }
            Err(AccountError::UsernameTaken) => {
                let mut errors = FieldErrors::new();
                errors.add_field("username", AccountError::username_taken().to_string());
                errors
            }
            Err(other) => return Err(map_account_error(other)),
        },
        Err(errors) => errors,
    };

    render_page(
        &state,
        Template::SignUp,
        json!({
            "title": "Sign up",
            "form": form_context(signup_values(&form), &rendered_errors),
        }),
    )
}

/// Render the empty signin form.
#[get("/signin/")]
pub async fn signin_page(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render_page(
        &state,
        Template::SignIn,
        json!({
            "title": "Sign in",
            "form": form_context(signin_values(&SignInForm::default()), &FieldErrors::new()),
        }),
    )
}

/// Verify credentials, establish a session, and redirect home.
///
/// Well-formed input with bad credentials re-renders with a form-level
/// message rather than a silent retry.
#[post("/signin/")]
pub async fn submit_signin(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SignInForm>,
) -> ApiResult<HttpResponse> {
    let rendered_errors = match form.validate() {
        Ok(credentials) => match state.accounts.verify_credentials(&credentials).await {
            Ok(username) => {
                session.persist_identity(&username)?;
                return Ok(see_other("/"));
            }
            Err(AccountError::InvalidCredentials) => {
                let mut errors = FieldErrors::new();
                errors.add_form(AccountError::invalid_credentials().to_string());
                errors
            }
            Err(other) => return Err(map_account_error(other)),
        },
        Err(errors) => errors,
    };

    render_page(
        &state,
        Template::SignIn,
        json!({
            "title": "Sign in",
            "form": form_context(signin_values(&form), &rendered_errors),
        }),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    use crate::domain::Username;
    use crate::domain::ports::{FixtureAccountService, Template};
    use crate::inbound::http::state::HttpState;
    use crate::inbound::http::test_utils::{RecordingRenderer, test_session_middleware};

    use super::*;

    struct Harness {
        state: web::Data<HttpState>,
        renderer: Arc<RecordingRenderer>,
        accounts: Arc<FixtureAccountService>,
    }

    fn harness(accounts: FixtureAccountService) -> Harness {
        let renderer = Arc::new(RecordingRenderer::default());
        let accounts = Arc::new(accounts);
        let mut state = HttpState::fixtures();
        state.accounts = accounts.clone();
        state.renderer = renderer.clone();
        Harness {
            state: web::Data::new(state),
            renderer,
            accounts,
        }
    }

    fn test_app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(test_session_middleware())
            .service(signup_page)
            .service(submit_signup)
            .service(signin_page)
            .service(submit_signin)
    }

    fn signup_form(username: &str, password1: &str, password2: &str) -> Vec<(String, String)> {
        vec![
            ("username".to_owned(), username.to_owned()),
            ("email".to_owned(), format!("{username}@example.org")),
            ("password1".to_owned(), password1.to_owned()),
            ("password2".to_owned(), password2.to_owned()),
        ]
    }

    #[actix_web::test]
    async fn successful_signup_creates_account_session_and_redirect() {
        let fixture = harness(FixtureAccountService::default());
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup/")
                .set_form(signup_form("reader", "secret", "secret"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok()),
            Some("/")
        );
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
        assert!(fixture.accounts.has_account("reader"));
        assert_eq!(
            fixture.accounts.registered_email("reader"),
            Some("reader@example.org".to_owned())
        );
    }

    #[actix_web::test]
    async fn duplicate_username_re_renders_and_creates_nothing() {
        let existing = Username::new("reader").expect("valid username");
        let fixture = harness(FixtureAccountService::with_account(&existing, "original"));
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup/")
                .set_form(signup_form("reader", "other", "other"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let view = fixture.renderer.last_view().expect("signup view rendered");
        assert_eq!(view.template(), Template::SignUp);
        let messages = view
            .context()
            .pointer("/form/errors/fields/username")
            .and_then(Value::as_array)
            .expect("username errors");
        assert_eq!(
            messages.first().and_then(Value::as_str),
            Some("A user with that username already exists.")
        );
        // The original credentials survive.
        assert!(fixture.accounts.has_account("reader"));
    }

    #[actix_web::test]
    async fn password_mismatch_is_a_field_error() {
        let fixture = harness(FixtureAccountService::default());
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signup/")
                .set_form(signup_form("reader", "one", "two"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!fixture.accounts.has_account("reader"));

        let view = fixture.renderer.last_view().expect("signup view rendered");
        assert!(
            view.context()
                .pointer("/form/errors/fields/password2")
                .is_some()
        );
        // Submitted passwords never reach the context.
        assert!(view.context().pointer("/form/values/password1").is_none());
    }

    #[actix_web::test]
    async fn successful_signin_establishes_a_session() {
        let existing = Username::new("reader").expect("valid username");
        let fixture = harness(FixtureAccountService::with_account(&existing, "secret"));
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signin/")
                .set_form([("username", "reader"), ("password", "secret")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
    }

    #[actix_web::test]
    async fn wrong_password_re_renders_with_a_form_message() {
        let existing = Username::new("reader").expect("valid username");
        let fixture = harness(FixtureAccountService::with_account(&existing, "secret"));
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signin/")
                .set_form([("username", "reader"), ("password", "wrong")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let view = fixture.renderer.last_view().expect("signin view rendered");
        assert_eq!(view.template(), Template::SignIn);
        let messages = view
            .context()
            .pointer("/form/errors/form")
            .and_then(Value::as_array)
            .expect("form messages");
        assert_eq!(
            messages.first().and_then(Value::as_str),
            Some("Please enter a correct username and password.")
        );
    }

    #[actix_web::test]
    async fn missing_signin_fields_are_field_errors() {
        let fixture = harness(FixtureAccountService::default());
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/signin/")
                .set_form([("username", "")])
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let view = fixture.renderer.last_view().expect("signin view rendered");
        for field in ["username", "password"] {
            assert!(
                view.context()
                    .pointer(&format!("/form/errors/fields/{field}"))
                    .is_some(),
                "missing error for {field}"
            );
        }
    }

    #[actix_web::test]
    async fn get_pages_render_empty_forms() {
        let fixture = harness(FixtureAccountService::default());
        let app = actix_test::init_service(test_app(fixture.state.clone())).await;

        for (uri, template) in [("/signup/", Template::SignUp), ("/signin/", Template::SignIn)] {
            let response = actix_test::call_service(
                &app,
                actix_test::TestRequest::get().uri(uri).to_request(),
            )
            .await;
            assert!(response.status().is_success());
            let view = fixture.renderer.last_view().expect("view rendered");
            assert_eq!(view.template(), template);
            let fields = view
                .context()
                .pointer("/form/errors/fields")
                .and_then(Value::as_object)
                .expect("fields map");
            assert!(fields.is_empty());
        }
    }
}
