//! Contact form and its thank-you page.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use serde_json::{Value, json};

use crate::domain::forms::{FeedbackForm, FieldErrors};
use crate::domain::ports::{MailError, MailMessage, Template};
use crate::domain::{ApiResult, Error};
use crate::inbound::http::state::HttpState;

use super::{form_context, render_page, see_other};

const CONTACT_TITLE: &str = "Send me a message";

fn feedback_values(form: &FeedbackForm) -> Value {
    json!({
        "name": form.name.clone().unwrap_or_default(),
        "email": form.email.clone().unwrap_or_default(),
        "subject": form.subject.clone().unwrap_or_default(),
        "message": form.message.clone().unwrap_or_default(),
    })
}

fn contact_context(form: &FeedbackForm, errors: &FieldErrors) -> Value {
    json!({
        "title": CONTACT_TITLE,
        "form": form_context(feedback_values(form), errors),
    })
}

/// Render the empty contact form.
#[get("/contact/")]
pub async fn contact_page(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render_page(
        &state,
        Template::Contact,
        contact_context(&FeedbackForm::default(), &FieldErrors::new()),
    )
}

/// Dispatch the composed message to the site owner.
///
/// A subject the mailer flags as header-unsafe gets a plain 200 body
/// rather than a redirect; it is the one branch that deviates from the
/// form/redirect pattern. Other transport failures surface as internal
/// errors scoped to this request.
#[post("/contact/")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    form: web::Form<FeedbackForm>,
) -> ApiResult<HttpResponse> {
    match form.validate() {
        Ok(data) => {
            let message = MailMessage::new(data.mail_subject(), data.mail_body());
            match state.mailer.send(&state.feedback_recipient, &message).await {
                Ok(()) => Ok(see_other("/contact/success/")),
                Err(MailError::HeaderInjection) => Ok(HttpResponse::Ok()
                    .content_type(ContentType::plaintext())
                    .body("Invalid subject")),
                Err(MailError::Transport { message }) => Err(Error::internal(message)),
            }
        }
        Err(errors) => render_page(&state, Template::Contact, contact_context(&form, &errors)),
    }
}

/// Render the thank-you page.
#[get("/contact/success/")]
pub async fn success_page(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render_page(&state, Template::Success, json!({ "title": "Thank you" }))
}
