//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting actix
//! handlers turn domain failures into plain responses with consistent
//! status codes. Pages are server-rendered, so error bodies are plain text
//! rather than a JSON envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header::ContentType};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Response header carrying the request correlation identifier.
const TRACE_ID_HEADER: &str = "trace-id";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body text shown to visitors for a given failure category.
///
/// Not-found and internal failures are generic on purpose: the page layer
/// never explains which lookup missed or what broke, the logs do.
fn body_for(error: &Error) -> String {
    match error.code() {
        ErrorCode::NotFound => "Not Found".to_owned(),
        ErrorCode::InternalError => "Internal server error".to_owned(),
        _ => error.message().to_owned(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder
            .content_type(ContentType::plaintext())
            .body(body_for(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("who"), StatusCode::UNAUTHORIZED)]
    #[case(Error::forbidden("nope"), StatusCode::FORBIDDEN)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("taken"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn codes_map_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[tokio::test]
    async fn internal_details_are_redacted() {
        let response = Error::internal("database password leaked").error_response();
        let body = to_bytes(response.into_body()).await.expect("readable body");
        assert_eq!(body, "Internal server error");
    }

    #[tokio::test]
    async fn not_found_body_is_generic() {
        let response = Error::not_found("no post called secret-draft").error_response();
        let body = to_bytes(response.into_body()).await.expect("readable body");
        assert_eq!(body, "Not Found");
    }

    #[test]
    fn trace_id_is_echoed_as_a_header() {
        let response = Error::not_found("missing").with_trace_id("abc").error_response();
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("abc")
        );
    }
}
