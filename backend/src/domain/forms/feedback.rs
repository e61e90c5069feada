//! Contact form binding, validation, and mail composition.

use serde::Deserialize;

use crate::domain::account::EmailAddress;
use crate::domain::forms::FieldErrors;

/// Raw contact-form submission as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackForm {
    /// Sender's name.
    pub name: Option<String>,
    /// Sender's reply address.
    pub email: Option<String>,
    /// Message subject.
    pub subject: Option<String>,
    /// Message body.
    pub message: Option<String>,
}

impl FeedbackForm {
    /// Validate presence of every field and the email shape.
    ///
    /// The subject is accepted as-is here; whether it is safe to place in a
    /// mail header is the mailer's decision.
    ///
    /// # Errors
    /// Returns [`FieldErrors`] naming each missing or malformed field.
    pub fn validate(&self) -> Result<FeedbackData, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = self.name.as_deref().unwrap_or_default().trim();
        if name.is_empty() {
            errors.add_field("name", "This field is required.");
        }

        let email = match EmailAddress::new(self.email.as_deref().unwrap_or_default()) {
            Ok(value) => Some(value),
            Err(err) => {
                errors.add_field("email", err.to_string());
                None
            }
        };

        let subject = self.subject.as_deref().unwrap_or_default().trim();
        if subject.is_empty() {
            errors.add_field("subject", "This field is required.");
        }

        let message = self.message.as_deref().unwrap_or_default().trim();
        if message.is_empty() {
            errors.add_field("message", "This field is required.");
        }

        match email {
            Some(email) if errors.is_empty() => Ok(FeedbackData {
                name: name.to_owned(),
                email,
                subject: subject.to_owned(),
                message: message.to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

/// Validated contact-form data ready for mail composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackData {
    name: String,
    email: EmailAddress,
    subject: String,
    message: String,
}

impl FeedbackData {
    /// Sender's name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Sender's reply address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Subject as submitted.
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Message body as submitted.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Subject line for the outgoing mail, naming the sender.
    #[must_use]
    pub fn mail_subject(&self) -> String {
        format!("From {} | {}", self.name, self.subject)
    }

    /// Body for the outgoing mail, closing with the reply address.
    #[must_use]
    pub fn mail_body(&self) -> String {
        format!("{} \n\nby {}", self.message, self.email)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn complete() -> FeedbackForm {
        FeedbackForm {
            name: Some("Ada".to_owned()),
            email: Some("ada@example.org".to_owned()),
            subject: Some("Hello".to_owned()),
            message: Some("Enjoyed the latest post.".to_owned()),
        }
    }

    #[test]
    fn complete_submission_validates() {
        let data = complete().validate().expect("valid submission");
        assert_eq!(data.name(), "Ada");
        assert_eq!(data.subject(), "Hello");
    }

    #[rstest]
    #[case("name")]
    #[case("subject")]
    #[case("message")]
    fn each_missing_field_is_reported(#[case] field: &str) {
        let mut form = complete();
        match field {
            "name" => form.name = None,
            "subject" => form.subject = Some("   ".to_owned()),
            _ => form.message = None,
        }
        let errors = form.validate().expect_err("incomplete submission must fail");
        assert_eq!(
            errors.field(field),
            Some(["This field is required.".to_owned()].as_slice())
        );
    }

    #[test]
    fn malformed_email_is_reported() {
        let mut form = complete();
        form.email = Some("nope".to_owned());
        let errors = form.validate().expect_err("bad email must fail");
        assert_eq!(
            errors.field("email"),
            Some(["Enter a valid email address.".to_owned()].as_slice())
        );
    }

    #[test]
    fn mail_composition_embeds_sender_and_reply_address() {
        let data = complete().validate().expect("valid submission");
        assert_eq!(data.mail_subject(), "From Ada | Hello");
        assert_eq!(
            data.mail_body(),
            "Enjoyed the latest post. \n\nby ada@example.org"
        );
    }

    #[test]
    fn newline_subjects_survive_validation() {
        // Header safety is enforced by the mailer, not the form.
        let mut form = complete();
        form.subject = Some("Hello\r\nBcc: everyone".to_owned());
        let data = form.validate().expect("validation accepts raw subjects");
        assert!(data.mail_subject().contains('\n'));
    }
}
