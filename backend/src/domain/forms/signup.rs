//! Signup form binding and validation.

use serde::Deserialize;

use crate::domain::account::{EmailAddress, NewAccount, Password, Username};
use crate::domain::forms::FieldErrors;

/// Raw signup submission as posted by the browser.
///
/// Fields are optional so a missing input reports "required" instead of
/// failing form deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpForm {
    /// Requested login name.
    pub username: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Chosen password.
    pub password1: Option<String>,
    /// Password confirmation; must match `password1`.
    pub password2: Option<String>,
}

impl SignUpForm {
    /// Validate the submission into an account registration payload.
    ///
    /// Username uniqueness is the account service's responsibility; this
    /// validator covers presence, shape, and the confirmation match.
    ///
    /// # Errors
    /// Returns the accumulated [`FieldErrors`] when any field is missing,
    /// malformed, or the two passwords differ.
    pub fn validate(&self) -> Result<NewAccount, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = match Username::new(self.username.as_deref().unwrap_or_default()) {
            Ok(value) => Some(value),
            Err(err) => {
                errors.add_field("username", err.to_string());
                None
            }
        };

        let email = match EmailAddress::new(self.email.as_deref().unwrap_or_default()) {
            Ok(value) => Some(value),
            Err(err) => {
                errors.add_field("email", err.to_string());
                None
            }
        };

        let password = match Password::new(self.password1.clone().unwrap_or_default()) {
            Ok(value) => Some(value),
            Err(err) => {
                errors.add_field("password1", err.to_string());
                None
            }
        };

        let confirmation = self.password2.as_deref().unwrap_or_default();
        if confirmation.is_empty() {
            errors.add_field("password2", "This field is required.");
        } else if let Some(chosen) = password.as_ref() {
            if chosen.expose() != confirmation {
                errors.add_field("password2", "The two password fields didn't match.");
            }
        }

        match (username, email, password) {
            (Some(username), Some(email), Some(password)) if errors.is_empty() => {
                Ok(NewAccount::new(username, email, password))
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn form(
        username: Option<&str>,
        email: Option<&str>,
        password1: Option<&str>,
        password2: Option<&str>,
    ) -> SignUpForm {
        SignUpForm {
            username: username.map(str::to_owned),
            email: email.map(str::to_owned),
            password1: password1.map(str::to_owned),
            password2: password2.map(str::to_owned),
        }
    }

    #[test]
    fn complete_submission_validates() {
        let account = form(
            Some("reader"),
            Some("reader@example.org"),
            Some("correct horse"),
            Some("correct horse"),
        )
        .validate()
        .expect("valid submission");
        assert_eq!(account.username().as_ref(), "reader");
        assert_eq!(account.email().as_ref(), "reader@example.org");
    }

    #[rstest]
    #[case(None, "username")]
    #[case(Some(""), "username")]
    fn missing_username_is_reported(#[case] username: Option<&str>, #[case] field: &str) {
        let errors = form(username, Some("reader@example.org"), Some("pw"), Some("pw"))
            .validate()
            .expect_err("missing username must fail");
        assert!(errors.field(field).is_some());
    }

    #[test]
    fn mismatched_passwords_are_reported_on_the_confirmation() {
        let errors = form(
            Some("reader"),
            Some("reader@example.org"),
            Some("one"),
            Some("two"),
        )
        .validate()
        .expect_err("mismatch must fail");
        assert_eq!(
            errors.field("password2"),
            Some(["The two password fields didn't match.".to_owned()].as_slice())
        );
        assert!(errors.field("password1").is_none());
    }

    #[test]
    fn empty_submission_reports_every_field() {
        let errors = SignUpForm::default()
            .validate()
            .expect_err("empty submission must fail");
        for field in ["username", "email", "password1", "password2"] {
            assert!(errors.field(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn bad_email_shape_is_reported() {
        let errors = form(Some("reader"), Some("not-an-email"), Some("pw"), Some("pw"))
            .validate()
            .expect_err("bad email must fail");
        assert_eq!(
            errors.field("email"),
            Some(["Enter a valid email address.".to_owned()].as_slice())
        );
    }
}
