//! Signin form binding and validation.

use serde::Deserialize;
use zeroize::Zeroizing;

use crate::domain::forms::FieldErrors;

/// Raw signin submission as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignInForm {
    /// Login name.
    pub username: Option<String>,
    /// Password.
    pub password: Option<String>,
}

impl SignInForm {
    /// Validate that both credentials are present.
    ///
    /// The validator only checks presence; whether the pair names a real
    /// account is the account service's call.
    ///
    /// # Errors
    /// Returns [`FieldErrors`] naming each missing field.
    pub fn validate(&self) -> Result<SignInCredentials, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = self.username.as_deref().unwrap_or_default().trim();
        if username.is_empty() {
            errors.add_field("username", "This field is required.");
        }

        let password = self.password.as_deref().unwrap_or_default();
        if password.is_empty() {
            errors.add_field("password", "This field is required.");
        }

        if errors.is_empty() {
            Ok(SignInCredentials {
                username: username.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            })
        } else {
            Err(errors)
        }
    }
}

/// Validated signin credentials handed to the account service.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty but retains caller-provided whitespace to
///   avoid surprising credential comparisons.
#[derive(Debug, Clone)]
pub struct SignInCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
