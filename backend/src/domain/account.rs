//! Account identity primitives: usernames, email addresses, passwords.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Validation errors raised by the account value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username is shorter than the allowed minimum.
    UsernameTooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// Username is longer than the allowed maximum.
    UsernameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Username contains characters outside the allowed set.
    UsernameInvalidCharacters,
    /// Email address was missing or blank once trimmed.
    EmptyEmail,
    /// Email address does not look like `local@domain`.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "This field is required."),
            Self::UsernameTooShort { min } => {
                write!(f, "Username must be at least {min} characters.")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "Username must be at most {max} characters.")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "Username may only contain letters, digits, dots, hyphens, or underscores.",
            ),
            Self::EmptyEmail => write!(f, "This field is required."),
            Self::InvalidEmail => write!(f, "Enter a valid email address."),
            Self::EmptyPassword => write!(f, "This field is required."),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 32;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = "^[A-Za-z0-9._-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One local part, one domain, no whitespace. Deliverability is the
        // mail relay's problem, not the form's.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique login name for an account, also the public comment author name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`] from borrowed input.
    ///
    /// The input is trimmed before validation.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Self::from_owned(value.as_ref().trim().to_owned())
    }

    fn from_owned(value: String) -> Result<Self, AccountValidationError> {
        if value.trim().is_empty() {
            return Err(AccountValidationError::EmptyUsername);
        }

        let length = value.chars().count();
        if length < USERNAME_MIN {
            return Err(AccountValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(AccountValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(&value) {
            return Err(AccountValidationError::UsernameInvalidCharacters);
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Validated email address.
///
/// ## Invariants
/// - Trimmed, non-empty, and shaped like `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from borrowed input.
    pub fn new(value: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Self::from_owned(value.as_ref().trim().to_owned())
    }

    fn from_owned(value: String) -> Result<Self, AccountValidationError> {
        if value.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&value) {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A raw password held only long enough to hand to the account service.
///
/// The backing storage is zeroed on drop. The domain imposes presence only;
/// password policy belongs to the account collaborator.
#[derive(Debug, Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Construct a password, requiring a non-empty value.
    ///
    /// Caller-provided whitespace is preserved to avoid surprising
    /// credential comparisons.
    pub fn new(value: impl Into<String>) -> Result<Self, AccountValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(AccountValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(value)))
    }

    /// Expose the raw secret for verification or digest computation.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated payload for registering a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    username: Username,
    email: EmailAddress,
    password: Password,
}

impl NewAccount {
    /// Bundle validated signup components.
    pub fn new(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username,
            email,
            password,
        }
    }

    /// Login name requested by the visitor.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address supplied at signup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Raw password to be digested by the account store.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", AccountValidationError::EmptyUsername)]
    #[case("   ", AccountValidationError::EmptyUsername)]
    #[case("ab", AccountValidationError::UsernameTooShort { min: USERNAME_MIN })]
    #[case("has spaces", AccountValidationError::UsernameInvalidCharacters)]
    #[case("naïve", AccountValidationError::UsernameInvalidCharacters)]
    fn invalid_usernames_are_rejected(
        #[case] raw: &str,
        #[case] expected: AccountValidationError,
    ) {
        let err = Username::new(raw).expect_err("invalid username must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn over_long_usernames_are_rejected() {
        let raw = "x".repeat(USERNAME_MAX + 1);
        let err = Username::new(&raw).expect_err("over-long username must fail");
        assert_eq!(err, AccountValidationError::UsernameTooLong { max: USERNAME_MAX });
    }

    #[rstest]
    #[case("reader_1")]
    #[case("a.b-c")]
    #[case("  padded  ")]
    fn valid_usernames_are_trimmed(#[case] raw: &str) {
        let username = Username::new(raw).expect("valid username");
        assert_eq!(username.as_ref(), raw.trim());
    }

    #[rstest]
    #[case("", AccountValidationError::EmptyEmail)]
    #[case("not-an-email", AccountValidationError::InvalidEmail)]
    #[case("two@@signs.example", AccountValidationError::InvalidEmail)]
    #[case("missing@tld", AccountValidationError::InvalidEmail)]
    fn invalid_emails_are_rejected(#[case] raw: &str, #[case] expected: AccountValidationError) {
        let err = EmailAddress::new(raw).expect_err("invalid email must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn valid_email_round_trips() {
        let email = EmailAddress::new(" reader@example.org ").expect("valid email");
        assert_eq!(email.as_ref(), "reader@example.org");
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = Password::new("").expect_err("empty password must fail");
        assert_eq!(err, AccountValidationError::EmptyPassword);
    }

    #[test]
    fn password_preserves_whitespace() {
        let password = Password::new("  secret  ").expect("non-empty password");
        assert_eq!(password.expose(), "  secret  ");
    }
}
