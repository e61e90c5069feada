//! Form bindings mapping raw submitted fields to validated values.
//!
//! Each form follows the same contract: bind optional raw fields, then
//! `validate()` into either a validated payload or a [`FieldErrors`] map
//! that the originating page re-renders. Forms are ephemeral; they exist
//! for one request only.

mod comment;
mod feedback;
mod field_errors;
mod signin;
mod signup;

pub use comment::CommentForm;
pub use feedback::{FeedbackData, FeedbackForm};
pub use field_errors::FieldErrors;
pub use signin::{SignInCredentials, SignInForm};
pub use signup::SignUpForm;
