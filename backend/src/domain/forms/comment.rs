//! Comment form binding and validation.

use serde::Deserialize;

use crate::domain::comment::CommentBody;
use crate::domain::forms::FieldErrors;

/// Raw comment submission as posted from the post detail page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    /// Free-text comment body.
    pub text: Option<String>,
}

impl CommentForm {
    /// Validate the comment text into a [`CommentBody`].
    ///
    /// # Errors
    /// Returns [`FieldErrors`] with a `text` entry when the body is blank.
    pub fn validate(&self) -> Result<CommentBody, FieldErrors> {
        CommentBody::new(self.text.clone().unwrap_or_default()).map_err(|err| {
            let mut errors = FieldErrors::new();
            errors.add_field("text", err.to_string());
            errors
        })
    }
}
