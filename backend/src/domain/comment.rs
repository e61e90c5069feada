//! Comments attached to a blog post.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Slug, Username};

/// Validation errors returned by [`CommentBody::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    /// The comment text was missing or blank once trimmed.
    EmptyText,
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "This field is required."),
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// Free-text comment body, required to be non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct CommentBody(String);

impl CommentBody {
    /// Validate and construct a comment body from raw form input.
    ///
    /// Surrounding whitespace is preserved; only fully blank input fails.
    pub fn new(value: impl Into<String>) -> Result<Self, CommentValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CommentValidationError::EmptyText);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for CommentBody {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CommentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CommentBody> for String {
    fn from(value: CommentBody) -> Self {
        value.0
    }
}

/// A comment not yet persisted.
///
/// ## Invariants
/// - `post` names an existing post; handlers resolve the slug before
///   creating the comment, so the store never sees an orphan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    post: Slug,
    author: Username,
    body: CommentBody,
}

impl NewComment {
    /// Bundle the components of a comment awaiting persistence.
    pub fn new(post: Slug, author: Username, body: CommentBody) -> Self {
        Self { post, author, body }
    }

    /// Slug of the post being commented on.
    pub fn post(&self) -> &Slug {
        &self.post
    }

    /// Identity attached to the submitting request.
    pub fn author(&self) -> &Username {
        &self.author
    }

    /// Validated comment text.
    pub fn body(&self) -> &CommentBody {
        &self.body
    }
}

/// A persisted comment as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    post: Slug,
    author: Username,
    body: CommentBody,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Rebuild a comment from stored components.
    pub fn new(post: Slug, author: Username, body: CommentBody, created_at: DateTime<Utc>) -> Self {
        Self {
            post,
            author,
            body,
            created_at,
        }
    }

    /// Slug of the owning post.
    pub fn post(&self) -> &Slug {
        &self.post
    }

    /// Comment author's username.
    pub fn author(&self) -> &Username {
        &self.author
    }

    /// Comment text.
    pub fn body(&self) -> &CommentBody {
        &self.body
    }

    /// Submission timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
