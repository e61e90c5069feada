//! Blog post aggregate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Slug;

/// Validation errors returned by [`Post::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Heading was missing or blank once trimmed.
    EmptyHeading,
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHeading => write!(f, "post heading must not be empty"),
        }
    }
}

impl std::error::Error for PostValidationError {}

/// A published blog post.
///
/// Posts are immutable from this crate's perspective: there is no edit or
/// delete surface, only listing and reading.
///
/// ## Invariants
/// - `heading` is non-empty once trimmed.
/// - `tags` holds display names; membership is owned by the tag index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    slug: Slug,
    heading: String,
    content: String,
    created_at: DateTime<Utc>,
    tags: Vec<String>,
}

impl Post {
    /// Fallible constructor enforcing the heading invariant.
    pub fn try_new(
        slug: Slug,
        heading: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
        tags: Vec<String>,
    ) -> Result<Self, PostValidationError> {
        let heading = heading.into();
        if heading.trim().is_empty() {
            return Err(PostValidationError::EmptyHeading);
        }
        Ok(Self {
            slug,
            heading,
            content: content.into(),
            created_at,
            tags,
        })
    }

    /// URL identifier for the post.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Headline shown in listings and on the detail page.
    pub fn heading(&self) -> &str {
        self.heading.as_str()
    }

    /// Full body content.
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    /// Publication timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Display names of the tags attached to this post.
    pub fn tags(&self) -> &[String] {
        self.tags.as_slice()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;

    fn slug(raw: &str) -> Slug {
        Slug::new(raw).expect("valid slug")
    }

    #[test]
    fn blank_heading_is_rejected() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).single().expect("valid time");
        let err = Post::try_new(slug("first"), "  ", "body", created, Vec::new())
            .expect_err("blank heading must fail");
        assert_eq!(err, PostValidationError::EmptyHeading);
    }

    #[test]
    fn accessors_expose_components() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).single().expect("valid time");
        let post = Post::try_new(
            slug("first"),
            "First post",
            "Hello there",
            created,
            vec!["rust".to_owned()],
        )
        .expect("valid post");
        assert_eq!(post.slug().as_ref(), "first");
        assert_eq!(post.heading(), "First post");
        assert_eq!(post.content(), "Hello there");
        assert_eq!(post.created_at(), created);
        assert_eq!(post.tags(), ["rust".to_owned()]);
    }
}
