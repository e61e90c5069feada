//! Tags and tag frequency ranking.

use std::fmt;

use serde::Serialize;

use crate::domain::Slug;

/// Validation errors returned by [`Tag::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    /// Display name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "tag name must not be empty"),
        }
    }
}

impl std::error::Error for TagValidationError {}

/// A tag attached to posts, identified by slug with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    slug: Slug,
    name: String,
}

impl Tag {
    /// Fallible constructor enforcing a non-blank display name.
    pub fn try_new(slug: Slug, name: impl Into<String>) -> Result<Self, TagValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TagValidationError::EmptyName);
        }
        Ok(Self { slug, name })
    }

    /// URL identifier for the tag.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Display value shown in page titles and tag clouds.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// A tag together with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRank {
    /// The ranked tag.
    pub tag: Tag,
    /// Number of posts carrying the tag.
    pub count: u64,
}

impl TagRank {
    /// Pair a tag with its usage count.
    pub fn new(tag: Tag, count: u64) -> Self {
        Self { tag, count }
    }
}
