//! Driven port for the tag index collaborator.
//!
//! The tag index owns tag↔post membership and the global frequency
//! ranking; this crate only reads from it.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{Post, Slug, Tag, TagRank};

use super::define_port_error;

define_port_error! {
    /// Errors raised by tag index adapters.
    pub enum TagIndexError {
        /// Index connection could not be established.
        Connection { message: String } => "tag index connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "tag index query failed: {message}",
    }
}

/// Read access to tag membership and ranking.
#[async_trait]
pub trait TagIndex: Send + Sync {
    /// Look up a tag by exact slug match.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Tag>, TagIndexError>;

    /// All posts carrying the tag, newest first.
    async fn posts_tagged(&self, slug: &Slug) -> Result<Vec<Post>, TagIndexError>;

    /// Tags ordered by number of associated posts, most used first.
    ///
    /// Ties break alphabetically by display name so the ranking is stable.
    async fn most_common(&self) -> Result<Vec<TagRank>, TagIndexError>;
}

/// In-memory tag index used by tests and database-less deployments.
///
/// Membership is derived from the display names each post carries.
#[derive(Debug, Default)]
pub struct FixtureTagIndex {
    tags: Vec<Tag>,
    posts: Vec<Post>,
}

impl FixtureTagIndex {
    /// Build a fixture from known tags and the posts carrying them.
    #[must_use]
    pub fn with_content(tags: Vec<Tag>, mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Self { tags, posts }
    }
}

#[async_trait]
impl TagIndex for FixtureTagIndex {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Tag>, TagIndexError> {
        Ok(self.tags.iter().find(|tag| tag.slug() == slug).cloned())
    }

    async fn posts_tagged(&self, slug: &Slug) -> Result<Vec<Post>, TagIndexError> {
        let Some(tag) = self.tags.iter().find(|tag| tag.slug() == slug) else {
            return Ok(Vec::new());
        };
        Ok(self
            .posts
            .iter()
            .filter(|post| post.tags().iter().any(|name| name == tag.name()))
            .cloned()
            .collect())
    }

    async fn most_common(&self) -> Result<Vec<TagRank>, TagIndexError> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for post in &self.posts {
            for name in post.tags() {
                *counts.entry(name.as_str()).or_default() += 1;
            }
        }

        let mut ranking: Vec<TagRank> = self
            .tags
            .iter()
            .filter_map(|tag| {
                counts
                    .get(tag.name())
                    .map(|count| TagRank::new(tag.clone(), *count))
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.tag.name().cmp(b.tag.name()))
        });
        Ok(ranking)
    }
}
