//! Driven port for reading posts from the data store.
//!
//! In hexagonal terms this is a *driven* port: page handlers call it to
//! fetch posts without knowing the backing infrastructure, so handler tests
//! can substitute a deterministic in-memory implementation.

use async_trait::async_trait;

use crate::domain::{Post, Slug};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post store adapters.
    pub enum PostStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "post store connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "post store query failed: {message}",
    }
}

/// Read access to published posts.
///
/// Every listing method returns posts in creation-time descending order,
/// the store's default ordering for this site.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest first.
    async fn list_all(&self) -> Result<Vec<Post>, PostStoreError>;

    /// Look up a single post by exact slug match.
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Post>, PostStoreError>;

    /// The `limit` most recently created posts, newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<Post>, PostStoreError>;

    /// Posts whose heading or content contains `query` case-insensitively.
    ///
    /// A post matching on both fields appears once.
    async fn search(&self, query: &str) -> Result<Vec<Post>, PostStoreError>;
}

/// In-memory post store used by tests and database-less deployments.
///
/// Posts are sorted newest-first at construction, mirroring the production
/// adapter's ordering.
#[derive(Debug, Default)]
pub struct FixturePostRepository {
    posts: Vec<Post>,
}

impl FixturePostRepository {
    /// Build a fixture holding the given posts.
    #[must_use]
    pub fn with_posts(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Self { posts }
    }
}

#[async_trait]
impl PostRepository for FixturePostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, PostStoreError> {
        Ok(self.posts.clone())
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Post>, PostStoreError> {
        Ok(self.posts.iter().find(|post| post.slug() == slug).cloned())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Post>, PostStoreError> {
        Ok(self.posts.iter().take(limit).cloned().collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Post>, PostStoreError> {
        let needle = query.to_lowercase();
        Ok(self
            .posts
            .iter()
            .filter(|post| {
                post.heading().to_lowercase().contains(&needle)
                    || post.content().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}
