//! Driven port for persisting and reading comments.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Comment, NewComment, Slug};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by comment store adapters.
    pub enum CommentStoreError {
        /// Store connection could not be established.
        Connection { message: String } => "comment store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment store query failed: {message}",
    }
}

/// Comment persistence operations.
///
/// Comments are append-only: the site offers no edit or delete surface.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a comment and return it with its stored timestamp.
    async fn create(&self, comment: &NewComment) -> Result<Comment, CommentStoreError>;

    /// Comments for one post, oldest first.
    async fn list_for_post(&self, slug: &Slug) -> Result<Vec<Comment>, CommentStoreError>;
}

/// In-memory comment store used by tests and database-less deployments.
#[derive(Debug, Default)]
pub struct FixtureCommentRepository {
    comments: Mutex<Vec<Comment>>,
}

impl FixtureCommentRepository {
    /// Number of stored comments for `slug`, for test assertions.
    ///
    /// A poisoned lock reads as zero; that only happens after another test
    /// thread panicked mid-mutation.
    #[must_use]
    pub fn count_for(&self, slug: &Slug) -> usize {
        self.comments.lock().map_or(0, |comments| {
            comments
                .iter()
                .filter(|comment| comment.post() == slug)
                .count()
        })
    }
}

#[async_trait]
impl CommentRepository for FixtureCommentRepository {
    async fn create(&self, comment: &NewComment) -> Result<Comment, CommentStoreError> {
        let stored = Comment::new(
            comment.post().clone(),
            comment.author().clone(),
            comment.body().clone(),
            Utc::now(),
        );
        self.comments
            .lock()
            .map_err(|_| CommentStoreError::query("comment fixture lock poisoned"))?
            .push(stored.clone());
        Ok(stored)
    }

    async fn list_for_post(&self, slug: &Slug) -> Result<Vec<Comment>, CommentStoreError> {
        Ok(self
            .comments
            .lock()
            .map_err(|_| CommentStoreError::query("comment fixture lock poisoned"))?
            .iter()
            .filter(|comment| comment.post() == slug)
            .cloned()
            .collect())
    }
}
