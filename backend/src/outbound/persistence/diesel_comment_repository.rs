//! Diesel-backed `CommentRepository` adapter.
//!
//! Comments reference their post and author by id; the slug and username
//! handled by the domain are resolved on the way in and joined back on the
//! way out.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{CommentRepository, CommentStoreError};
use crate::domain::{Comment, CommentBody, NewComment, Slug, Username};

use super::models::NewCommentRow;
use super::pool::DbPool;
use super::schema::{comments, posts, users};

/// Diesel-backed comment store.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new adapter over the shared pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn connection_error(err: &super::pool::PoolError) -> CommentStoreError {
    CommentStoreError::connection(err.to_string())
}

fn query_error(err: &diesel::result::Error) -> CommentStoreError {
    CommentStoreError::query(err.to_string())
}

async fn post_id_for(
    conn: &mut AsyncPgConnection,
    slug: &Slug,
) -> Result<Uuid, CommentStoreError> {
    posts::table
        .filter(posts::slug.eq(slug.as_ref()))
        .select(posts::id)
        .first(conn)
        .await
        .optional()
        .map_err(|err| query_error(&err))?
        .ok_or_else(|| CommentStoreError::query(format!("no post with slug {slug}")))
}

async fn author_id_for(
    conn: &mut AsyncPgConnection,
    author: &Username,
) -> Result<Uuid, CommentStoreError> {
    users::table
        .filter(users::username.eq(author.as_ref()))
        .select(users::id)
        .first(conn)
        .await
        .optional()
        .map_err(|err| query_error(&err))?
        .ok_or_else(|| CommentStoreError::query(format!("no user named {author}")))
}

/// Rebuild a domain comment from joined row values.
pub(super) fn joined_row_into_comment(
    slug: String,
    author: String,
    body: String,
    created_at: DateTime<Utc>,
) -> Result<Comment, CommentStoreError> {
    let slug = Slug::new(&slug)
        .map_err(|err| CommentStoreError::query(format!("stored slug {slug:?} is invalid: {err}")))?;
    let author = Username::new(&author).map_err(|err| {
        CommentStoreError::query(format!("stored username {author:?} is invalid: {err}"))
    })?;
    let body = CommentBody::new(body)
        .map_err(|err| CommentStoreError::query(format!("stored comment is invalid: {err}")))?;
    Ok(Comment::new(slug, author, body, created_at))
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(&self, comment: &NewComment) -> Result<Comment, CommentStoreError> {
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let post_id = post_id_for(&mut conn, comment.post()).await?;
        let author_id = author_id_for(&mut conn, comment.author()).await?;

        let row = NewCommentRow {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            body: comment.body().as_ref().to_owned(),
        };
        let created_at: DateTime<Utc> = diesel::insert_into(comments::table)
            .values(&row)
            .returning(comments::created_at)
            .get_result(&mut conn)
            .await
            .map_err(|err| query_error(&err))?;

        Ok(Comment::new(
            comment.post().clone(),
            comment.author().clone(),
            comment.body().clone(),
            created_at,
        ))
    }

    async fn list_for_post(&self, slug: &Slug) -> Result<Vec<Comment>, CommentStoreError> {
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let rows: Vec<(String, String, String, DateTime<Utc>)> = comments::table
            .inner_join(posts::table)
            .inner_join(users::table)
            .filter(posts::slug.eq(slug.as_ref()))
            .order(comments::created_at.asc())
            .select((
                posts::slug,
                users::username,
                comments::body,
                comments::created_at,
            ))
            .load(&mut conn)
            .await
            .map_err(|err| query_error(&err))?;

        rows.into_iter()
            .map(|(post_slug, author, body, created_at)| {
                joined_row_into_comment(post_slug, author, body, created_at)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the pure helpers; query execution is covered
    //! by the fixture-backed handler tests.
    use super::*;
    use chrono::TimeZone;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
            .single()
            .expect("valid time")
    }

    #[test]
    fn joined_rows_rebuild_domain_comments() {
        let comment = joined_row_into_comment(
            "first-post".to_owned(),
            "reader".to_owned(),
            "nice".to_owned(),
            timestamp(),
        )
        .expect("valid row converts");
        assert_eq!(comment.post().as_ref(), "first-post");
        assert_eq!(comment.author().as_ref(), "reader");
        assert_eq!(comment.body().as_ref(), "nice");
    }

    #[test]
    fn corrupted_stored_values_are_reported() {
        let err = joined_row_into_comment(
            "first-post".to_owned(),
            "??".to_owned(),
            "nice".to_owned(),
            timestamp(),
        )
        .expect_err("invalid username must fail");
        assert!(matches!(err, CommentStoreError::Query { .. }));
    }
}
