//! Diesel-backed `TagIndex` adapter.
//!
//! Tag membership lives in the `post_tags` join table; the global ranking
//! is a grouped count over it.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TagIndex, TagIndexError};
use crate::domain::{Post, Slug, Tag, TagRank};

use super::diesel_post_repository::{rows_into_posts, tag_names_for};
use super::models::PostRow;
use super::pool::DbPool;
use super::schema::{post_tags, posts, tags};

/// Diesel-backed tag index.
#[derive(Clone)]
pub struct DieselTagIndex {
    pool: DbPool,
}

impl DieselTagIndex {
    /// Create a new adapter over the shared pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn connection_error(err: &super::pool::PoolError) -> TagIndexError {
    TagIndexError::connection(err.to_string())
}

fn query_error(err: &diesel::result::Error) -> TagIndexError {
    TagIndexError::query(err.to_string())
}

/// Rebuild a domain tag from stored columns.
pub(super) fn stored_tag(slug: String, name: String) -> Result<Tag, TagIndexError> {
    let slug = Slug::new(&slug)
        .map_err(|err| TagIndexError::query(format!("stored tag slug {slug:?} is invalid: {err}")))?;
    Tag::try_new(slug, name)
        .map_err(|err| TagIndexError::query(format!("stored tag is invalid: {err}")))
}

#[async_trait]
impl TagIndex for DieselTagIndex {
    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Tag>, TagIndexError> {
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let row: Option<(String, String)> = tags::table
            .filter(tags::slug.eq(slug.as_ref()))
            .select((tags::slug, tags::name))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| query_error(&err))?;

        row.map(|(stored_slug, name)| stored_tag(stored_slug, name))
            .transpose()
    }

    async fn posts_tagged(&self, slug: &Slug) -> Result<Vec<Post>, TagIndexError> {
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let rows: Vec<PostRow> = posts::table
            .inner_join(post_tags::table.inner_join(tags::table))
            .filter(tags::slug.eq(slug.as_ref()))
            .order(posts::created_at.desc())
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| query_error(&err))?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let tags_by_post = tag_names_for(&mut conn, &ids)
            .await
            .map_err(|err| query_error(&err))?;
        rows_into_posts(rows, tags_by_post)
            .map_err(|err| TagIndexError::query(err.to_string()))
    }

    async fn most_common(&self) -> Result<Vec<TagRank>, TagIndexError> {
        use diesel::dsl::count;

        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let rows: Vec<((String, String), i64)> = post_tags::table
            .inner_join(tags::table)
            .group_by((tags::id, tags::slug, tags::name))
            .select(((tags::slug, tags::name), count(post_tags::post_id)))
            .order_by(count(post_tags::post_id).desc())
            .then_order_by(tags::name.asc())
            .load(&mut conn)
            .await
            .map_err(|err| query_error(&err))?;

        rows.into_iter()
            .map(|((stored_slug, name), uses)| {
                let tag = stored_tag(stored_slug, name)?;
                Ok(TagRank::new(tag, u64::try_from(uses).unwrap_or_default()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the pure helpers; query execution is covered
    //! by the fixture-backed handler tests.
    use super::*;

    #[test]
    fn stored_tags_rebuild() {
        let tag = stored_tag("rust".to_owned(), "Rust".to_owned()).expect("valid tag converts");
        assert_eq!(tag.slug().as_ref(), "rust");
        assert_eq!(tag.name(), "Rust");
    }

    #[test]
    fn corrupted_stored_tags_are_reported() {
        let err = stored_tag("Not A Slug".to_owned(), "Rust".to_owned())
            .expect_err("invalid slug must fail");
        assert!(matches!(err, TagIndexError::Query { .. }));
    }
}
