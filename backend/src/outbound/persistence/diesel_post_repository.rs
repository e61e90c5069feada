//! Diesel-backed `PostRepository` adapter.
//!
//! Reads posts from PostgreSQL and attaches tag names in a second query so
//! listings stay a flat, ordered select.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PostRepository, PostStoreError};
use crate::domain::{Post, Slug};

use super::models::PostRow;
use super::pool::DbPool;
use super::schema::{post_tags, posts, tags};

/// Diesel-backed post store.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new adapter over the shared pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn connection_error(err: &super::pool::PoolError) -> PostStoreError {
    PostStoreError::connection(err.to_string())
}

fn query_error(err: &diesel::result::Error) -> PostStoreError {
    PostStoreError::query(err.to_string())
}

/// Escape LIKE wildcards so a visitor's query matches literally.
pub(super) fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Tag names per post for the given post ids, alphabetically ordered.
pub(super) async fn tag_names_for(
    conn: &mut AsyncPgConnection,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<String>>, diesel::result::Error> {
    let rows: Vec<(Uuid, String)> = post_tags::table
        .inner_join(tags::table)
        .filter(post_tags::post_id.eq_any(post_ids))
        .select((post_tags::post_id, tags::name))
        .order(tags::name.asc())
        .load(conn)
        .await?;

    let mut by_post: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (post_id, name) in rows {
        by_post.entry(post_id).or_default().push(name);
    }
    Ok(by_post)
}

/// Convert rows plus their tag map into domain posts, preserving order.
pub(super) fn rows_into_posts(
    rows: Vec<PostRow>,
    mut tags_by_post: HashMap<Uuid, Vec<String>>,
) -> Result<Vec<Post>, PostStoreError> {
    rows.into_iter()
        .map(|row| {
            let tag_names = tags_by_post.remove(&row.id).unwrap_or_default();
            row.into_domain(tag_names).map_err(PostStoreError::query)
        })
        .collect()
}

impl DieselPostRepository {
    async fn load_with_tags(
        &self,
        rows: Vec<PostRow>,
    ) -> Result<Vec<Post>, PostStoreError> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let tags_by_post = tag_names_for(&mut conn, &ids)
            .await
            .map_err(|err| query_error(&err))?;
        rows_into_posts(rows, tags_by_post)
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, PostStoreError> {
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let rows: Vec<PostRow> = posts::table
            .select(PostRow::as_select())
            .order(posts::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(|err| query_error(&err))?;
        drop(conn);
        self.load_with_tags(rows).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> Result<Option<Post>, PostStoreError> {
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let row: Option<PostRow> = posts::table
            .select(PostRow::as_select())
            .filter(posts::slug.eq(slug.as_ref()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| query_error(&err))?;
        drop(conn);

        match row {
            Some(row) => Ok(self.load_with_tags(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Post>, PostStoreError> {
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let rows: Vec<PostRow> = posts::table
            .select(PostRow::as_select())
            .order(posts::created_at.desc())
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .load(&mut conn)
            .await
            .map_err(|err| query_error(&err))?;
        drop(conn);
        self.load_with_tags(rows).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Post>, PostStoreError> {
        let pattern = format!("%{}%", escape_like(query));
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let rows: Vec<PostRow> = posts::table
            .select(PostRow::as_select())
            .filter(
                posts::heading
                    .ilike(&pattern)
                    .or(posts::content.ilike(&pattern)),
            )
            .order(posts::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(|err| query_error(&err))?;
        drop(conn);
        self.load_with_tags(rows).await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the pure helpers; query execution is covered
    //! by the fixture-backed handler tests.
    use super::{escape_like, rows_into_posts, Post, PostRow, PostStoreError};
    use std::collections::HashMap;
    use uuid::Uuid;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("50%", "50\\%")]
    #[case("snake_case", "snake\\_case")]
    #[case("back\\slash", "back\\\\slash")]
    fn like_wildcards_are_escaped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like(input), expected);
    }

    #[test]
    fn rows_convert_in_order_with_their_tags() {
        let first = PostRow {
            id: Uuid::new_v4(),
            slug: "first".to_owned(),
            heading: "First".to_owned(),
            content: "body".to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2025, 3, 1, 12, 1, 0)
                .single()
                .expect("valid time"),
        };
        let second = PostRow {
            id: Uuid::new_v4(),
            slug: "second".to_owned(),
            heading: "Second".to_owned(),
            content: "body".to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
                .single()
                .expect("valid time"),
        };
        let mut tags_by_post = HashMap::new();
        tags_by_post.insert(first.id, vec!["Rust".to_owned()]);

        let posts = rows_into_posts(vec![first, second], tags_by_post)
            .expect("valid rows convert");
        let slugs: Vec<&str> = posts.iter().map(|post| post.slug().as_ref()).collect();
        assert_eq!(slugs, ["first", "second"]);
        assert_eq!(posts.first().map(Post::tags), Some(["Rust".to_owned()].as_slice()));
        assert_eq!(posts.get(1).map(|post| post.tags().len()), Some(0));
    }

    #[test]
    fn corrupted_rows_surface_as_query_errors() {
        let row = PostRow {
            id: Uuid::new_v4(),
            slug: "Bad Slug".to_owned(),
            heading: "Heading".to_owned(),
            content: "body".to_owned(),
            created_at: Utc
                .with_ymd_and_hms(2025, 3, 1, 12, 0, 0)
                .single()
                .expect("valid time"),
        };
        let err = rows_into_posts(vec![row], HashMap::new())
            .expect_err("corrupted row must fail");
        assert!(matches!(err, PostStoreError::Query { .. }));
    }
}
