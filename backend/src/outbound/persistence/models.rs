//! Row types bridging Diesel and the domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Post, Slug};

use super::schema::{comments, users};

/// A post row as read from the `posts` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = super::schema::posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PostRow {
    /// Primary key.
    pub id: Uuid,
    /// Unique URL slug.
    pub slug: String,
    /// Headline.
    pub heading: String,
    /// Body content.
    pub content: String,
    /// Publication timestamp.
    pub created_at: DateTime<Utc>,
}

impl PostRow {
    /// Convert the row plus its tag names into a domain post.
    ///
    /// # Errors
    /// Returns a description of the offending column when stored data no
    /// longer satisfies the domain invariants.
    pub fn into_domain(self, tags: Vec<String>) -> Result<Post, String> {
        let slug = Slug::new(&self.slug)
            .map_err(|err| format!("stored slug {:?} is invalid: {err}", self.slug))?;
        Post::try_new(slug, self.heading, self.content, self.created_at, tags)
            .map_err(|err| format!("stored post {:?} is invalid: {err}", self.slug))
    }
}

/// Insertable comment row; `created_at` defaults to `now()` in the schema.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    /// Primary key.
    pub id: Uuid,
    /// Owning post.
    pub post_id: Uuid,
    /// Authoring user.
    pub author_id: Uuid,
    /// Comment text.
    pub body: String,
}

/// Insertable user row; `created_at` defaults to `now()` in the schema.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Primary key.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Per-account digest salt.
    pub password_salt: String,
    /// Hex-encoded credential digest.
    pub password_digest: String,
}
