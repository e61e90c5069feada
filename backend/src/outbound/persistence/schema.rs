//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered users with their credential digests. The `username`
    /// column carries a unique constraint; signup races resolve there.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name (max 32 characters).
        username -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Per-account random salt for the credential digest.
        password_salt -> Varchar,
        /// Hex-encoded SHA-256 digest of salt and password.
        password_digest -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published posts.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique URL slug.
        slug -> Varchar,
        /// Headline shown in listings.
        heading -> Varchar,
        /// Full body content.
        content -> Text,
        /// Publication timestamp; listings order by this, descending.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tags attachable to posts.
    tags (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique URL slug.
        slug -> Varchar,
        /// Display name shown in titles and tag clouds.
        name -> Varchar,
    }
}

diesel::table! {
    /// Post↔tag membership.
    post_tags (post_id, tag_id) {
        /// Post carrying the tag.
        post_id -> Uuid,
        /// Tag attached to the post.
        tag_id -> Uuid,
    }
}

diesel::table! {
    /// Comments attached to posts.
    comments (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning post.
        post_id -> Uuid,
        /// Authoring user.
        author_id -> Uuid,
        /// Free-text comment body.
        body -> Text,
        /// Submission timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(post_tags -> posts (post_id));
diesel::joinable!(post_tags -> tags (tag_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, posts, tags, post_tags, comments);
