//! Diesel/PostgreSQL adapters for the persistence-facing ports.

mod diesel_account_service;
mod diesel_comment_repository;
mod diesel_post_repository;
mod diesel_tag_index;
mod migrations;
mod models;
mod pool;
pub mod schema;

pub use diesel_account_service::DieselAccountService;
pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_tag_index::DieselTagIndex;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use models::{NewCommentRow, NewUserRow, PostRow};
pub use pool::{DbPool, PoolConfig, PoolError};
