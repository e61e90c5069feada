//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod comment_repository;
mod mailer;
mod post_repository;
mod renderer;
mod tag_index;

pub use account_service::{AccountError, AccountService, FixtureAccountService};
pub use comment_repository::{CommentRepository, CommentStoreError, FixtureCommentRepository};
pub use mailer::{MailError, MailMessage, Mailer, RecordingMailer, SentMail};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{FixturePostRepository, PostRepository, PostStoreError};
pub use renderer::{RenderError, Template, View, ViewRenderer};
pub use tag_index::{FixtureTagIndex, TagIndex, TagIndexError};
