//! Shared HTTP adapter state.
//!
//! Page handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::EmailAddress;
use crate::domain::ports::{
    AccountService, CommentRepository, FixtureAccountService, FixtureCommentRepository,
    FixturePostRepository, FixtureTagIndex, Mailer, PostRepository, RecordingMailer, TagIndex,
    ViewRenderer,
};
use crate::outbound::render::HtmlRenderer;

/// Dependency bundle for page handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Post read access.
    pub posts: Arc<dyn PostRepository>,
    /// Comment persistence.
    pub comments: Arc<dyn CommentRepository>,
    /// Tag lookup and ranking.
    pub tags: Arc<dyn TagIndex>,
    /// Account registration and credential verification.
    pub accounts: Arc<dyn AccountService>,
    /// Outgoing mail dispatch.
    pub mailer: Arc<dyn Mailer>,
    /// Page renderer.
    pub renderer: Arc<dyn ViewRenderer>,
    /// Fixed recipient for contact-form mail.
    pub feedback_recipient: EmailAddress,
}

impl HttpState {
    /// Build a state backed entirely by in-memory fixtures.
    ///
    /// Used by tests and by deployments started without a database URL.
    /// Callers wanting non-empty content replace individual fields.
    ///
    /// # Panics
    /// Never in practice: the default recipient literal is a valid address.
    #[must_use]
    pub fn fixtures() -> Self {
        let recipient = EmailAddress::new("owner@example.org")
            .unwrap_or_else(|err| panic!("default recipient must be valid: {err}"));
        Self {
            posts: Arc::new(FixturePostRepository::default()),
            comments: Arc::new(FixtureCommentRepository::default()),
            tags: Arc::new(FixtureTagIndex::default()),
            accounts: Arc::new(FixtureAccountService::default()),
            mailer: Arc::new(RecordingMailer::default()),
            renderer: Arc::new(HtmlRenderer::default()),
            feedback_recipient: recipient,
        }
    }
}
