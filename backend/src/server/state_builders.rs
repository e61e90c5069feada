//! Builders assembling the HTTP state from server configuration.

use std::sync::Arc;

use tracing::info;

use crate::inbound::http::state::HttpState;
use crate::outbound::mail::HttpMailer;
use crate::outbound::persistence::{
    DieselAccountService, DieselCommentRepository, DieselPostRepository, DieselTagIndex,
};

use super::ServerConfig;

/// Build the handler state, preferring real adapters where configuration
/// provides their backing services and falling back to fixtures otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let mut state = HttpState::fixtures();
    state.feedback_recipient = config.feedback_recipient.clone();

    if let Some(pool) = &config.db_pool {
        state.posts = Arc::new(DieselPostRepository::new(pool.clone()));
        state.comments = Arc::new(DieselCommentRepository::new(pool.clone()));
        state.tags = Arc::new(DieselTagIndex::new(pool.clone()));
        state.accounts = Arc::new(DieselAccountService::new(pool.clone()));
        info!("database-backed stores enabled");
    } else {
        info!("no database configured; serving in-memory fixtures");
    }

    if let Some(mail) = &config.mail {
        let mailer = HttpMailer::new(mail.endpoint.clone(), mail.token.clone(), mail.sender.clone())
            .map_err(|err| {
                std::io::Error::other(format!("mail client construction failed: {err}"))
            })?;
        state.mailer = Arc::new(mailer);
        info!(endpoint = %mail.endpoint, "mail relay enabled");
    } else {
        info!("no mail relay configured; recording mail in memory");
    }

    Ok(state)
}
