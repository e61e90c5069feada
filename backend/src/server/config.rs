//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use std::net::SocketAddr;
use url::Url;

use crate::domain::EmailAddress;
use crate::outbound::persistence::DbPool;

/// Transport settings for the outbound mail relay.
#[derive(Clone)]
pub struct MailRelayConfig {
    /// Relay endpoint receiving message POSTs.
    pub endpoint: Url,
    /// Optional bearer token for the relay.
    pub token: Option<String>,
    /// Sender address on outgoing mail.
    pub sender: EmailAddress,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) mail: Option<MailRelayConfig>,
    pub(crate) feedback_recipient: EmailAddress,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        feedback_recipient: EmailAddress,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            mail: None,
            feedback_recipient,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses database-backed implementations for
    /// the store-facing ports instead of in-memory fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach mail relay settings for real outbound mail.
    #[must_use]
    pub fn with_mail(mut self, mail: MailRelayConfig) -> Self {
        self.mail = Some(mail);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
