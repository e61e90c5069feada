//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from the environment (prefix `BLOG_`), a config
//! file, or the command line; absent values fall back in the accessors so
//! a bare `backend` invocation serves fixtures on localhost.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_FEEDBACK_RECIPIENT: &str = "owner@example.org";
const DEFAULT_MAIL_SENDER: &str = "blog@example.org";

/// Configuration values controlling the HTTP server and its collaborators.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BLOG")]
pub struct ServerSettings {
    /// Socket address to bind, `host:port`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; fixtures are served when absent.
    pub database_url: Option<String>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Allow an ephemeral session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Set the `Secure` flag on session cookies.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Mail relay endpoint URL; mail is recorded in memory when absent.
    pub mail_endpoint: Option<String>,
    /// Bearer token for the mail relay.
    pub mail_token: Option<String>,
    /// Sender address on outgoing mail.
    pub mail_sender: Option<String>,
    /// Fixed recipient of contact-form mail.
    pub feedback_recipient: Option<String>,
}

impl ServerSettings {
    /// Configured bind address, falling back to all interfaces on 8080.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Configured session key file, falling back to the secrets mount.
    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Configured mail sender, falling back to the site address.
    #[must_use]
    pub fn mail_sender(&self) -> &str {
        self.mail_sender.as_deref().unwrap_or(DEFAULT_MAIL_SENDER)
    }

    /// Configured feedback recipient, falling back to the owner address.
    #[must_use]
    pub fn feedback_recipient(&self) -> &str {
        self.feedback_recipient
            .as_deref()
            .unwrap_or(DEFAULT_FEEDBACK_RECIPIENT)
    }
}
