//! Blog server entry point: loads settings, wires adapters, serves pages.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use backend::domain::EmailAddress;
use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::server::{MailRelayConfig, ServerConfig, ServerSettings, create_server};

/// Short digest of the key material for startup logs; never the key itself.
fn key_fingerprint(material: &[u8]) -> String {
    hex::encode(Sha256::digest(material))
        .chars()
        .take(12)
        .collect()
}

fn load_session_key(settings: &ServerSettings) -> color_eyre::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) => {
            info!(fingerprint = %key_fingerprint(&bytes), "session key loaded");
            Ok(Key::derive_from(&bytes))
        }
        Err(err) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(
                    path = %key_path.display(),
                    error = %err,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(color_eyre::eyre::eyre!(
                    "failed to read session key at {}: {err}",
                    key_path.display()
                ))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load_from_iter(env::args_os()).wrap_err("failed to load settings")?;
    let bind_addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .wrap_err("invalid bind address")?;
    let key = load_session_key(&settings)?;
    let feedback_recipient = EmailAddress::new(settings.feedback_recipient())
        .wrap_err("invalid feedback recipient")?;

    let mut config = ServerConfig::new(
        key,
        settings.cookie_secure,
        SameSite::Lax,
        bind_addr,
        feedback_recipient,
    );

    if let Some(database_url) = &settings.database_url {
        run_pending_migrations(database_url)
            .await
            .wrap_err("failed to apply migrations")?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .wrap_err("failed to build the connection pool")?;
        config = config.with_db_pool(pool);
    }

    if let Some(endpoint) = &settings.mail_endpoint {
        let endpoint = Url::parse(endpoint).wrap_err("invalid mail endpoint")?;
        let sender =
            EmailAddress::new(settings.mail_sender()).wrap_err("invalid mail sender")?;
        config = config.with_mail(MailRelayConfig {
            endpoint,
            token: settings.mail_token.clone(),
            sender,
        });
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await.wrap_err("server terminated abnormally")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for bootstrap helpers.
    use super::*;
    use std::io::Write;

    fn settings_with_key_file(path: Option<std::path::PathBuf>) -> ServerSettings {
        ServerSettings {
            bind_addr: None,
            database_url: None,
            session_key_file: path,
            session_allow_ephemeral: true,
            cookie_secure: true,
            mail_endpoint: None,
            mail_token: None,
            mail_sender: None,
            feedback_recipient: None,
        }
    }

    #[test]
    fn fingerprint_is_short_and_stable() {
        let first = key_fingerprint(b"key material");
        let second = key_fingerprint(b"key material");
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
        assert_ne!(first, key_fingerprint(b"other material"));
    }

    #[test]
    fn key_is_derived_from_the_configured_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp key file");
        file.write_all(&[7_u8; 64]).expect("write key material");

        let settings = settings_with_key_file(Some(file.path().to_path_buf()));
        let key = load_session_key(&settings).expect("key loads");
        let again = load_session_key(&settings).expect("key loads again");
        assert_eq!(key.master(), again.master());
    }

    #[test]
    fn missing_file_falls_back_to_an_ephemeral_key() {
        let settings = settings_with_key_file(Some(std::path::PathBuf::from(
            "/nonexistent/session_key",
        )));
        let key = load_session_key(&settings).expect("ephemeral fallback");
        let other = load_session_key(&settings).expect("ephemeral fallback");
        // Generated keys are fresh per invocation.
        assert_ne!(key.master(), other.master());
    }
}
