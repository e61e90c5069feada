//! Driving port for account registration and credential verification.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! create accounts and check credentials without importing the backing
//! infrastructure, keeping handler tests deterministic.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::account::{NewAccount, Username};
use crate::domain::forms::SignInCredentials;

use super::define_port_error;

define_port_error! {
    /// Errors raised by account service adapters.
    pub enum AccountError {
        /// The requested username is already registered.
        UsernameTaken => "A user with that username already exists.",
        /// The username/password pair does not name an account.
        InvalidCredentials => "Please enter a correct username and password.",
        /// The backing store failed.
        Store { message: String } => "account store failed: {message}",
    }
}

/// Account registration and credential verification.
///
/// The store enforces username uniqueness; two concurrent signups racing
/// for one name resolve to a single winner and one [`AccountError::UsernameTaken`].
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account, returning the registered username.
    async fn register(&self, account: &NewAccount) -> Result<Username, AccountError>;

    /// Verify credentials, returning the authenticated username.
    async fn verify_credentials(
        &self,
        credentials: &SignInCredentials,
    ) -> Result<Username, AccountError>;
}

#[derive(Debug, Clone)]
struct StoredAccount {
    email: String,
    password: String,
}

/// In-memory account service used by tests and database-less deployments.
///
/// Passwords are compared in plain text; digesting is a production adapter
/// concern.
#[derive(Debug, Default)]
pub struct FixtureAccountService {
    accounts: Mutex<BTreeMap<String, StoredAccount>>,
}

impl FixtureAccountService {
    /// Build a fixture with one pre-registered account.
    #[must_use]
    pub fn with_account(username: &Username, password: &str) -> Self {
        let service = Self::default();
        if let Ok(mut accounts) = service.accounts.lock() {
            accounts.insert(
                username.as_ref().to_owned(),
                StoredAccount {
                    email: format!("{username}@example.org"),
                    password: password.to_owned(),
                },
            );
        }
        service
    }

    /// Whether a username is registered, for test assertions.
    #[must_use]
    pub fn has_account(&self, username: &str) -> bool {
        self.accounts
            .lock()
            .map_or(false, |accounts| accounts.contains_key(username))
    }

    /// Email recorded for a registered username, for test assertions.
    #[must_use]
    pub fn registered_email(&self, username: &str) -> Option<String> {
        self.accounts.lock().ok().and_then(|accounts| {
            accounts
                .get(username)
                .map(|account| account.email.clone())
        })
    }
}

#[async_trait]
impl AccountService for FixtureAccountService {
    async fn register(&self, account: &NewAccount) -> Result<Username, AccountError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(|_| AccountError::store("account fixture lock poisoned"))?;
        let key = account.username().as_ref().to_owned();
        if accounts.contains_key(&key) {
            return Err(AccountError::username_taken());
        }
        accounts.insert(
            key,
            StoredAccount {
                email: account.email().as_ref().to_owned(),
                password: account.password().expose().to_owned(),
            },
        );
        Ok(account.username().clone())
    }

    async fn verify_credentials(
        &self,
        credentials: &SignInCredentials,
    ) -> Result<Username, AccountError> {
        let accounts = self
            .accounts
            .lock()
            .map_err(|_| AccountError::store("account fixture lock poisoned"))?;
        let stored = accounts
            .get(credentials.username())
            .ok_or_else(AccountError::invalid_credentials)?;
        if stored.password != credentials.password() {
            return Err(AccountError::invalid_credentials());
        }
        Username::new(credentials.username())
            .map_err(|err| AccountError::store(format!("stored username is invalid: {err}")))
    }
}
