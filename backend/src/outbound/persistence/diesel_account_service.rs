//! Diesel-backed `AccountService` adapter.
//!
//! Credentials are stored as a per-account salt plus a SHA-256 digest of
//! salt and password. Username uniqueness rides on the column's unique
//! constraint, so racing signups resolve in the database.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::account::{NewAccount, Username};
use crate::domain::forms::SignInCredentials;
use crate::domain::ports::{AccountError, AccountService};

use super::models::NewUserRow;
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed account service.
#[derive(Clone)]
pub struct DieselAccountService {
    pool: DbPool,
}

impl DieselAccountService {
    /// Create a new adapter over the shared pool.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn connection_error(err: &super::pool::PoolError) -> AccountError {
    AccountError::store(format!("connection failed: {err}"))
}

fn registration_error(err: &DieselError) -> AccountError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AccountError::username_taken()
        }
        other => AccountError::store(other.to_string()),
    }
}

/// Hex-encoded SHA-256 digest of salt and password.
pub(super) fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl AccountService for DieselAccountService {
    async fn register(&self, account: &NewAccount) -> Result<Username, AccountError> {
        let salt = Uuid::new_v4().simple().to_string();
        let row = NewUserRow {
            id: Uuid::new_v4(),
            username: account.username().as_ref().to_owned(),
            email: account.email().as_ref().to_owned(),
            password_digest: digest_password(&salt, account.password().expose()),
            password_salt: salt,
        };

        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| registration_error(&err))?;

        Ok(account.username().clone())
    }

    async fn verify_credentials(
        &self,
        credentials: &SignInCredentials,
    ) -> Result<Username, AccountError> {
        let mut conn = self.pool.get().await.map_err(|err| connection_error(&err))?;
        let stored: Option<(String, String)> = users::table
            .filter(users::username.eq(credentials.username()))
            .select((users::password_salt, users::password_digest))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| AccountError::store(err.to_string()))?;

        let (salt, digest) = stored.ok_or_else(AccountError::invalid_credentials)?;
        if digest_password(&salt, credentials.password()) != digest {
            return Err(AccountError::invalid_credentials());
        }

        Username::new(credentials.username())
            .map_err(|err| AccountError::store(format!("stored username is invalid: {err}")))
    }
}
