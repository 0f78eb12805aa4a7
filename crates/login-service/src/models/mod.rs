use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Account model (maps to users table).
///
/// The stored password is a cleartext placeholder and must never reach
/// logs; Debug redacts it.
#[derive(Clone, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Login request body. Transient, never persisted.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Issued-token audit record (maps to access_tokens table).
///
/// Created exactly once per successful login, immutable after insert.
#[derive(Debug, Clone, FromRow)]
pub struct AccessToken {
    pub token_id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of credential validation. No partial states.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    Authenticated(User),
    Rejected,
}

/// Success envelope returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: bool,
    pub data: String,
}
