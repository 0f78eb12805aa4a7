//! Login decision pipeline.
//!
//! A login validates the submitted credentials against the account
//! directory, signs a session token for the authenticated identity, and
//! records the issued token before returning it to the caller.

use crate::crypto;
use crate::errors::AuthError;
use crate::models::{AuthOutcome, Credentials};
use crate::repositories::{access_tokens, users};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

/// Compared when no account matches, so a directory miss costs about the
/// same as a password mismatch.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

/// Check a submitted credential pair against the account directory.
///
/// A missing account and a wrong password both come back as
/// `AuthOutcome::Rejected`; only a directory failure surfaces as an
/// error. No side effects.
pub async fn validate_credentials(
    pool: &PgPool,
    credentials: &Credentials,
) -> Result<AuthOutcome, AuthError> {
    let user = users::get_by_email(pool, &credentials.email).await?;

    // Always run the comparison, against a dummy value on a miss.
    let stored = user.as_ref().map_or(DUMMY_PASSWORD, |u| u.password.as_str());
    let is_match = crypto::passwords_match(&credentials.password, stored);

    match user {
        Some(user) if is_match => Ok(AuthOutcome::Authenticated(user)),
        _ => Ok(AuthOutcome::Rejected),
    }
}

/// Authenticate `credentials` and return the signed session token.
///
/// The account fetched during validation is reused for the issued-token
/// record, so the directory is consulted exactly once per call. The
/// record insert is part of the login: if it fails, the login fails and
/// no success is reported.
pub async fn login(
    pool: &PgPool,
    signing_secret: &SecretString,
    credentials: &Credentials,
) -> Result<String, AuthError> {
    // A misconfigured service must never report credential failures, so
    // the secret is checked before the directory is consulted.
    if signing_secret.expose_secret().is_empty() {
        return Err(AuthError::Configuration(
            "signing secret is empty".to_string(),
        ));
    }

    let user = match validate_credentials(pool, credentials).await? {
        AuthOutcome::Authenticated(user) => user,
        AuthOutcome::Rejected => {
            tracing::info!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let token = crypto::sign_token(&user.email, Utc::now().timestamp(), signing_secret)?;

    let record = access_tokens::create(pool, &token, &user).await?;

    tracing::info!(user_id = %record.user_id, "Access token issued and recorded");

    Ok(token)
}
