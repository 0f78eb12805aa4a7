//! Account directory for the login flow.
//!
//! This service only reads accounts; registration and password
//! management live outside it.

use crate::errors::AuthError;
use crate::models::User;
use sqlx::PgPool;

/// Look up an account by email, compared case-sensitively as stored.
///
/// Returns `Ok(None)` when no account matches. An infrastructure failure
/// surfaces as `AuthError::Directory` and is never treated as a
/// credential rejection.
pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AuthError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, email, password, role, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| AuthError::Directory(format!("Failed to fetch user by email: {}", e)))?;

    Ok(user)
}
