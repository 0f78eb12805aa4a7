//! Persistence of issued-token records.

use crate::errors::AuthError;
use crate::models::{AccessToken, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Record an issued token for an authenticated account.
///
/// Insert failure surfaces as `AuthError::Persistence`; the caller
/// treats the login as failed.
pub async fn create(pool: &PgPool, token: &str, user: &User) -> Result<AccessToken, AuthError> {
    let record = sqlx::query_as::<_, AccessToken>(
        r#"
        INSERT INTO access_tokens (token, user_id, email, role)
        VALUES ($1, $2, $3, $4)
        RETURNING token_id, token, user_id, email, role, created_at
        "#,
    )
    .bind(token)
    .bind(user.user_id)
    .bind(&user.email)
    .bind(&user.role)
    .fetch_one(pool)
    .await
    .map_err(|e| AuthError::Persistence(format!("Failed to record access token: {}", e)))?;

    Ok(record)
}

/// Count recorded tokens for a user.
pub async fn count_for_user(pool: &PgPool, user_id: Uuid) -> Result<i64, AuthError> {
    let count: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM access_tokens
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .map_err(|e| AuthError::Persistence(format!("Failed to count access tokens: {}", e)))?;

    Ok(count.0)
}
