use crate::config::Config;
use crate::errors::AuthError;
use crate::models::{Credentials, LoginResponse};
use crate::services::login_service;
use axum::{extract::State, Json};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}

/// Handle a login request
///
/// POST /api/v1/login
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, AuthError> {
    let token =
        login_service::login(&state.pool, &state.config.signing_secret, &credentials).await?;

    Ok(Json(LoginResponse {
        status: true,
        data: token,
    }))
}
