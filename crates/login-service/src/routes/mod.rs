use crate::handlers::login_handler::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_routes(state: Arc<AppState>) -> Router {
    Router::new()
        // Login endpoint
        .route("/api/v1/login", post(login_handler::handle_login))
        // Health check
        .route("/health", get(health_check))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
