//! End-to-end login tests over the assembled router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use http_body_util::BodyExt;
use login_service::config::Config;
use login_service::handlers::login_handler::AppState;
use login_service::routes;
use secrecy::SecretString;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const TEST_SECRET: &str = "test-signing-secret";

fn test_app(pool: PgPool) -> Router {
    let config = Config {
        database_url: "postgresql://unused-in-tests".to_string(),
        bind_address: "127.0.0.1:0".to_string(),
        signing_secret: SecretString::from(TEST_SECRET),
    };

    routes::build_routes(Arc::new(AppState { pool, config }))
}

async fn create_user(pool: &PgPool, email: &str, password: &str, role: &str) -> Uuid {
    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (email, password, role)
        VALUES ($1, $2, $3)
        RETURNING user_id
        "#,
    )
    .bind(email)
    .bind(password)
    .bind(role)
    .fetch_one(pool)
    .await
    .expect("Should create user");

    row.0
}

async fn post_login(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("Should build request"),
        )
        .await
        .expect("Should get response");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Should read body")
        .to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("Body should be JSON");

    (status, body)
}

/// Decode the payload segment of a compact JWT without verifying it.
fn decode_claims(token: &str) -> Value {
    let parts: Vec<_> = token.split('.').collect();
    assert_eq!(
        parts.len(),
        3,
        "JWT must have 3 parts (header.payload.signature), got {}",
        parts.len()
    );

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .expect("Should base64 decode JWT payload");

    serde_json::from_slice(&payload).expect("Payload should be JSON")
}

async fn count_tokens(pool: &PgPool) -> i64 {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM access_tokens")
        .fetch_one(pool)
        .await
        .expect("Should count tokens");

    count.0
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_login_success(pool: PgPool) {
    let user_id = create_user(&pool, "a@x.com", "secret", "user").await;

    let (status, body) = post_login(
        test_app(pool.clone()),
        json!({"email": "a@x.com", "password": "secret"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!(true));

    let token = body["data"].as_str().expect("data should be the token");
    let claims = decode_claims(token);
    assert_eq!(claims["email"], json!("a@x.com"));

    // Exactly one record, correlated with the authenticated account.
    let record: (Uuid, String, String, String) = sqlx::query_as(
        r#"
        SELECT user_id, token, email, role
        FROM access_tokens
        "#,
    )
    .fetch_one(&pool)
    .await
    .expect("Exactly one token should be recorded");

    assert_eq!(record.0, user_id);
    assert_eq!(record.1, token);
    assert_eq!(record.2, "a@x.com");
    assert_eq!(record.3, "user");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_login_unknown_email_rejected(pool: PgPool) {
    let (status, body) = post_login(
        test_app(pool.clone()),
        json!({"email": "missing@x.com", "password": "whatever"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], json!(false));
    assert_eq!(body["message"], json!("Invalid credentials"));

    assert_eq!(count_tokens(&pool).await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_login_wrong_password_rejected(pool: PgPool) {
    create_user(&pool, "a@x.com", "secret", "user").await;

    let (status, body) = post_login(
        test_app(pool.clone()),
        json!({"email": "a@x.com", "password": "not-the-secret"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], json!(false));

    assert_eq!(count_tokens(&pool).await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_login_email_is_case_sensitive(pool: PgPool) {
    create_user(&pool, "a@x.com", "secret", "user").await;

    let (status, _) = post_login(
        test_app(pool.clone()),
        json!({"email": "A@X.com", "password": "secret"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(count_tokens(&pool).await, 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_repeated_logins_record_one_row_each(pool: PgPool) {
    create_user(&pool, "a@x.com", "secret", "user").await;

    let (first_status, _) = post_login(
        test_app(pool.clone()),
        json!({"email": "a@x.com", "password": "secret"}),
    )
    .await;
    let (second_status, _) = post_login(
        test_app(pool.clone()),
        json!({"email": "a@x.com", "password": "secret"}),
    )
    .await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(count_tokens(&pool).await, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_health_check(pool: PgPool) {
    let response = test_app(pool)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("Should build request"),
        )
        .await
        .expect("Should get response");

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Should read body")
        .to_bytes();
    assert_eq!(&bytes[..], b"OK");
}
