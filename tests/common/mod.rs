#![allow(dead_code)]

use axum::{Router, middleware};
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use linkpulse::api;
use linkpulse::api::middleware::auth;
use linkpulse::domain::click_event::ClickEvent;
use linkpulse::infrastructure::cache::NullCache;
use linkpulse::state::AppState;
use serde_json::json;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const TEST_JWT_SECRET: &str = "test-signing-secret";
pub const TEST_BASE_URL: &str = "http://sho.rt";

/// Fresh in-memory database with migrations applied.
///
/// A single connection that never expires keeps the in-memory database alive
/// for the whole test.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub fn create_test_state(pool: SqlitePool) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        Arc::new(pool),
        Arc::new(NullCache),
        tx,
        TEST_JWT_SECRET,
        24,
        TEST_BASE_URL,
    );

    (state, rx)
}

/// The `/api` routes with JWT auth but without the per-IP rate limiter,
/// which needs a real peer address.
pub fn api_router(state: AppState) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .nest("/api", api::routes::public_routes().merge(protected))
        .with_state(state)
}

pub fn api_server(pool: SqlitePool) -> TestServer {
    let (state, _rx) = create_test_state(pool);
    TestServer::new(api_router(state)).unwrap()
}

/// Registers and logs in a user through the API, returning the bearer token.
pub async fn register_and_login(server: &TestServer, username: &str) -> String {
    let email = format!("{username}@example.com");

    server
        .post("/api/register")
        .json(&json!({
            "name": username,
            "username": username,
            "email": email,
            "password": "password123",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/login")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;
    response.assert_status_ok();

    response.json::<serde_json::Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn create_test_user(pool: &SqlitePool, username: &str) -> i64 {
    let now = Utc::now().timestamp();
    sqlx::query_scalar(
        "INSERT INTO users (name, username, email, password_hash, created_at, updated_at) \
         VALUES (?, ?, ?, 'not-a-hash', ?, ?) RETURNING id",
    )
    .bind(username)
    .bind(username)
    .bind(format!("{username}@example.com"))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_link(pool: &SqlitePool, user_id: i64, code: &str, url: &str) -> i64 {
    let now = Utc::now().timestamp();
    sqlx::query_scalar(
        "INSERT INTO urls (original_url, short_code, user_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(url)
    .bind(code)
    .bind(user_id)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_click(pool: &SqlitePool, url_id: i64, at: DateTime<Utc>) {
    sqlx::query("INSERT INTO clicks (url_id, clicked_at) VALUES (?, ?)")
        .bind(url_id)
        .bind(at.timestamp())
        .execute(pool)
        .await
        .unwrap();
}

pub async fn user_id_by_username(pool: &SqlitePool, username: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}
