mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let server = common::api_server(common::test_pool().await);

    let response = server
        .post("/api/register")
        .json(&json!({
            "name": "Alice",
            "username": "alice",
            "email": "Alice@Example.com",
            "password": "password123",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["username"], "alice");
    assert_eq!(json["email"], "alice@example.com");
    assert!(json.get("password_hash").is_none());
    assert!(json.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = common::api_server(common::test_pool().await);
    common::register_and_login(&server, "alice").await;

    let response = server
        .post("/api/register")
        .json(&json!({
            "name": "Other",
            "username": "other",
            "email": "alice@example.com",
            "password": "password123",
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<serde_json::Value>()["error"]["code"], "conflict");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = common::api_server(common::test_pool().await);
    common::register_and_login(&server, "alice").await;

    let response = server
        .post("/api/register")
        .json(&json!({
            "name": "Alice Two",
            "username": "alice",
            "email": "alice2@example.com",
            "password": "password123",
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validation_error() {
    let server = common::api_server(common::test_pool().await);

    let response = server
        .post("/api/register")
        .json(&json!({
            "name": "Alice",
            "username": "al",
            "email": "not-an-email",
            "password": "123",
        }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let server = common::api_server(common::test_pool().await);
    common::register_and_login(&server, "alice").await;

    let response = server
        .post("/api/login")
        .json(&json!({ "email": "alice@example.com", "password": "password123" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert!(json["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["user"]["username"], "alice");
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_look_the_same() {
    let server = common::api_server(common::test_pool().await);
    common::register_and_login(&server, "alice").await;

    let wrong_password = server
        .post("/api/login")
        .json(&json!({ "email": "alice@example.com", "password": "wrong-password" }))
        .await;
    wrong_password.assert_status_unauthorized();

    let unknown_email = server
        .post("/api/login")
        .json(&json!({ "email": "nobody@example.com", "password": "password123" }))
        .await;
    unknown_email.assert_status_unauthorized();

    assert_eq!(
        wrong_password.json::<serde_json::Value>()["error"]["message"],
        unknown_email.json::<serde_json::Value>()["error"]["message"]
    );
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    let server = common::api_server(common::test_pool().await);

    let response = server.get("/api/urls").await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_protected_route_rejects_garbage_token() {
    let server = common::api_server(common::test_pool().await);

    let response = server
        .get("/api/urls")
        .add_header("Authorization", "Bearer not.a.jwt")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_change_password() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    server
        .post("/api/change-password")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "current_password": "password123", "new_password": "newpassword456" }))
        .await
        .assert_status_ok();

    server
        .post("/api/login")
        .json(&json!({ "email": "alice@example.com", "password": "password123" }))
        .await
        .assert_status_unauthorized();

    server
        .post("/api/login")
        .json(&json!({ "email": "alice@example.com", "password": "newpassword456" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_change_password_wrong_current() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    let response = server
        .post("/api/change-password")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "current_password": "not-it", "new_password": "newpassword456" }))
        .await;

    response.assert_status_bad_request();
}
