mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::{Value, json};

async fn shorten(server: &TestServer, token: &str, body: Value) -> axum_test::TestResponse {
    server
        .post("/api/shorten")
        .add_header("Authorization", common::bearer(token))
        .json(&body)
        .await
}

// ─── SHORTEN ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_shorten_generated_code() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    let response = shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com/page" }),
    )
    .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = json["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert_eq!(json["original_url"], "https://example.com/page");
    assert_eq!(json["short_url"], format!("{}/{}", common::TEST_BASE_URL, code));
    assert_eq!(json["click_count"], 0);
}

#[tokio::test]
async fn test_shorten_custom_code() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    let response = shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com", "custom_code": "my-link" }),
    )
    .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["short_code"], "my-link");
}

#[tokio::test]
async fn test_shorten_custom_code_taken() {
    let server = common::api_server(common::test_pool().await);
    let alice = common::register_and_login(&server, "alice").await;
    let bob = common::register_and_login(&server, "bobby").await;

    shorten(
        &server,
        &alice,
        json!({ "original_url": "https://example.com", "custom_code": "taken" }),
    )
    .await
    .assert_status(StatusCode::CREATED);

    let response = shorten(
        &server,
        &bob,
        json!({ "original_url": "https://example.org", "custom_code": "taken" }),
    )
    .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_shorten_rejects_bad_input() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    shorten(&server, &token, json!({ "original_url": "ftp://example.com" }))
        .await
        .assert_status_bad_request();

    shorten(&server, &token, json!({ "original_url": "not a url" }))
        .await
        .assert_status_bad_request();

    shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com", "custom_code": "a b" }),
    )
    .await
    .assert_status_bad_request();

    shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com", "custom_code": "api" }),
    )
    .await
    .assert_status_bad_request();
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_links_paginated_newest_first() {
    let pool = common::test_pool().await;
    let server = common::api_server(pool.clone());
    let token = common::register_and_login(&server, "alice").await;

    for i in 0..7 {
        shorten(
            &server,
            &token,
            json!({ "original_url": format!("https://example.com/{i}"), "custom_code": format!("code{i}") }),
        )
        .await
        .assert_status(StatusCode::CREATED);
    }

    let response = server
        .get("/api/urls")
        .add_header("Authorization", common::bearer(&token))
        .await;
    response.assert_status_ok();

    let json = response.json::<Value>();
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["short_code"], "code6");
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["per_page"], 5);
    assert_eq!(json["pagination"]["total_items"], 7);
    assert_eq!(json["pagination"]["total_pages"], 2);
    assert_eq!(json["pagination"]["has_next"], true);
    assert_eq!(json["pagination"]["has_prev"], false);

    let response = server
        .get("/api/urls?page=2&limit=5")
        .add_header("Authorization", common::bearer(&token))
        .await;
    let json = response.json::<Value>();
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    assert_eq!(json["pagination"]["has_next"], false);
    assert_eq!(json["pagination"]["has_prev"], true);
}

#[tokio::test]
async fn test_list_links_lenient_paging() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    let response = server
        .get("/api/urls?page=abc&limit=1000")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["per_page"], 10);
    assert_eq!(json["pagination"]["total_items"], 0);
}

#[tokio::test]
async fn test_list_links_recounts_clicks() {
    let pool = common::test_pool().await;
    let server = common::api_server(pool.clone());
    let token = common::register_and_login(&server, "alice").await;

    let created = shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com", "custom_code": "counted" }),
    )
    .await
    .json::<Value>();
    let url_id = created["id"].as_i64().unwrap();

    common::create_test_click(&pool, url_id, Utc::now()).await;
    common::create_test_click(&pool, url_id, Utc::now()).await;

    let json = server
        .get("/api/urls")
        .add_header("Authorization", common::bearer(&token))
        .await
        .json::<Value>();

    assert_eq!(json["items"][0]["click_count"], 2);
}

#[tokio::test]
async fn test_list_links_only_own() {
    let server = common::api_server(common::test_pool().await);
    let alice = common::register_and_login(&server, "alice").await;
    let bob = common::register_and_login(&server, "bobby").await;

    shorten(&server, &alice, json!({ "original_url": "https://example.com" }))
        .await
        .assert_status(StatusCode::CREATED);

    let json = server
        .get("/api/urls")
        .add_header("Authorization", common::bearer(&bob))
        .await
        .json::<Value>();

    assert!(json["items"].as_array().unwrap().is_empty());
}

// ─── STATS ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_for_own_link() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com", "custom_code": "mystats" }),
    )
    .await;

    let response = server
        .get("/api/stats/mystats")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["short_code"], "mystats");
    assert_eq!(json["click_count"], 0);
}

#[tokio::test]
async fn test_stats_hidden_from_other_users() {
    let server = common::api_server(common::test_pool().await);
    let alice = common::register_and_login(&server, "alice").await;
    let bob = common::register_and_login(&server, "bobby").await;

    shorten(
        &server,
        &alice,
        json!({ "original_url": "https://example.com", "custom_code": "private" }),
    )
    .await;

    server
        .get("/api/stats/private")
        .add_header("Authorization", common::bearer(&bob))
        .await
        .assert_status_not_found();
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_link() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    let created = shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com", "custom_code": "before" }),
    )
    .await
    .json::<Value>();
    let id = created["id"].as_i64().unwrap();

    let response = server
        .put(&format!("/api/urls/{id}"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "original_url": "https://example.org/new", "short_code": "after" }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["short_code"], "after");
    assert_eq!(json["original_url"], "https://example.org/new");

    server
        .get("/api/stats/before")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_update_link_keeps_code_when_omitted() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    let created = shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com", "custom_code": "stable" }),
    )
    .await
    .json::<Value>();
    let id = created["id"].as_i64().unwrap();

    let json = server
        .put(&format!("/api/urls/{id}"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "original_url": "https://example.org" }))
        .await
        .json::<Value>();

    assert_eq!(json["short_code"], "stable");
    assert_eq!(json["original_url"], "https://example.org");
}

#[tokio::test]
async fn test_update_link_code_conflict() {
    let server = common::api_server(common::test_pool().await);
    let token = common::register_and_login(&server, "alice").await;

    shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com", "custom_code": "first" }),
    )
    .await;
    let second = shorten(
        &server,
        &token,
        json!({ "original_url": "https://example.com", "custom_code": "second" }),
    )
    .await
    .json::<Value>();
    let id = second["id"].as_i64().unwrap();

    server
        .put(&format!("/api/urls/{id}"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({ "original_url": "https://example.com", "short_code": "first" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_update_link_of_other_user() {
    let server = common::api_server(common::test_pool().await);
    let alice = common::register_and_login(&server, "alice").await;
    let bob = common::register_and_login(&server, "bobby").await;

    let created = shorten(&server, &alice, json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();
    let id = created["id"].as_i64().unwrap();

    server
        .put(&format!("/api/urls/{id}"))
        .add_header("Authorization", common::bearer(&bob))
        .json(&json!({ "original_url": "https://evil.example" }))
        .await
        .assert_status_not_found();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_link_cascades_clicks() {
    let pool = common::test_pool().await;
    let server = common::api_server(pool.clone());
    let token = common::register_and_login(&server, "alice").await;

    let created = shorten(&server, &token, json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();
    let id = created["id"].as_i64().unwrap();
    common::create_test_click(&pool, id, Utc::now()).await;

    let response = server
        .delete(&format!("/api/urls/{id}"))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["message"], "URL deleted successfully");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks WHERE url_id = ?")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    server
        .delete(&format!("/api/urls/{id}"))
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_link_of_other_user() {
    let server = common::api_server(common::test_pool().await);
    let alice = common::register_and_login(&server, "alice").await;
    let bob = common::register_and_login(&server, "bobby").await;

    let created = shorten(&server, &alice, json!({ "original_url": "https://example.com" }))
        .await
        .json::<Value>();
    let id = created["id"].as_i64().unwrap();

    server
        .delete(&format!("/api/urls/{id}"))
        .add_header("Authorization", common::bearer(&bob))
        .await
        .assert_status_not_found();
}
