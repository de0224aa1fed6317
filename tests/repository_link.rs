mod common;

use linkpulse::AppError;
use linkpulse::domain::entities::{LinkPatch, NewLink};
use linkpulse::domain::repositories::LinkRepository;
use linkpulse::infrastructure::persistence::SqliteLinkRepository;
use std::sync::Arc;

fn new_link(user_id: i64, code: &str) -> NewLink {
    NewLink {
        short_code: code.to_string(),
        original_url: "https://example.com".to_string(),
        user_id,
    }
}

#[tokio::test]
async fn test_create_link() {
    let pool = common::test_pool().await;
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    let link = repo.create(new_link(user_id, "test123")).await.unwrap();

    assert_eq!(link.short_code, "test123");
    assert_eq!(link.original_url, "https://example.com");
    assert_eq!(link.user_id, user_id);
    assert_eq!(link.click_count, 0);
}

#[tokio::test]
async fn test_create_duplicate_code_conflicts() {
    let pool = common::test_pool().await;
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    repo.create(new_link(user_id, "dup123")).await.unwrap();
    let result = repo.create(new_link(user_id, "dup123")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[tokio::test]
async fn test_find_by_code() {
    let pool = common::test_pool().await;
    let user_id = common::create_test_user(&pool, "alice").await;
    common::create_test_link(&pool, user_id, "abc123", "https://example.com").await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    let link = repo.find_by_code("abc123").await.unwrap();
    assert_eq!(link.unwrap().short_code, "abc123");

    assert!(repo.find_by_code("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_user_and_code_respects_owner() {
    let pool = common::test_pool().await;
    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bobby").await;
    common::create_test_link(&pool, alice, "owned1", "https://example.com").await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    assert!(
        repo.find_by_user_and_code(alice, "owned1")
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        repo.find_by_user_and_code(bob, "owned1")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_list_and_count_by_user() {
    let pool = common::test_pool().await;
    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bobby").await;
    for i in 0..4 {
        common::create_test_link(&pool, alice, &format!("alice{i}"), "https://example.com").await;
    }
    common::create_test_link(&pool, bob, "bobs01", "https://example.com").await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    let page = repo.list_by_user(alice, 3, 0).await.unwrap();
    assert_eq!(page.len(), 3);
    assert_eq!(page[0].short_code, "alice3");

    let rest = repo.list_by_user(alice, 3, 3).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].short_code, "alice0");

    assert_eq!(repo.count_by_user(alice).await.unwrap(), 4);
    assert_eq!(repo.find_by_user(bob).await.unwrap().len(), 1);
    assert_eq!(repo.count_all().await.unwrap(), 5);
}

#[tokio::test]
async fn test_update_link() {
    let pool = common::test_pool().await;
    let user_id = common::create_test_user(&pool, "alice").await;
    let id = common::create_test_link(&pool, user_id, "old123", "https://example.com").await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    let updated = repo
        .update(
            id,
            LinkPatch {
                original_url: "https://example.org".to_string(),
                short_code: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.short_code, "old123");
    assert_eq!(updated.original_url, "https://example.org");

    let updated = repo
        .update(
            id,
            LinkPatch {
                original_url: "https://example.org".to_string(),
                short_code: Some("new123".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.short_code, "new123");
}

#[tokio::test]
async fn test_update_missing_link() {
    let pool = common::test_pool().await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    let result = repo
        .update(
            999,
            LinkPatch {
                original_url: "https://example.org".to_string(),
                short_code: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_and_increment() {
    let pool = common::test_pool().await;
    let user_id = common::create_test_user(&pool, "alice").await;
    let id = common::create_test_link(&pool, user_id, "del123", "https://example.com").await;
    let repo = SqliteLinkRepository::new(Arc::new(pool));

    repo.increment_click_count(id).await.unwrap();
    repo.increment_click_count(id).await.unwrap();
    assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().click_count, 2);

    assert!(repo.delete(id).await.unwrap());
    assert!(!repo.delete(id).await.unwrap());
    assert!(repo.find_by_id(id).await.unwrap().is_none());
}
