mod common;

use linkpulse::AppError;
use linkpulse::domain::entities::NewUser;
use linkpulse::domain::repositories::UserRepository;
use linkpulse::infrastructure::persistence::SqliteUserRepository;
use std::sync::Arc;

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        name: "Test User".to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "hash".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find_user() {
    let repo = SqliteUserRepository::new(Arc::new(common::test_pool().await));

    let user = repo
        .create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();

    let by_email = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    let by_username = repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(by_username.email, "alice@example.com");

    assert!(repo.find_by_id(user.id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let repo = SqliteUserRepository::new(Arc::new(common::test_pool().await));

    repo.create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();
    let result = repo.create(new_user("other", "alice@example.com")).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[tokio::test]
async fn test_update_password() {
    let repo = SqliteUserRepository::new(Arc::new(common::test_pool().await));
    let user = repo
        .create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();

    repo.update_password(user.id, "new-hash").await.unwrap();
    let user = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(user.password_hash, "new-hash");

    let result = repo.update_password(999, "x").await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_list_and_count() {
    let repo = SqliteUserRepository::new(Arc::new(common::test_pool().await));
    repo.create(new_user("alice", "alice@example.com"))
        .await
        .unwrap();
    repo.create(new_user("bobby", "bobby@example.com"))
        .await
        .unwrap();

    let users = repo.list().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "alice");
    assert_eq!(repo.count().await.unwrap(), 2);
}
