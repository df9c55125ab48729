mod common;

use sqlx::PgPool;
use std::sync::Arc;
use todo_api::AppError;
use todo_api::domain::entities::NewUser;
use todo_api::domain::repositories::{TokenRepository, UserRepository};
use todo_api::infrastructure::persistence::{PgTokenRepository, PgUserRepository};

fn hash(c: char) -> String {
    std::iter::repeat_n(c, 64).collect()
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_create_user_and_find(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));

    let user = repo
        .create(NewUser {
            username: "alice".to_string(),
            password_hash: "phc".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        repo.find_by_username("alice").await.unwrap(),
        Some(user.clone())
    );
    assert_eq!(repo.find_by_id(user.id).await.unwrap(), Some(user));
    assert!(repo.find_by_username("bob").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_username_conflicts(pool: PgPool) {
    let repo = PgUserRepository::new(Arc::new(pool));
    let new_user = NewUser {
        username: "alice".to_string(),
        password_hash: "phc".to_string(),
    };

    repo.create(new_user.clone()).await.unwrap();
    let result = repo.create(new_user).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_token_lifecycle(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo.create_token(user_id, "session", &hash('a')).await.unwrap();
    assert_eq!(token.user_id, user_id);
    assert!(token.last_used_at.is_none());

    assert_eq!(repo.find_user_id(&hash('a')).await.unwrap(), Some(user_id));
    assert_eq!(repo.find_user_id(&hash('b')).await.unwrap(), None);

    repo.update_last_used(&hash('a')).await.unwrap();
    let listed = repo.list_tokens(Some(user_id)).await.unwrap();
    assert!(listed[0].last_used_at.is_some());

    assert!(repo.revoke_by_hash(&hash('a')).await.unwrap());
    assert!(!repo.revoke_by_hash(&hash('a')).await.unwrap());
    assert_eq!(repo.find_user_id(&hash('a')).await.unwrap(), None);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_revoke_token_by_id(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo.create_token(user_id, "ci", &hash('c')).await.unwrap();

    assert!(repo.revoke_token(token.id).await.unwrap());
    assert!(!repo.revoke_token(token.id).await.unwrap());

    let listed = repo.list_tokens(None).await.unwrap();
    assert!(listed[0].revoked_at.is_some());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_token_hash_conflicts(pool: PgPool) {
    let user_id = common::create_test_user(&pool, "alice").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(user_id, "one", &hash('d')).await.unwrap();
    let result = repo.create_token(user_id, "two", &hash('d')).await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}
