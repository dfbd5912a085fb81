//! PostgreSQL tests for the session and user repositories.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL`
//! and applies the crate's migrations.

use chrono::{Duration, Utc};
use filegate_core::session::{NewSession, SessionTokens};
use filegate_core::store::{SessionStore, StoreError, UserStore};
use filegate_core::user::NewUser;
use filegate_db::PgStore;
use sqlx::PgPool;
use uuid::Uuid;

async fn seed_user(store: &PgStore, id: &str) {
    store
        .create_user(&NewUser {
            id: id.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        })
        .await
        .expect("user insert should succeed");
}

fn new_session(user_id: &str, refresh_hash: &str) -> NewSession {
    let now = Utc::now();
    NewSession {
        session_id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        access_token_hash: "a".repeat(64),
        refresh_token_hash: refresh_hash.to_string(),
        access_expires_at: now + Duration::minutes(10),
        refresh_expires_at: now + Duration::days(7),
        device_info: Some("integration-test".to_string()),
        ip_address: Some("127.0.0.1".to_string()),
    }
}

fn tokens(refresh_hash: &str) -> SessionTokens {
    let now = Utc::now();
    SessionTokens {
        access_token_hash: "b".repeat(64),
        refresh_token_hash: refresh_hash.to_string(),
        access_expires_at: now + Duration::minutes(10),
        refresh_expires_at: now + Duration::days(7),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_user_maps_to_duplicate_error(pool: PgPool) {
    let store = PgStore::new(pool);
    seed_user(&store, "a@b.com").await;

    let result = store
        .create_user(&NewUser {
            id: "a@b.com".to_string(),
            password_hash: "other".to_string(),
        })
        .await;

    assert!(matches!(result, Err(StoreError::Duplicate(_))));
}

#[sqlx::test(migrations = "./migrations")]
async fn session_round_trip(pool: PgPool) {
    let store = PgStore::new(pool);
    seed_user(&store, "a@b.com").await;

    let input = new_session("a@b.com", &"1".repeat(64));
    let id = store.create(&input).await.unwrap();
    assert_eq!(id, input.session_id);

    let found = store.find_by_session_id(id).await.unwrap().unwrap();
    assert_eq!(found.user_id, "a@b.com");
    assert!(found.is_active);
    assert_eq!(found.device_info.as_deref(), Some("integration-test"));

    let by_digest = store
        .find_by_refresh_digest(&"1".repeat(64))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_digest.session_id, id);
}

#[sqlx::test(migrations = "./migrations")]
async fn rotate_requires_the_current_refresh_digest(pool: PgPool) {
    let store = PgStore::new(pool);
    seed_user(&store, "a@b.com").await;
    let id = store.create(&new_session("a@b.com", &"1".repeat(64))).await.unwrap();

    assert!(store.rotate(id, &"1".repeat(64), &tokens(&"2".repeat(64))).await.unwrap());
    assert!(!store.rotate(id, &"1".repeat(64), &tokens(&"3".repeat(64))).await.unwrap());

    assert!(store.find_by_refresh_digest(&"1".repeat(64)).await.unwrap().is_none());
    assert!(store.find_by_refresh_digest(&"2".repeat(64)).await.unwrap().is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_is_scoped_to_owner(pool: PgPool) {
    let store = PgStore::new(pool);
    seed_user(&store, "a@b.com").await;
    let id = store.create(&new_session("a@b.com", &"1".repeat(64))).await.unwrap();

    assert!(!store.delete_by_session_id_and_owner(id, "x@y.com").await.unwrap());
    assert!(store.delete_by_session_id_and_owner(id, "a@b.com").await.unwrap());
    assert!(store.find_by_session_id(id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_expired_purges_only_refresh_expired_rows(pool: PgPool) {
    let store = PgStore::new(pool);
    seed_user(&store, "a@b.com").await;
    let live = store.create(&new_session("a@b.com", &"1".repeat(64))).await.unwrap();
    let stale = store.create(&new_session("a@b.com", &"2".repeat(64))).await.unwrap();

    let mut expired = tokens(&"2".repeat(64));
    expired.refresh_expires_at = Utc::now() - Duration::minutes(1);
    assert!(store.update(stale, &expired).await.unwrap());

    assert_eq!(store.delete_expired().await.unwrap(), 1);
    assert!(store.find_by_session_id(live).await.unwrap().is_some());
    assert!(store.find_by_session_id(stale).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn health_check_succeeds(pool: PgPool) {
    filegate_db::health_check(&pool).await.unwrap();
}
