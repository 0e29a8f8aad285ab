//! Integration tests for the in-memory SQLite store lifecycle.
//!
//! Tests verify that:
//! - The first acquisition creates the store and later ones attach to it
//! - Pool sizing is forced to one connection during creation, then relaxed
//! - Concurrent first callers all get working connections
//! - Closing drops the store and is idempotent

use db_provider::config::NORMAL_MAX_POOL_SIZE;
use db_provider::db::{ConnectionPool, ConnectionProvider};
use db_provider::models::{BackendKind, DbProperties, PoolSizing};
use std::sync::Arc;

fn memory_provider(name: &str) -> ConnectionProvider {
    let props = DbProperties::default_for(BackendKind::SqliteMemory, name);
    ConnectionProvider::new(BackendKind::SqliteMemory, props).unwrap()
}

async fn table_count(provider: &ConnectionProvider) -> i64 {
    let mut conn = provider.acquire().await.unwrap();
    let sqlite = conn.as_sqlite_mut().expect("Expected SQLite connection");
    sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'")
        .fetch_one(&mut **sqlite)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_first_acquire_creates_usable_store() {
    let provider = memory_provider("lifecycle_create");
    assert!(!provider.is_open());

    let mut conn = provider.acquire().await.unwrap();
    assert!(provider.is_open());
    let sqlite = conn.as_sqlite_mut().unwrap();
    sqlx::query("CREATE TABLE players (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
        .execute(&mut **sqlite)
        .await
        .expect("CREATE TABLE should work");
    sqlx::query("INSERT INTO players (id, name) VALUES (1, 'alice')")
        .execute(&mut **sqlite)
        .await
        .expect("INSERT should work");
    drop(conn);

    // A second connection attaches to the same store.
    let mut other = provider.acquire().await.unwrap();
    let name: String = sqlx::query_scalar("SELECT name FROM players WHERE id = 1")
        .fetch_one(&mut **other.as_sqlite_mut().unwrap())
        .await
        .unwrap();
    assert_eq!(name, "alice");
    drop(other);

    provider.close().await.unwrap();
}

#[tokio::test]
async fn test_bootstrap_restores_uri_and_relaxes_sizing() {
    let provider = memory_provider("lifecycle_sizing");
    let conn = provider.acquire().await.unwrap();

    assert_eq!(provider.pool().target_uri(), provider.uri());
    assert_eq!(
        provider.sizing(),
        PoolSizing {
            min: 1,
            max: NORMAL_MAX_POOL_SIZE,
            initial: 1,
        }
    );

    drop(conn);
    provider.close().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_acquires() {
    let provider = Arc::new(memory_provider("lifecycle_concurrent"));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move {
                let mut conn = provider.acquire().await?;
                conn.ping().await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert!(provider.is_open());
    assert_eq!(provider.sizing().max, NORMAL_MAX_POOL_SIZE);
    provider.close().await.unwrap();
}

#[tokio::test]
async fn test_close_drops_store() {
    let provider = memory_provider("lifecycle_drop");
    let mut conn = provider.acquire().await.unwrap();
    sqlx::query("CREATE TABLE scores (id INTEGER PRIMARY KEY, value INTEGER)")
        .execute(&mut **conn.as_sqlite_mut().unwrap())
        .await
        .unwrap();
    drop(conn);
    assert_eq!(table_count(&provider).await, 1);

    provider.close().await.unwrap();
    assert!(!provider.is_open());

    // The same store name starts out empty again.
    let fresh = memory_provider("lifecycle_drop");
    assert_eq!(table_count(&fresh).await, 0);
    fresh.close().await.unwrap();
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let never_opened = memory_provider("lifecycle_never_opened");
    never_opened.close().await.unwrap();
    never_opened.close().await.unwrap();
    assert!(!never_opened.is_open());

    let provider = memory_provider("lifecycle_close_twice");
    drop(provider.acquire().await.unwrap());
    provider.close().await.unwrap();
    provider.close().await.unwrap();
    assert!(!provider.is_open());
}

#[tokio::test]
async fn test_acquire_after_close_fails() {
    let provider = memory_provider("lifecycle_after_close");
    drop(provider.acquire().await.unwrap());
    provider.close().await.unwrap();

    let result = provider.acquire().await;
    assert!(result.is_err());
    assert!(!provider.is_open());
}
