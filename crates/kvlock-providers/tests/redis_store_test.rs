//! Redis Lock Store Tests
//!
//! Note: These tests require a Redis server to be running on
//! localhost:6379 and are ignored by default.

#![cfg(feature = "store-redis")]

use kvlock_providers::store::RedisLockStore;
use kvlock_providers::LockStore;
use std::time::Duration;
use uuid::Uuid;

const LEASE: Duration = Duration::from_millis(5_000);

fn test_key() -> String {
    format!("kvlock:test:{}", Uuid::new_v4())
}

fn store() -> RedisLockStore {
    RedisLockStore::with_host_port("localhost", 6379).unwrap()
}

#[test]
fn store_creation_validates_the_url() {
    assert!(RedisLockStore::from_url("redis://localhost:6379").is_ok());
    assert!(RedisLockStore::from_url("invalid://url").is_err());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn ping_and_preload_round_trip() {
    let store = store();
    store.ping().await.unwrap();
    store.preload().await.unwrap();
    // Preload is idempotent; a second registration is a no-op.
    store.preload().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn acquire_is_granted_once_per_key() {
    let store = store();
    let key = test_key();

    assert!(store.acquire(&key, "token-a", LEASE).await.unwrap());
    assert!(!store.acquire(&key, "token-b", LEASE).await.unwrap());
    assert_eq!(store.holder(&key).await.unwrap().as_deref(), Some("token-a"));

    store.release(&key, "token-a").await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn acquire_sets_the_lease_atomically() {
    let store = store();
    let key = test_key();

    assert!(store.acquire(&key, "token-a", LEASE).await.unwrap());
    let remaining = store.remaining_millis(&key).await.unwrap();
    // Never observable as "locked with no expiry".
    assert!(remaining > 0, "expected a finite lease, got {remaining}");
    assert!(remaining <= 5_000);

    store.release(&key, "token-a").await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn extend_adds_to_the_remaining_lease() {
    let store = store();
    let key = test_key();

    assert!(store.acquire(&key, "token-a", LEASE).await.unwrap());
    assert!(store
        .extend(&key, "token-a", Duration::from_millis(2_000))
        .await
        .unwrap());

    let remaining = store.remaining_millis(&key).await.unwrap();
    // Allow round-trip slack below, none above.
    assert!(remaining > 6_000, "expected ~7000ms, got {remaining}");
    assert!(remaining <= 7_000);

    store.release(&key, "token-a").await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn renew_replaces_the_remaining_lease() {
    let store = store();
    let key = test_key();

    assert!(store
        .acquire(&key, "token-a", Duration::from_millis(10_000))
        .await
        .unwrap());
    assert!(store
        .renew(&key, "token-a", Duration::from_millis(3_000))
        .await
        .unwrap());

    let remaining = store.remaining_millis(&key).await.unwrap();
    assert!(remaining > 2_000, "expected ~3000ms, got {remaining}");
    assert!(remaining <= 3_000);

    store.release(&key, "token-a").await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn ownership_gating_rejects_foreign_tokens() {
    let store = store();
    let key = test_key();

    assert!(store.acquire(&key, "token-a", LEASE).await.unwrap());

    assert!(!store
        .extend(&key, "token-b", Duration::from_millis(1_000))
        .await
        .unwrap());
    assert!(!store
        .renew(&key, "token-b", Duration::from_millis(1_000))
        .await
        .unwrap());
    assert!(!store.release(&key, "token-b").await.unwrap());
    assert_eq!(store.holder(&key).await.unwrap().as_deref(), Some("token-a"));

    store.release(&key, "token-a").await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn records_without_expiry_cannot_be_extended_or_renewed() {
    let store = store();
    let key = test_key();

    // Plant a record with no expiry, outside the lock protocol.
    let client = redis::Client::open("redis://localhost:6379").unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    redis::cmd("SET")
        .arg(&key)
        .arg("token-a")
        .query_async::<()>(&mut conn)
        .await
        .unwrap();

    assert_eq!(store.remaining_millis(&key).await.unwrap(), -1);
    assert!(!store
        .extend(&key, "token-a", Duration::from_millis(1_000))
        .await
        .unwrap());
    assert!(!store
        .renew(&key, "token-a", Duration::from_millis(1_000))
        .await
        .unwrap());

    redis::cmd("DEL")
        .arg(&key)
        .query_async::<()>(&mut conn)
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn lease_scenario_round_trip() {
    // A acquires, B is refused, A extends then releases, B acquires.
    let store = store();
    let key = test_key();

    assert!(store.acquire(&key, "token-a", LEASE).await.unwrap());
    assert!(!store.acquire(&key, "token-b", LEASE).await.unwrap());

    assert!(store
        .extend(&key, "token-a", Duration::from_millis(2_000))
        .await
        .unwrap());
    let remaining = store.remaining_millis(&key).await.unwrap();
    assert!(remaining > 6_000, "expected ~7000ms, got {remaining}");

    assert!(store.release(&key, "token-a").await.unwrap());
    assert_eq!(store.remaining_millis(&key).await.unwrap(), -2);

    assert!(store.acquire(&key, "token-b", LEASE).await.unwrap());
    store.release(&key, "token-b").await.unwrap();
}
