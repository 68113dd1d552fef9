//! In-Memory Lock Store Tests
//!
//! Exercises the store contract with paused tokio time, so lease expiry
//! is driven deterministically instead of by wall-clock sleeps.

use kvlock_providers::store::InMemoryLockStore;
use kvlock_providers::LockStore;
use std::time::Duration;
use tokio::time;

const LEASE: Duration = Duration::from_millis(5_000);

#[tokio::test(start_paused = true)]
async fn acquire_is_granted_once_per_key() {
    let store = InMemoryLockStore::new();

    assert!(store.acquire("k", "token-a", LEASE).await.unwrap());
    assert!(!store.acquire("k", "token-b", LEASE).await.unwrap());
    // The losing attempt must not have disturbed the record.
    assert_eq!(store.holder("k").await.unwrap().as_deref(), Some("token-a"));
}

#[tokio::test(start_paused = true)]
async fn acquire_reclaims_an_expired_record() {
    let store = InMemoryLockStore::new();

    assert!(store.acquire("k", "token-a", LEASE).await.unwrap());
    time::advance(LEASE + Duration::from_millis(1)).await;

    assert!(store.acquire("k", "token-b", LEASE).await.unwrap());
    assert_eq!(store.holder("k").await.unwrap().as_deref(), Some("token-b"));
}

#[tokio::test(start_paused = true)]
async fn release_requires_the_owning_token() {
    let store = InMemoryLockStore::new();

    assert!(store.acquire("k", "token-a", LEASE).await.unwrap());
    assert!(!store.release("k", "token-b").await.unwrap());
    assert_eq!(store.holder("k").await.unwrap().as_deref(), Some("token-a"));

    assert!(store.release("k", "token-a").await.unwrap());
    assert_eq!(store.holder("k").await.unwrap(), None);
    // Double release reports failure, not an error.
    assert!(!store.release("k", "token-a").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn extend_adds_to_the_remaining_lease() {
    let store = InMemoryLockStore::new();

    assert!(store.acquire("k", "token-a", LEASE).await.unwrap());
    time::advance(Duration::from_millis(1_000)).await;
    assert_eq!(store.remaining_millis("k").await.unwrap(), 4_000);

    assert!(store
        .extend("k", "token-a", Duration::from_millis(2_000))
        .await
        .unwrap());
    assert_eq!(store.remaining_millis("k").await.unwrap(), 6_000);
}

#[tokio::test(start_paused = true)]
async fn extend_is_rejected_for_non_owners_and_missing_records() {
    let store = InMemoryLockStore::new();

    assert!(!store
        .extend("k", "token-a", Duration::from_millis(1_000))
        .await
        .unwrap());

    assert!(store.acquire("k", "token-a", LEASE).await.unwrap());
    assert!(!store
        .extend("k", "token-b", Duration::from_millis(1_000))
        .await
        .unwrap());
    assert_eq!(store.remaining_millis("k").await.unwrap(), 5_000);
}

#[tokio::test(start_paused = true)]
async fn renew_replaces_the_remaining_lease() {
    let store = InMemoryLockStore::new();

    assert!(store.acquire("k", "token-a", LEASE).await.unwrap());
    time::advance(Duration::from_millis(4_500)).await;
    assert_eq!(store.remaining_millis("k").await.unwrap(), 500);

    assert!(store
        .renew("k", "token-a", Duration::from_millis(3_000))
        .await
        .unwrap());
    assert_eq!(store.remaining_millis("k").await.unwrap(), 3_000);
}

#[tokio::test(start_paused = true)]
async fn records_without_expiry_cannot_be_extended_or_renewed() {
    let store = InMemoryLockStore::new();
    store.insert_unexpiring("k", "token-a");

    assert_eq!(store.remaining_millis("k").await.unwrap(), -1);
    assert!(!store
        .extend("k", "token-a", Duration::from_millis(1_000))
        .await
        .unwrap());
    assert!(!store
        .renew("k", "token-a", Duration::from_millis(1_000))
        .await
        .unwrap());
    // The record itself is untouched and still held.
    assert_eq!(store.holder("k").await.unwrap().as_deref(), Some("token-a"));
}

#[tokio::test(start_paused = true)]
async fn expiry_removes_the_record_for_every_operation() {
    let store = InMemoryLockStore::new();

    assert!(store.acquire("k", "token-a", LEASE).await.unwrap());
    time::advance(LEASE + Duration::from_millis(1)).await;

    assert_eq!(store.remaining_millis("k").await.unwrap(), -2);
    assert_eq!(store.holder("k").await.unwrap(), None);
    assert!(!store
        .extend("k", "token-a", Duration::from_millis(1_000))
        .await
        .unwrap());
    assert!(!store
        .renew("k", "token-a", Duration::from_millis(1_000))
        .await
        .unwrap());
    assert!(!store.release("k", "token-a").await.unwrap());
}

#[tokio::test(start_paused = true)]
async fn remaining_millis_uses_pttl_sentinels() {
    let store = InMemoryLockStore::new();

    assert_eq!(store.remaining_millis("absent").await.unwrap(), -2);

    store.insert_unexpiring("forever", "token-a");
    assert_eq!(store.remaining_millis("forever").await.unwrap(), -1);

    assert!(store.acquire("leased", "token-a", LEASE).await.unwrap());
    assert_eq!(store.remaining_millis("leased").await.unwrap(), 5_000);
}

#[tokio::test(start_paused = true)]
async fn keys_are_independent() {
    let store = InMemoryLockStore::new();

    assert!(store.acquire("k1", "token-a", LEASE).await.unwrap());
    assert!(store.acquire("k2", "token-b", LEASE).await.unwrap());

    assert!(store.release("k1", "token-a").await.unwrap());
    assert_eq!(store.holder("k2").await.unwrap().as_deref(), Some("token-b"));
}
