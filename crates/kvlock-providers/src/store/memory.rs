//! In-memory lock store
//!
//! Single-process [`LockStore`] implementation over a concurrent map.
//! Each operation body runs while holding the map's per-key entry
//! guard, which makes the multi-step bodies indivisible the same way
//! the Lua scripts are on Redis.
//!
//! Leases use [`tokio::time::Instant`], so tests driving the clock with
//! paused tokio time see expirations deterministically. Expired records
//! are dropped lazily when an operation touches their key; nothing
//! sweeps in the background.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use kvlock_domain::constants::{PTTL_MISSING, PTTL_NO_EXPIRY};
use kvlock_domain::error::Result;
use kvlock_domain::ports::LockStore;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct LockRecord {
    token: String,
    deadline: Option<Instant>,
}

impl LockRecord {
    fn leased(token: &str, ttl: Duration) -> Self {
        Self {
            token: token.to_string(),
            deadline: Some(Instant::now() + ttl),
        }
    }

    fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= Instant::now())
    }
}

/// In-memory lock store
///
/// Coordinates tasks within one process. Also the test double for the
/// protocol: it mirrors the Redis backend's observable behavior,
/// including the PTTL sentinels and the rejection of records without a
/// finite lease.
#[derive(Debug, Default)]
pub struct InMemoryLockStore {
    records: DashMap<String, LockRecord>,
}

impl InMemoryLockStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Plant a record with no expiry
    ///
    /// Produces the "locked with no active lease" state that extend and
    /// renew must reject. Test support; there is no protocol operation
    /// that creates this state.
    pub fn insert_unexpiring<K: Into<String>, T: Into<String>>(&self, key: K, token: T) {
        self.records.insert(
            key.into(),
            LockRecord {
                token: token.into(),
                deadline: None,
            },
        );
    }
}

#[async_trait]
impl LockStore for InMemoryLockStore {
    async fn acquire(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        match self.records.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                if slot.get().is_expired() {
                    slot.insert(LockRecord::leased(token, ttl));
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(LockRecord::leased(token, ttl));
                Ok(true)
            }
        }
    }

    async fn extend(&self, key: &str, token: &str, added: Duration) -> Result<bool> {
        match self.records.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                if slot.get().is_expired() {
                    slot.remove();
                    return Ok(false);
                }
                let record = slot.get_mut();
                if record.token != token {
                    return Ok(false);
                }
                match record.deadline {
                    Some(deadline) => {
                        record.deadline = Some(deadline + added);
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            Entry::Vacant(_) => Ok(false),
        }
    }

    async fn renew(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        match self.records.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                if slot.get().is_expired() {
                    slot.remove();
                    return Ok(false);
                }
                let record = slot.get_mut();
                if record.token != token || record.deadline.is_none() {
                    return Ok(false);
                }
                record.deadline = Some(Instant::now() + ttl);
                Ok(true)
            }
            Entry::Vacant(_) => Ok(false),
        }
    }

    async fn release(&self, key: &str, token: &str) -> Result<bool> {
        match self.records.entry(key.to_string()) {
            Entry::Occupied(slot) => {
                if slot.get().is_expired() {
                    slot.remove();
                    Ok(false)
                } else if slot.get().token == token {
                    slot.remove();
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(_) => Ok(false),
        }
    }

    async fn holder(&self, key: &str) -> Result<Option<String>> {
        match self.records.entry(key.to_string()) {
            Entry::Occupied(slot) => {
                if slot.get().is_expired() {
                    slot.remove();
                    Ok(None)
                } else {
                    Ok(Some(slot.get().token.clone()))
                }
            }
            Entry::Vacant(_) => Ok(None),
        }
    }

    async fn remaining_millis(&self, key: &str) -> Result<i64> {
        match self.records.entry(key.to_string()) {
            Entry::Occupied(slot) => {
                if slot.get().is_expired() {
                    slot.remove();
                    return Ok(PTTL_MISSING);
                }
                match slot.get().deadline {
                    Some(deadline) => {
                        let remaining = deadline.saturating_duration_since(Instant::now());
                        Ok(i64::try_from(remaining.as_millis()).unwrap_or(i64::MAX))
                    }
                    None => Ok(PTTL_NO_EXPIRY),
                }
            }
            Entry::Vacant(_) => Ok(PTTL_MISSING),
        }
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}
