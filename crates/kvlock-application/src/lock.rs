//! Distributed lock client
//!
//! Client-side orchestration of the lock protocol. Correctness lives in
//! the store's atomic operations; this client only decides *when* to
//! call them: it polls acquire with a fixed backoff until success or
//! wait timeout, and issues the ownership-gated operations with the one
//! token it was assigned at construction.
//!
//! ## Concurrency model
//!
//! All coordination happens in the store, so the client needs no
//! synchronization of its own. The acquisition loop's only suspension
//! point is the backoff sleep, which makes a pending `acquire` safe to
//! cancel: an attempt cancelled there has not mutated store state.
//! A `DistributedLock` represents one logical owner; sharing a single
//! instance between concurrent callers is not supported (one token, one
//! owner).

use crate::config::LockConfig;
use crate::guard::LockGuard;
use kvlock_domain::constants::ACQUIRE_RETRY_INTERVAL_MS;
use kvlock_domain::{Error, LockStore, LockToken, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{debug, trace};
use validator::Validate;

/// Client for one named distributed lock
///
/// Identified by the key it targets and the token generated at
/// construction. The token is never regenerated: re-acquiring after a
/// release or a lost wait reuses it.
///
/// # Example
///
/// ```ignore
/// use kvlock_application::DistributedLock;
///
/// let lock = DistributedLock::new(store, "jobs:nightly")?;
/// if lock.acquire().await? {
///     // ... exclusive section ...
///     lock.release().await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DistributedLock {
    store: Arc<dyn LockStore>,
    key: String,
    token: LockToken,
    config: LockConfig,
}

impl DistributedLock {
    /// Create a lock client with the default configuration
    pub fn new<S: Into<String>>(store: Arc<dyn LockStore>, key: S) -> Result<Self> {
        Self::with_config(store, key, LockConfig::default())
    }

    /// Create a lock client with an explicit configuration
    ///
    /// # Errors
    /// Returns [`Error::Config`] for an empty key or a zero lease.
    pub fn with_config<S: Into<String>>(
        store: Arc<dyn LockStore>,
        key: S,
        config: LockConfig,
    ) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::config("lock key must not be empty"));
        }
        config
            .validate()
            .map_err(|e| Error::config(format!("invalid lock config: {e}")))?;
        Ok(Self {
            store,
            key,
            token: LockToken::generate(),
            config,
        })
    }

    /// The key this client locks on
    pub fn key(&self) -> &str {
        &self.key
    }

    /// This client's holder token (diagnostic)
    pub fn token(&self) -> &LockToken {
        &self.token
    }

    /// The configured lease and wait timeout
    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    /// Attempt to acquire the lock with the configured lease and wait
    /// timeout
    ///
    /// # Returns
    /// True once the lock is held; false if the wait timeout elapsed
    /// first.
    pub async fn acquire(&self) -> Result<bool> {
        self.acquire_with(self.config.lease, self.config.wait_timeout)
            .await
    }

    /// Attempt to acquire the lock with per-call lease and wait timeout
    ///
    /// Polls the store's atomic acquire until it succeeds, retrying at
    /// a fixed interval. Failed attempts mutate nothing in the store,
    /// and the loop suspends only in the backoff sleep, so cancelling
    /// the returned future leaves no stray record. A `wait_timeout` of
    /// zero tries exactly once, with no backoff sleep; `None` retries
    /// until success or cancellation.
    ///
    /// # Errors
    /// Store faults abort the loop and are propagated unmodified.
    pub async fn acquire_with(
        &self,
        lease: Duration,
        wait_timeout: Option<Duration>,
    ) -> Result<bool> {
        let start = Instant::now();
        loop {
            if self
                .store
                .acquire(&self.key, self.token.as_str(), lease)
                .await?
            {
                debug!(key = %self.key, lease_ms = lease.as_millis() as u64, "lock acquired");
                return Ok(true);
            }

            if let Some(limit) = wait_timeout {
                if start.elapsed() >= limit {
                    debug!(key = %self.key, waited = ?start.elapsed(), "gave up waiting for lock");
                    return Ok(false);
                }
            }

            trace!(key = %self.key, "lock busy, retrying");
            time::sleep(Duration::from_millis(ACQUIRE_RETRY_INTERVAL_MS)).await;
        }
    }

    /// Add time on top of however much lease is currently left
    ///
    /// Only succeeds while this client owns the lock and the record
    /// still has a finite lease. Single attempt; rejected outcomes are
    /// reported as false, not errors.
    pub async fn extend(&self, added: Duration) -> Result<bool> {
        self.store
            .extend(&self.key, self.token.as_str(), added)
            .await
    }

    /// Replace the remaining lease with a fresh one
    ///
    /// Sets the lease to exactly `lease` (or the configured lease when
    /// `None`), discarding whatever remained. Useful for heartbeat-style
    /// renewal where repeated [`extend`](Self::extend) calls would let
    /// the expiration drift ever further out.
    pub async fn renew(&self, lease: Option<Duration>) -> Result<bool> {
        let lease = lease.unwrap_or(self.config.lease);
        self.store.renew(&self.key, self.token.as_str(), lease).await
    }

    /// Release the lock if this client is the current holder
    ///
    /// Double releases and releases after expiry are reported as false
    /// and mutate nothing.
    pub async fn release(&self) -> Result<bool> {
        self.store.release(&self.key, self.token.as_str()).await
    }

    /// Determine whether this client currently holds the lock
    ///
    /// Non-atomic read-compare, informational only: the answer can be
    /// stale the moment it returns (a concurrent expiry or takeover is
    /// inherent). Never base mutation decisions on it.
    pub async fn is_owner(&self) -> Result<bool> {
        let holder = self.store.holder(&self.key).await?;
        Ok(holder.as_deref() == Some(self.token.as_str()))
    }

    /// Acquire the lock for a guarded section
    ///
    /// Scoped entry point: returns a [`LockGuard`] that releases the
    /// lock when dropped (best effort) or via
    /// [`LockGuard::release`] (deterministic).
    ///
    /// # Errors
    /// Returns [`Error::AcquireTimeout`] when the wait timeout elapses
    /// without obtaining the lock, never a silent success.
    pub async fn lock(&self) -> Result<LockGuard> {
        let start = Instant::now();
        if self.acquire().await? {
            Ok(LockGuard::new(self.clone()))
        } else {
            Err(Error::acquire_timeout(&self.key, start.elapsed()))
        }
    }
}
