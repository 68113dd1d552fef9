//! Lock Store Port
//!
//! Port for lock storage backends. A backend is a shared key-value
//! store that can run a short, fixed sequence of reads and writes on a
//! single key as one indivisible step. That atomic-execution guarantee
//! is what the whole protocol delegates its correctness to: the store
//! totally orders all operations on a key across every client, so
//! exactly one of two racing acquirers observes success.
//!
//! ## Implementations
//!
//! - **Redis**: Lua scripts executed server-side, for multi-instance
//!   deployments
//! - **InMemory**: per-key map guard, for single-process use and tests

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Lock Store Port
///
/// The four atomic operations of the lock protocol plus the two plain
/// reads the client needs. Every method is a single round trip;
/// implementations must guarantee that each operation body executes
/// indivisibly with respect to all other operations on the same key.
///
/// A lock record exists if and only if some token currently holds the
/// lock: absence means unlocked. Records carry a millisecond lease the
/// store enforces on its own, so a crashed holder blocks others for at
/// most the remaining lease.
#[async_trait]
pub trait LockStore: Send + Sync + std::fmt::Debug {
    /// Create the lock record if no record currently exists
    ///
    /// On success the record is created with `token` as holder and
    /// `ttl` as its lease in the same atomic step: there is no
    /// externally observable window where the key is set without an
    /// expiry.
    ///
    /// # Returns
    /// True if the record was created, false if some holder already
    /// has it. A false result mutates nothing, so retrying is safe.
    async fn acquire(&self, key: &str, token: &str, ttl: Duration) -> Result<bool>;

    /// Add `added` to the current remaining lease
    ///
    /// Incremental: the new lease is the *current remaining* time plus
    /// `added`, not an absolute reset. Rejected unless `token` is the
    /// current holder and the record has a finite remaining lease; a
    /// record without an expiry is treated as not actively leased and
    /// cannot be extended.
    ///
    /// # Returns
    /// True if the lease was extended, false on any rejected
    /// precondition (no record, different holder, no finite lease).
    async fn extend(&self, key: &str, token: &str, added: Duration) -> Result<bool>;

    /// Replace the remaining lease with exactly `ttl`
    ///
    /// Absolute counterpart of [`extend`](LockStore::extend), with the
    /// same ownership and finite-lease preconditions: whatever time
    /// remained is discarded.
    async fn renew(&self, key: &str, token: &str, ttl: Duration) -> Result<bool>;

    /// Delete the record if `token` is the current holder
    ///
    /// Stale, duplicate, or post-expiry releases are reported as false
    /// and mutate nothing.
    async fn release(&self, key: &str, token: &str) -> Result<bool>;

    /// Read the current holder token, if any
    ///
    /// Plain read, not serialized against the atomic operations. The
    /// answer may be stale the moment it returns.
    async fn holder(&self, key: &str) -> Result<Option<String>>;

    /// Read the remaining lease in milliseconds
    ///
    /// Follows the Redis PTTL convention:
    /// [`PTTL_NO_EXPIRY`](crate::constants::PTTL_NO_EXPIRY) (`-1`) for
    /// a record without an expiry,
    /// [`PTTL_MISSING`](crate::constants::PTTL_MISSING) (`-2`) when no
    /// record exists.
    async fn remaining_millis(&self, key: &str) -> Result<i64>;

    /// Get the name/identifier of this store implementation
    ///
    /// # Returns
    /// A string identifier for the backend (e.g., "redis", "memory")
    fn store_name(&self) -> &str;
}
