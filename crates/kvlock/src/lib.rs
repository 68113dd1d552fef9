//! # kvlock
//!
//! Client-side distributed mutual-exclusion locks coordinated through a
//! shared key-value store. Independent processes agree on exclusive
//! ownership of a named resource without any coordinator of their own:
//! correctness is delegated to the store's atomic script execution, and
//! every lock carries a lease the store expires by itself, so a crashed
//! holder blocks its peers for a bounded time only.
//!
//! ## Features
//!
//! - **Four atomic operations**: acquire, extend (incremental), renew
//!   (absolute), release. Each is a single indivisible round trip
//! - **Polling acquisition** with fixed backoff, wall-clock wait
//!   timeout, and cancellation safety at the retry boundary
//! - **Scoped acquisition**: a guard that releases on every exit path
//! - **Pluggable stores**: Redis for multi-instance deployments, an
//!   in-memory backend for tests and single-process use
//!
//! ## Example
//!
//! ```ignore
//! use kvlock::{DistributedLock, RedisLockStore};
//! use std::sync::Arc;
//!
//! let store = Arc::new(RedisLockStore::from_url("redis://localhost:6379")?);
//! let lock = DistributedLock::new(store, "jobs:nightly")?;
//!
//! let guard = lock.lock().await?; // Err(AcquireTimeout) if contended too long
//! // ... exclusive section ...
//! guard.release().await?;
//! ```
//!
//! ## Architecture
//!
//! The workspace follows the same layering as the rest of our crates:
//!
//! - `domain` - protocol types, errors, and the `LockStore` port
//! - `application` - the lock client, acquisition loop, and guard
//! - `providers` - store backends implementing the port

/// Domain layer - protocol types, errors, and the store port
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use kvlock_domain::*;
}

/// Application layer - lock client orchestration
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use kvlock_application::*;
}

/// Providers layer - lock store backends
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use kvlock_providers::*;
}

// Re-export the public API at the crate root
pub use domain::{Error, LockStore, LockToken, Result};

pub use application::{DistributedLock, LockConfig, LockGuard};

pub use providers::InMemoryLockStore;
#[cfg(feature = "store-redis")]
pub use providers::RedisLockStore;
