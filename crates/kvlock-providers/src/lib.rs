//! # kvlock - Provider Implementations
//!
//! Lock store backends implementing the [`LockStore`] port defined in
//! `kvlock-domain`.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`RedisLockStore`] | Distributed | Lua-scripted atomic operations against Redis |
//! | [`InMemoryLockStore`] | Local | Single-process store for tests and embedded use |
//!
//! ## Feature Flags
//!
//! The Redis backend can be disabled for minimal builds:
//!
//! ```toml
//! [dependencies]
//! kvlock-providers = { version = "0.1", default-features = false }
//! ```

// Re-export kvlock-domain types commonly used with providers
pub use kvlock_domain::error::{Error, Result};
pub use kvlock_domain::ports::LockStore;

/// Lock store implementations
///
/// Implements the `LockStore` trait for the supported backends.
pub mod store;

// Re-export for convenience
pub use store::InMemoryLockStore;
#[cfg(feature = "store-redis")]
pub use store::RedisLockStore;
