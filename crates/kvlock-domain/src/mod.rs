//! Domain Layer - kvlock
//!
//! Core types of the distributed lock protocol: the error taxonomy,
//! protocol constants, the [`LockToken`] identity value object, and the
//! [`LockStore`] port that storage backends implement.
//!
//! ## Architecture
//!
//! This crate has no dependency on any concrete store. The port defines
//! the contract (four atomic operations plus two reads); providers
//! implement it, and the application layer orchestrates over it:
//! - High-level modules (domain) define interfaces
//! - Low-level modules (providers) implement them

/// Error taxonomy and result alias
pub mod error;

/// Lock protocol constants
pub mod constants;

/// Domain value objects
pub mod value_objects;

/// Port interfaces implemented by storage backends
pub mod ports;

// Re-export commonly used types at the crate root
pub use constants::{
    ACQUIRE_RETRY_INTERVAL_MS, DEFAULT_LEASE_SECS, DEFAULT_WAIT_TIMEOUT_SECS, PTTL_MISSING,
    PTTL_NO_EXPIRY,
};
pub use error::{Error, Result};
pub use ports::LockStore;
pub use value_objects::LockToken;
