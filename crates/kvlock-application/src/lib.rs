//! Application Layer - kvlock
//!
//! Orchestration of the lock protocol over the [`LockStore`] port:
//! the [`DistributedLock`] client with its polling acquisition loop,
//! the [`LockGuard`] scoped-acquisition wrapper, and [`LockConfig`].
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `kvlock-domain`: for the store port, errors, and the token
//! - `tokio`/`tracing`/`serde`/`validator` for runtime, logging, and
//!   configuration concerns
//!
//! It never talks to a concrete store; backends are injected as
//! `Arc<dyn LockStore>`.

pub mod config;
pub mod guard;
pub mod lock;

pub use config::LockConfig;
pub use guard::LockGuard;
pub use lock::DistributedLock;

// Re-export kvlock-domain types commonly used with the client
pub use kvlock_domain::{Error, LockStore, LockToken, Result};
