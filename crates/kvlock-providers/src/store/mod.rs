//! Lock Store Implementations
//!
//! Storage backends for the lock protocol. Every backend guarantees
//! that each protocol operation runs as one indivisible step serialized
//! against all other operations on the same key.
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: use [`InMemoryLockStore`]; no external
//!   process, cooperates with paused tokio time
//! - **Multi Instance**: use [`RedisLockStore`]; the store is the
//!   single coordination point across processes and hosts

pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;
#[cfg(feature = "store-redis")]
mod scripts;

// Re-export for convenience
pub use memory::InMemoryLockStore;
#[cfg(feature = "store-redis")]
pub use redis::RedisLockStore;
