//! Domain Value Objects
//!
//! Immutable value objects defined by their attributes rather than an
//! identity of their own.

/// Lock holder identity token
pub mod token;

// Re-export commonly used value objects
pub use token::LockToken;
