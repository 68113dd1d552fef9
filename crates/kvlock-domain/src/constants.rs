//! Domain layer constants
//!
//! Protocol-level constants shared by the application layer and the
//! storage providers.

// ============================================================================
// LEASE DEFAULTS
// ============================================================================

/// Default lease duration in seconds before the store expires a lock
pub const DEFAULT_LEASE_SECS: u64 = 30;

/// Default wall-clock budget in seconds for an acquisition attempt
pub const DEFAULT_WAIT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// ACQUISITION LOOP
// ============================================================================

/// Fixed backoff between failed acquire attempts, in milliseconds
pub const ACQUIRE_RETRY_INTERVAL_MS: u64 = 100;

// ============================================================================
// REMAINING-TTL SENTINELS (Redis PTTL convention)
// ============================================================================

/// Remaining-TTL reading for a record that exists without an expiry
pub const PTTL_NO_EXPIRY: i64 = -1;

/// Remaining-TTL reading for a key with no record
pub const PTTL_MISSING: i64 = -2;
