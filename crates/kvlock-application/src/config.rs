//! Lock client configuration

use kvlock_domain::constants::{DEFAULT_LEASE_SECS, DEFAULT_WAIT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::{Validate, ValidationError, ValidationErrors};

/// Lock client configuration
///
/// Controls how long a lock is leased for and how long an acquisition
/// attempt may wait before giving up.
///
/// # Example
///
/// ```ignore
/// use kvlock_application::LockConfig;
/// use std::time::Duration;
///
/// let config = LockConfig::default()
///     .with_lease(Duration::from_secs(60))
///     .wait_forever();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockConfig {
    /// How long the store keeps the lock before expiring it on its own.
    /// This bounds how long a crashed holder can block other workers.
    #[serde(default = "default_lease")]
    pub lease: Duration,

    /// How long to wait before aborting an acquisition attempt.
    /// `None` waits indefinitely, which is useful when exactly one
    /// worker should ever be active.
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout: Option<Duration>,
}

fn default_lease() -> Duration {
    Duration::from_secs(DEFAULT_LEASE_SECS)
}

fn default_wait_timeout() -> Option<Duration> {
    Some(Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS))
}

impl LockConfig {
    /// Create a config with the default lease and wait timeout
    pub fn new() -> Self {
        Self {
            lease: default_lease(),
            wait_timeout: default_wait_timeout(),
        }
    }

    /// Set the lease duration
    pub fn with_lease(mut self, lease: Duration) -> Self {
        self.lease = lease;
        self
    }

    /// Set the acquisition wait timeout
    pub fn with_wait_timeout(mut self, wait_timeout: Duration) -> Self {
        self.wait_timeout = Some(wait_timeout);
        self
    }

    /// Wait indefinitely for acquisition
    pub fn wait_forever(mut self) -> Self {
        self.wait_timeout = None;
        self
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for LockConfig {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        // The store tracks leases in whole milliseconds; a zero lease
        // would create a record that expires before it is observable.
        if self.lease.as_millis() == 0 {
            errors.add("lease", ValidationError::new("range"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
