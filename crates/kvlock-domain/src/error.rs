//! Error handling types

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for kvlock
///
/// Routine protocol outcomes (lost races, ownership mismatches, expired
/// leases) are reported as `Ok(false)` by the operations themselves and
/// never appear here. This enum covers the conditions that abort an
/// operation: the distinguished acquisition timeout of scoped locking,
/// store/transport faults, and invalid configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Wait timeout elapsed without obtaining the lock
    #[error("lock acquisition timed out for key '{key}' after {waited:?}")]
    AcquireTimeout {
        /// Key the acquisition was attempted on
        key: String,
        /// Wall-clock time spent waiting
        waited: Duration,
    },

    /// Store or transport fault
    #[error("store error: {message}")]
    Store {
        /// Description of the store error
        message: String,
        /// Underlying error, propagated unmodified
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },
}

impl Error {
    /// Create an acquisition timeout error
    pub fn acquire_timeout<S: Into<String>>(key: S, waited: Duration) -> Self {
        Self::AcquireTimeout {
            key: key.into(),
            waited,
        }
    }

    /// Create a store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source
    pub fn store_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is the distinguished acquisition timeout
    pub fn is_acquire_timeout(&self) -> bool {
        matches!(self, Self::AcquireTimeout { .. })
    }
}

// Note: external crate error conversions are handled at the provider
// boundary; the domain stays free of store-specific types.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_timeout_display_names_the_key() {
        let err = Error::acquire_timeout("jobs:nightly", Duration::from_secs(30));
        assert!(err.to_string().contains("jobs:nightly"));
        assert!(err.is_acquire_timeout());
    }

    #[test]
    fn store_error_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = Error::store_with_source("connection failed", io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_acquire_timeout());
    }
}
