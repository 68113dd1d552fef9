//! Lock holder identity token
//!
//! A lock record in the store names exactly one holder token; every
//! ownership-gated operation compares the stored value against the
//! caller's token. Tokens are generated once per lock client and reused
//! for the client's entire lifetime, including re-acquisition after a
//! release or a lost wait.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier proving which lock client owns a lock record
///
/// Collision probability across concurrent lock attempts is negligible
/// (UUID v4, 122 random bits).
///
/// # Example
///
/// ```ignore
/// use kvlock_domain::LockToken;
///
/// let token = LockToken::generate();
/// assert_ne!(token, LockToken::generate());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockToken(String);

impl LockToken {
    /// Generate a new effectively-unique token
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The token's wire representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LockToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for LockToken {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LockToken {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_tokens_are_unique() {
        let a = LockToken::generate();
        let b = LockToken::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }

    #[test]
    fn compares_against_stored_values() {
        let token = LockToken::generate();
        let stored = token.as_str().to_string();
        assert!(token == stored.as_str());
    }
}
