//! Scoped lock acquisition
//!
//! RAII wrapper around a held lock. Exiting the guarded section, even
//! by early return or panic unwinding, releases the lock, so no
//! orphaned record outlives its holder beyond the lease safety net.

use crate::lock::DistributedLock;
use kvlock_domain::Result;
use tracing::{debug, warn};

/// Guard over a held distributed lock
///
/// Returned by [`DistributedLock::lock`]. Prefer
/// [`release`](Self::release) at the end of the guarded section: it
/// awaits the store round trip and reports the outcome. Dropping the
/// guard without releasing spawns a best-effort release on the current
/// runtime; if that release never reaches the store (runtime shutting
/// down, store unreachable), the record still expires on its own when
/// the lease runs out.
#[derive(Debug)]
pub struct LockGuard {
    lock: DistributedLock,
    released: bool,
}

impl LockGuard {
    pub(crate) fn new(lock: DistributedLock) -> Self {
        Self {
            lock,
            released: false,
        }
    }

    /// The key this guard holds
    pub fn key(&self) -> &str {
        self.lock.key()
    }

    /// The client holding the lock
    ///
    /// Use this to extend or renew the lease while inside the guarded
    /// section.
    pub fn client(&self) -> &DistributedLock {
        &self.lock
    }

    /// Release the lock now
    ///
    /// # Returns
    /// True if this guard's token still held the lock; false if the
    /// lease had already expired or another holder took over.
    pub async fn release(mut self) -> Result<bool> {
        self.released = true;
        self.lock.release().await
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let lock = self.lock.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    match lock.release().await {
                        Ok(true) => debug!(key = %lock.key(), "released dropped lock guard"),
                        Ok(false) => {
                            debug!(key = %lock.key(), "dropped lock guard no longer held the lock");
                        }
                        Err(err) => {
                            warn!(key = %lock.key(), error = %err, "failed to release dropped lock guard");
                        }
                    }
                });
            }
            Err(_) => {
                warn!(
                    key = %self.lock.key(),
                    "lock guard dropped outside a runtime; the lease will expire it"
                );
            }
        }
    }
}
