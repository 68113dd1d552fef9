//! Redis lock store
//!
//! Distributed [`LockStore`] implementation backed by Redis. Each
//! protocol operation is a Lua script executed server-side, so Redis'
//! single-threaded script execution provides the atomicity the port
//! demands across every client in the deployment.
//!
//! Scripts are wrapped in [`redis::Script`], which keys the registered
//! handle by the SHA-1 of the script body: invocation goes through
//! `EVALSHA` and transparently re-registers on a `NOSCRIPT` cache miss,
//! so registration is idempotent and purely a round-trip optimization.
//! [`RedisLockStore::preload`] performs the registration eagerly.
//!
//! ## Example
//!
//! ```ignore
//! use kvlock_providers::store::RedisLockStore;
//!
//! let store = RedisLockStore::from_url("redis://localhost:6379")?;
//! // Or with an externally managed client
//! let store = RedisLockStore::new(client);
//! ```

use async_trait::async_trait;
use kvlock_domain::error::{Error, Result};
use kvlock_domain::ports::LockStore;
use redis::aio::MultiplexedConnection;
use redis::{Client, Script};
use std::time::Duration;
use tracing::debug;

use super::scripts::{ACQUIRE_SCRIPT, EXTEND_SCRIPT, RELEASE_SCRIPT, RENEW_SCRIPT};

/// The four lock scripts, hashed once at construction
struct LockScripts {
    acquire: Script,
    extend: Script,
    renew: Script,
    release: Script,
}

impl LockScripts {
    fn new() -> Self {
        Self {
            acquire: Script::new(ACQUIRE_SCRIPT),
            extend: Script::new(EXTEND_SCRIPT),
            renew: Script::new(RENEW_SCRIPT),
            release: Script::new(RELEASE_SCRIPT),
        }
    }

    fn all(&self) -> [&Script; 4] {
        [&self.acquire, &self.extend, &self.renew, &self.release]
    }
}

/// Redis lock store
///
/// Holds a caller-supplied [`redis::Client`] and obtains a multiplexed
/// async connection per operation. Connection pooling and reconnection
/// policy stay with the caller; this store only issues the protocol
/// round trips.
pub struct RedisLockStore {
    client: Client,
    scripts: LockScripts,
}

impl RedisLockStore {
    /// Create a lock store over an externally managed client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            scripts: LockScripts::new(),
        }
    }

    /// Create a lock store from a connection URL
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    pub fn from_url(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string)
            .map_err(|e| Error::store_with_source("failed to create Redis client", e))?;
        Ok(Self::new(client))
    }

    /// Create a lock store with host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::from_url(&format!("redis://{host}:{port}"))
    }

    /// Get a connection from the client
    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::store_with_source("failed to get Redis connection", e))
    }

    /// Eagerly register all four scripts with the server
    ///
    /// Optional: invocation self-heals on `NOSCRIPT` anyway. Loading up
    /// front keeps the first acquire to a single round trip and fails
    /// fast on a misconfigured store.
    pub async fn preload(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        for script in self.scripts.all() {
            let sha = script
                .prepare_invoke()
                .load_async(&mut conn)
                .await
                .map_err(|e| Error::store_with_source("failed to load lock script", e))?;
            debug!(sha = %sha, "lock script registered");
        }
        Ok(())
    }

    /// Test the connection with a PING
    pub async fn ping(&self) -> Result<()> {
        let timeout = Duration::from_secs(2);

        let mut conn = match tokio::time::timeout(
            timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => return Err(Error::store_with_source("Redis connection failed", e)),
            Err(_) => return Err(Error::store("Redis connection timed out")),
        };

        match tokio::time::timeout(timeout, redis::cmd("PING").query_async::<()>(&mut conn)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(Error::store_with_source("Redis PING failed", e)),
            Err(_) => Err(Error::store("Redis PING timed out")),
        }
    }
}

/// Whole milliseconds for the Lua side
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl LockStore for RedisLockStore {
    async fn acquire(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.connection().await?;
        let granted: i64 = self
            .scripts
            .acquire
            .key(key)
            .arg(token)
            .arg(millis(ttl))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| Error::store_with_source("acquire script failed", e))?;
        Ok(granted == 1)
    }

    async fn extend(&self, key: &str, token: &str, added: Duration) -> Result<bool> {
        let mut conn = self.connection().await?;
        let extended: i64 = self
            .scripts
            .extend
            .key(key)
            .arg(token)
            .arg(millis(added))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| Error::store_with_source("extend script failed", e))?;
        Ok(extended == 1)
    }

    async fn renew(&self, key: &str, token: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.connection().await?;
        let renewed: i64 = self
            .scripts
            .renew
            .key(key)
            .arg(token)
            .arg(millis(ttl))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| Error::store_with_source("renew script failed", e))?;
        Ok(renewed == 1)
    }

    async fn release(&self, key: &str, token: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let released: i64 = self
            .scripts
            .release
            .key(key)
            .arg(token)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| Error::store_with_source("release script failed", e))?;
        Ok(released == 1)
    }

    async fn holder(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::store_with_source("Redis GET failed", e))
    }

    async fn remaining_millis(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection().await?;
        redis::cmd("PTTL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| Error::store_with_source("Redis PTTL failed", e))
    }

    fn store_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisLockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisLockStore")
            .field("acquire_sha", &self.scripts.acquire.get_hash())
            .finish_non_exhaustive()
    }
}
