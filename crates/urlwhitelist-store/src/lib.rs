//! Versioned cluster configuration store.
//!
//! Every [`ClusterConfig`] value lives in a single record addressed by its
//! key. A record carries a monotonic per-key `version` and the time of the
//! last write; writing a value always replaces the whole record.
//!
//! # Architecture
//!
//! [`ClusterConfigService`] is the object-safe raw interface that backends
//! implement. [`ClusterConfigExt`] layers the typed `get` / `get_or_default`
//! / `write` operations on top of any backend, including
//! `dyn ClusterConfigService`.
//!
//! Two backends are provided:
//! - [`memory::MemoryConfigService`] for tests and single-process use.
//! - [`file::FileConfigService`], one JSON file per key.

pub mod file;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use urlwhitelist_types::{ClusterConfig, StoreResult};

pub use file::{FileConfigService, STORE_DIR_ENV, discover_store_dir};
pub use memory::MemoryConfigService;

/// One stored configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredConfig {
    /// Record key, see [`ClusterConfig::KEY`].
    pub key: String,
    /// The serialized value.
    pub payload: Value,
    /// Starts at 1 and increases by one on every write to this key.
    pub version: u64,
    /// When the record was last written.
    pub last_updated: DateTime<Utc>,
}

impl StoredConfig {
    /// Build the record that follows `previous` (or the first one).
    pub fn next(key: &str, payload: Value, previous: Option<&StoredConfig>) -> Self {
        Self {
            key: key.to_string(),
            payload,
            version: previous.map_or(1, |p| p.version + 1),
            last_updated: Utc::now(),
        }
    }
}

/// Raw access to the configuration store.
///
/// Reads and writes are atomic per record. There is no compare-and-swap:
/// concurrent writers to the same key race and the last one wins.
pub trait ClusterConfigService: Send + Sync {
    /// Read the record stored under `key`, if any.
    fn read_raw(&self, key: &str) -> StoreResult<Option<StoredConfig>>;

    /// Replace the record under `key`, returning what was stored.
    fn write_raw(&self, key: &str, payload: Value) -> StoreResult<StoredConfig>;

    /// Delete the record under `key`. Returns whether one existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;
}

/// Typed operations over any [`ClusterConfigService`].
pub trait ClusterConfigExt: ClusterConfigService {
    /// Read and deserialize the value for `T`, if stored.
    fn get<T: ClusterConfig>(&self) -> StoreResult<Option<T>> {
        match self.read_raw(T::KEY)? {
            Some(record) => Ok(Some(serde_json::from_value(record.payload)?)),
            None => Ok(None),
        }
    }

    /// Read the value for `T`, or `default` when nothing is stored.
    ///
    /// The default is returned as-is and not written back. Serving it is
    /// logged at warn level: for the whitelist it means every URL passes.
    fn get_or_default<T: ClusterConfig>(&self, default: T) -> StoreResult<T> {
        match self.get::<T>()? {
            Some(value) => Ok(value),
            None => {
                warn!(key = T::KEY, "no stored config, serving default");
                Ok(default)
            }
        }
    }

    /// Serialize `value` and replace the record for `T`.
    fn write<T: ClusterConfig>(&self, value: &T) -> StoreResult<()> {
        let payload = serde_json::to_value(value)?;
        let record = self.write_raw(T::KEY, payload)?;
        debug!(key = T::KEY, version = record.version, "wrote config");
        Ok(())
    }
}

impl<S: ClusterConfigService + ?Sized> ClusterConfigExt for S {}
