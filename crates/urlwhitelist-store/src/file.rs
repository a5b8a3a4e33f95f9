//! File-backed configuration store.
//!
//! Each record is a pretty-printed JSON file at `{base_dir}/{key}.json`.
//! Writes go to a temp file first and are renamed into place, so a reader
//! never observes a half-written record.
//!
//! The base directory is discovered in this order:
//! 1. `URLWHITELIST_STORE_DIR` environment variable.
//! 2. `~/.urlwhitelist/cluster-config`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, warn};

use urlwhitelist_types::{StoreError, StoreResult};

use crate::{ClusterConfigService, StoredConfig};

/// Environment variable overriding the store directory.
pub const STORE_DIR_ENV: &str = "URLWHITELIST_STORE_DIR";

/// Resolve the store directory from an optional override and home dir.
///
/// Returns `None` when neither is available.
pub fn discover_store_dir(env_value: Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(dir) = env_value.filter(|v| !v.trim().is_empty()) {
        return Some(PathBuf::from(dir));
    }
    home.map(|h| h.join(".urlwhitelist").join("cluster-config"))
}

/// Write `contents` next to `path` and rename it into place.
///
/// The temp file is removed again if the rename fails.
fn replace_file(path: &Path, contents: &str) -> io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            warn!(path = %tmp_path.display(), error = %cleanup, "failed to remove temp config file");
        }
        return Err(e);
    }
    Ok(())
}

/// Stores one JSON file per key under a base directory.
#[derive(Debug)]
pub struct FileConfigService {
    base_dir: PathBuf,
    // Serializes the read-version/write sequence within this process.
    write_lock: Mutex<()>,
}

impl FileConfigService {
    /// Create a store rooted at `base_dir`.
    ///
    /// The directory is created on the first write.
    pub fn with_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store in the discovered directory.
    pub fn from_env() -> StoreResult<Self> {
        let dir = discover_store_dir(std::env::var(STORE_DIR_ENV).ok(), dirs::home_dir())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no home directory and {STORE_DIR_ENV} is not set"),
                )
            })?;
        Ok(Self::with_dir(dir))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid config key: {key:?}"),
            )
            .into());
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }

    fn load(&self, key: &str, path: &Path) -> StoreResult<Option<StoredConfig>> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: StoredConfig = serde_json::from_str(&json)?;
        if record.key != key {
            return Err(StoreError::Corrupt {
                key: key.to_string(),
                reason: format!("file holds record for key '{}'", record.key),
            });
        }
        Ok(Some(record))
    }
}

impl ClusterConfigService for FileConfigService {
    fn read_raw(&self, key: &str) -> StoreResult<Option<StoredConfig>> {
        let path = self.record_path(key)?;
        let record = self.load(key, &path)?;
        debug!(key, path = %path.display(), found = record.is_some(), "read config record");
        Ok(record)
    }

    fn write_raw(&self, key: &str, payload: Value) -> StoreResult<StoredConfig> {
        let path = self.record_path(key)?;
        let _guard = self.write_lock.lock();

        let previous = self.load(key, &path)?;
        let record = StoredConfig::next(key, payload, previous.as_ref());
        let json = serde_json::to_string_pretty(&record)?;

        fs::create_dir_all(&self.base_dir)?;
        replace_file(&path, &json)?;

        debug!(key, path = %path.display(), version = record.version, "wrote config record");
        Ok(record)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let path = self.record_path(key)?;
        let _guard = self.write_lock.lock();
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, path = %path.display(), "removed config record");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
