//! In-memory configuration store.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use urlwhitelist_types::StoreResult;

use crate::{ClusterConfigService, StoredConfig};

/// Keeps records in a process-local map. Never fails.
#[derive(Debug, Default)]
pub struct MemoryConfigService {
    records: RwLock<HashMap<String, StoredConfig>>,
}

impl MemoryConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl ClusterConfigService for MemoryConfigService {
    fn read_raw(&self, key: &str) -> StoreResult<Option<StoredConfig>> {
        Ok(self.records.read().get(key).cloned())
    }

    fn write_raw(&self, key: &str, payload: Value) -> StoreResult<StoredConfig> {
        let mut records = self.records.write();
        let record = StoredConfig::next(key, payload, records.get(key));
        records.insert(key.to_string(), record.clone());
        Ok(record)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        Ok(self.records.write().remove(key).is_some())
    }
}
