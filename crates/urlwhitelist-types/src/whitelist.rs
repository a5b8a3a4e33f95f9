//! The whitelist snapshot and its matching algorithm.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ClusterConfig;
use crate::entry::WhitelistEntry;

/// An immutable snapshot of the URL whitelist.
///
/// Entries keep insertion order and are expected to have unique ids; the
/// mutation helpers in `urlwhitelist-core` uphold that. When `disabled` is
/// set every URL is permitted regardless of the entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Whitelist {
    #[serde(default)]
    entries: Vec<WhitelistEntry>,
    #[serde(default)]
    disabled: bool,
}

impl ClusterConfig for Whitelist {
    const KEY: &'static str = "url_whitelist";
}

impl Whitelist {
    /// Create a whitelist. The caller guarantees ids are unique.
    pub fn new(entries: Vec<WhitelistEntry>, disabled: bool) -> Self {
        Self { entries, disabled }
    }

    /// The fail-open value served while nothing has been stored yet.
    pub fn bootstrap() -> Self {
        Self::new(Vec::new(), true)
    }

    pub fn entries(&self) -> &[WhitelistEntry] {
        &self.entries
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Find the entry with the given id.
    pub fn get_entry(&self, id: &str) -> Option<&WhitelistEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Same `disabled` flag, new entries.
    pub fn with_entries(&self, entries: Vec<WhitelistEntry>) -> Self {
        Self::new(entries, self.disabled)
    }

    /// Same entries, new `disabled` flag.
    pub fn with_disabled(&self, disabled: bool) -> Self {
        Self::new(self.entries.clone(), disabled)
    }

    /// Decide whether `url` may be fetched.
    ///
    /// A disabled whitelist permits everything. Otherwise the first entry
    /// that matches wins. An entry whose pattern does not compile is
    /// logged and treated as not matching so the rest of the list is
    /// still evaluated.
    pub fn is_whitelisted(&self, url: &str) -> bool {
        if self.disabled {
            return true;
        }

        self.entries.iter().any(|entry| match entry.matches(url) {
            Ok(matched) => matched,
            Err(e) => {
                warn!(
                    entry_id = %entry.id(),
                    pattern = %entry.value(),
                    error = %e,
                    "skipping whitelist entry with malformed pattern"
                );
                false
            }
        })
    }
}
