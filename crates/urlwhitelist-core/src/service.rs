//! The whitelist authority.

use std::sync::Arc;

use tracing::{debug, info};

use urlwhitelist_store::{ClusterConfigExt, ClusterConfigService};
use urlwhitelist_types::{Result, Whitelist, WhitelistEntry};

use crate::mutation;

/// Reads, checks and mutates the URL whitelist held in a config store.
///
/// The service keeps no state besides the store handle. Every call reads
/// the current snapshot; mutations are read-modify-write without
/// compare-and-swap, so concurrent writers can lose updates.
#[derive(Clone)]
pub struct UrlWhitelistService {
    store: Arc<dyn ClusterConfigService>,
}

impl UrlWhitelistService {
    pub fn new(store: Arc<dyn ClusterConfigService>) -> Self {
        Self { store }
    }

    /// Current whitelist snapshot.
    ///
    /// When nothing is stored yet a disabled, empty whitelist is returned,
    /// which permits every URL. The initial whitelist is seeded separately
    /// and outbound features must keep working until that has happened.
    pub fn get(&self) -> Result<Whitelist> {
        Ok(self.store.get_or_default(Whitelist::bootstrap())?)
    }

    /// Replace the stored whitelist.
    pub fn save(&self, whitelist: &Whitelist) -> Result<()> {
        self.store.write(whitelist)?;
        Ok(())
    }

    // TODO: cache the snapshot instead of hitting the store on every check
    pub fn is_whitelisted(&self, url: &str) -> Result<bool> {
        let permitted = self.get()?.is_whitelisted(url);
        debug!(url, permitted, "url whitelist check");
        Ok(permitted)
    }

    pub fn get_entry(&self, id: &str) -> Result<Option<WhitelistEntry>> {
        Ok(self.get()?.get_entry(id).cloned())
    }

    /// Add `entry`, replacing and moving to the end any entry with its id.
    pub fn add_entry(&self, entry: WhitelistEntry) -> Result<()> {
        let current = self.get()?;
        let replaced = current.get_entry(entry.id()).is_some();
        let id = entry.id().to_string();

        let modified = mutation::add_entry(&current, entry)?;
        self.save(&modified)?;

        info!(entry_id = %id, replaced, "url whitelist entry saved");
        Ok(())
    }

    /// Remove the entry with `id`. Unknown ids are not an error.
    pub fn remove_entry(&self, id: &str) -> Result<()> {
        let current = self.get()?;
        let modified = mutation::remove_entry(&current, id);
        let removed = current.entries().len() - modified.entries().len();
        self.save(&modified)?;

        info!(entry_id = %id, removed, "url whitelist entry removed");
        Ok(())
    }
}

impl std::fmt::Debug for UrlWhitelistService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlWhitelistService").finish_non_exhaustive()
    }
}
