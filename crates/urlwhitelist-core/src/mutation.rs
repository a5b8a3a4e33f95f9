//! Pure whitelist transformations.
//!
//! Both functions leave their input untouched and return a new snapshot
//! with the same `disabled` flag.

use indexmap::IndexMap;
use indexmap::map::Entry;

use urlwhitelist_types::{Result, Whitelist, WhitelistEntry, WhitelistError};

/// Insert `entry`, replacing any entry with the same id.
///
/// Entries with other ids keep their relative order and the new entry is
/// placed after them, so re-adding an existing id moves it to the end.
///
/// Fails with [`WhitelistError::DuplicateEntry`] when the input already
/// holds two different entries under one id. Exact repeats are collapsed.
pub fn add_entry(whitelist: &Whitelist, entry: WhitelistEntry) -> Result<Whitelist> {
    let mut by_id: IndexMap<&str, &WhitelistEntry> =
        IndexMap::with_capacity(whitelist.entries().len() + 1);

    for existing in whitelist.entries() {
        match by_id.entry(existing.id()) {
            Entry::Vacant(slot) => {
                slot.insert(existing);
            }
            Entry::Occupied(slot) if *slot.get() == existing => {}
            Entry::Occupied(slot) => {
                return Err(WhitelistError::DuplicateEntry {
                    id: slot.key().to_string(),
                });
            }
        }
    }

    by_id.shift_remove(entry.id());
    let mut entries: Vec<WhitelistEntry> = by_id.into_values().cloned().collect();
    entries.push(entry);

    Ok(whitelist.with_entries(entries))
}

/// Drop every entry whose id is `id`. Unknown ids are a no-op.
pub fn remove_entry(whitelist: &Whitelist, id: &str) -> Whitelist {
    let entries = whitelist
        .entries()
        .iter()
        .filter(|entry| entry.id() != id)
        .cloned()
        .collect();
    whitelist.with_entries(entries)
}
