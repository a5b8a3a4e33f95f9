//! End-to-end behaviour of the whitelist authority over both store backends.
//!
//! The regex tests pin down that patterns are matched against the whole
//! URL. A pattern that merely occurs somewhere inside a URL must not
//! whitelist it.

use std::sync::Arc;

use urlwhitelist_core::{UrlWhitelistService, add_entry, remove_entry};
use urlwhitelist_store::{ClusterConfigService, FileConfigService, MemoryConfigService};
use urlwhitelist_types::{EntryType, Whitelist, WhitelistEntry};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn entry(id: &str, entry_type: EntryType, value: &str) -> WhitelistEntry {
    WhitelistEntry::new(id, format!("entry {id}"), entry_type, value).unwrap()
}

/// Run `check` once against an in-memory store and once against a file store.
fn with_each_store(check: impl Fn(UrlWhitelistService)) {
    check(UrlWhitelistService::new(Arc::new(MemoryConfigService::new())));

    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn ClusterConfigService> =
        Arc::new(FileConfigService::with_dir(dir.path().to_path_buf()));
    check(UrlWhitelistService::new(store));
}

fn enabled_service(service: &UrlWhitelistService) {
    service.save(&Whitelist::new(Vec::new(), false)).unwrap();
}

// ===========================================================================
// Matching
// ===========================================================================

#[test]
fn disabled_whitelist_permits_any_url() {
    with_each_store(|service| {
        service
            .save(&Whitelist::new(
                vec![entry("a", EntryType::Exact, "http://only")],
                true,
            ))
            .unwrap();
        for url in ["http://only", "http://other", "", "gopher://x"] {
            assert!(service.is_whitelisted(url).unwrap(), "{url}");
        }
    });
}

#[test]
fn enabled_empty_whitelist_rejects_any_url() {
    with_each_store(|service| {
        enabled_service(&service);
        for url in ["http://only", "http://other", "", "gopher://x"] {
            assert!(!service.is_whitelisted(url).unwrap(), "{url}");
        }
    });
}

#[test]
fn exact_entry_matches_only_identical_url() {
    with_each_store(|service| {
        enabled_service(&service);
        service
            .add_entry(entry("a", EntryType::Exact, "http://x/y"))
            .unwrap();
        assert!(service.is_whitelisted("http://x/y").unwrap());
        assert!(!service.is_whitelisted("http://x/y/").unwrap());
    });
}

#[test]
fn regex_entry_matches_whole_url_only() {
    with_each_store(|service| {
        enabled_service(&service);
        service
            .add_entry(entry("b", EntryType::Regex, "http://x/.*"))
            .unwrap();
        assert!(service.is_whitelisted("http://x/").unwrap());
        assert!(service.is_whitelisted("http://x/anything").unwrap());
        assert!(!service.is_whitelisted("http://y/").unwrap());
        assert!(!service.is_whitelisted("http://y/?next=http://x/").unwrap());
    });
}

#[test]
fn malformed_regex_entry_never_matches() {
    with_each_store(|service| {
        enabled_service(&service);
        service
            .add_entry(entry("bad", EntryType::Regex, "http://x/(["))
            .unwrap();
        service
            .add_entry(entry("good", EntryType::Exact, "http://x/ok"))
            .unwrap();
        assert!(!service.is_whitelisted("http://x/([").unwrap());
        assert!(service.is_whitelisted("http://x/ok").unwrap());
    });
}

// ===========================================================================
// Mutation
// ===========================================================================

#[test]
fn add_then_get_entry_round_trip() {
    with_each_store(|service| {
        enabled_service(&service);
        let added = entry("1", EntryType::Exact, "http://a");
        service.add_entry(added.clone()).unwrap();
        assert_eq!(service.get_entry("1").unwrap(), Some(added));
    });
}

#[test]
fn re_adding_an_id_replaces_it_at_the_end() {
    with_each_store(|service| {
        let a = entry("1", EntryType::Exact, "http://a");
        let b = entry("2", EntryType::Exact, "http://b");
        let a_changed = entry("1", EntryType::Exact, "http://changed");
        service
            .save(&Whitelist::new(vec![a, b.clone()], false))
            .unwrap();

        service.add_entry(a_changed.clone()).unwrap();

        assert_eq!(service.get().unwrap().entries(), &[b, a_changed]);
        assert!(!service.is_whitelisted("http://a").unwrap());
        assert!(service.is_whitelisted("http://changed").unwrap());
    });
}

#[test]
fn removing_unknown_id_leaves_snapshot_equal() {
    with_each_store(|service| {
        let list = Whitelist::new(vec![entry("1", EntryType::Regex, "https://.*")], false);
        service.save(&list).unwrap();
        service.remove_entry("nonexistent").unwrap();
        assert_eq!(service.get().unwrap(), list);
    });
}

#[test]
fn pure_helpers_match_service_behaviour() {
    let list = Whitelist::new(
        vec![
            entry("1", EntryType::Exact, "http://a"),
            entry("2", EntryType::Exact, "http://b"),
        ],
        false,
    );

    assert_eq!(remove_entry(&list, "nonexistent"), list);

    let once = remove_entry(&list, "1");
    assert_eq!(remove_entry(&once, "1"), once);

    let readded = add_entry(&once, entry("1", EntryType::Exact, "http://a")).unwrap();
    let ids: Vec<&str> = readded.entries().iter().map(|e| e.id()).collect();
    assert_eq!(ids, ["2", "1"]);
}

// ===========================================================================
// Bootstrap
// ===========================================================================

#[test]
fn nothing_stored_yields_fail_open_default() {
    with_each_store(|service| {
        assert_eq!(service.get().unwrap(), Whitelist::new(Vec::new(), true));
        assert!(service.is_whitelisted("http://unconfigured").unwrap());
        assert_eq!(service.get_entry("1").unwrap(), None);
    });
}

#[test]
fn file_store_persists_across_services() {
    let dir = tempfile::tempdir().unwrap();
    let first = UrlWhitelistService::new(Arc::new(FileConfigService::with_dir(
        dir.path().to_path_buf(),
    )));
    enabled_service(&first);
    first
        .add_entry(entry("1", EntryType::Exact, "http://a"))
        .unwrap();

    let second = UrlWhitelistService::new(Arc::new(FileConfigService::with_dir(
        dir.path().to_path_buf(),
    )));
    assert!(second.is_whitelisted("http://a").unwrap());
    assert!(!second.is_whitelisted("http://b").unwrap());
}
