//! URL whitelist authority.
//!
//! [`UrlWhitelistService`] answers "may this URL be fetched?" against the
//! whitelist held in a [`ClusterConfigService`](urlwhitelist_store::ClusterConfigService)
//! and applies add/remove mutations by writing back a new snapshot.
//!
//! The mutations themselves are the pure functions in [`mutation`], which
//! take a [`Whitelist`](urlwhitelist_types::Whitelist) and return a new one.
//!
//! ```rust
//! use std::sync::Arc;
//! use urlwhitelist_core::UrlWhitelistService;
//! use urlwhitelist_store::MemoryConfigService;
//! use urlwhitelist_types::{Whitelist, WhitelistEntry};
//!
//! # fn main() -> urlwhitelist_types::Result<()> {
//! let service = UrlWhitelistService::new(Arc::new(MemoryConfigService::new()));
//!
//! // Nothing stored yet: fail-open.
//! assert!(service.is_whitelisted("http://anything")?);
//!
//! service.save(&Whitelist::new(Vec::new(), false))?;
//! service.add_entry(WhitelistEntry::regex("api", "API", "https://api\\.example\\.com/.*")?)?;
//! assert!(service.is_whitelisted("https://api.example.com/v1")?);
//! assert!(!service.is_whitelisted("https://example.com/")?);
//! # Ok(())
//! # }
//! ```

pub mod mutation;
pub mod service;

pub use mutation::{add_entry, remove_entry};
pub use service::UrlWhitelistService;
