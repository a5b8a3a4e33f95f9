//! # urlwhitelist-types
//!
//! Core types for the URL whitelist authority.
//!
//! - **[`entry`]** -- [`WhitelistEntry`] and its [`EntryType`] match strategy
//! - **[`whitelist`]** -- the immutable [`Whitelist`] snapshot and matcher
//! - **[`config`]** -- [`ClusterConfig`], the key under which a value is stored
//! - **[`error`]** -- [`WhitelistError`] and [`StoreError`]

pub mod config;
pub mod entry;
pub mod error;
pub mod whitelist;

pub use config::ClusterConfig;
pub use entry::{EntryType, WhitelistEntry};
pub use error::{Result, StoreError, StoreResult, WhitelistError};
pub use whitelist::Whitelist;
