//! Error types for the URL whitelist.
//!
//! [`WhitelistError`] covers entry validation, pattern compilation and the
//! defensive duplicate check performed during mutation. [`StoreError`] is
//! raised by configuration-store implementations and passes through
//! [`WhitelistError::Store`] untouched.

use thiserror::Error;

/// Top-level error type for whitelist operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WhitelistError {
    /// An entry was constructed with an empty `id` or `value`.
    #[error("invalid whitelist entry: {reason}")]
    InvalidEntry {
        /// What is wrong with the entry.
        reason: String,
    },

    /// The stored entry list already contained the same id twice.
    ///
    /// Never produced from a list that was only ever mutated through the
    /// authority; seeing it means the stored snapshot was corrupted.
    #[error("duplicate whitelist entry id '{id}'")]
    DuplicateEntry {
        /// The id that appeared more than once.
        id: String,
    },

    /// A `regex` entry whose value does not compile.
    #[error("malformed pattern '{pattern}': {source}")]
    MalformedPattern {
        /// The pattern as stored in the entry.
        pattern: String,
        /// The compiler error.
        #[source]
        source: regex::Error,
    },

    /// A configuration-store fault.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by a configuration store.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization / deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored record exists but cannot be used.
    #[error("corrupt config record '{key}': {reason}")]
    Corrupt {
        /// Key of the offending record.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// A convenience alias used throughout the whitelist crates.
pub type Result<T> = std::result::Result<T, WhitelistError>;

/// Result alias for configuration-store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
