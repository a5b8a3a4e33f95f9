//! A single whitelist rule.
//!
//! [`WhitelistEntry`] is an immutable record: an opaque `id`, a display
//! `title`, the [`EntryType`] match strategy and the `value` it applies to.
//! Only `entry_type` and `value` take part in matching.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WhitelistError};

/// How an entry's value is compared against a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Byte-for-byte equality, no normalization.
    #[serde(alias = "literal")]
    Exact,
    /// The value is a regular expression that must match the whole URL.
    Regex,
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Regex => write!(f, "regex"),
        }
    }
}

/// One allow-list rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawEntry")]
pub struct WhitelistEntry {
    id: String,
    title: String,
    #[serde(rename = "type")]
    entry_type: EntryType,
    value: String,
}

/// Wire shape of an entry before validation.
#[derive(Deserialize)]
struct RawEntry {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "type")]
    entry_type: EntryType,
    value: String,
}

impl TryFrom<RawEntry> for WhitelistEntry {
    type Error = WhitelistError;

    fn try_from(raw: RawEntry) -> Result<Self> {
        Self::new(raw.id, raw.title, raw.entry_type, raw.value)
    }
}

impl WhitelistEntry {
    /// Create an entry, rejecting an empty `id` or `value`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        entry_type: EntryType,
        value: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        let value = value.into();

        if id.is_empty() {
            return Err(WhitelistError::InvalidEntry {
                reason: "id must not be empty".into(),
            });
        }
        if value.is_empty() {
            return Err(WhitelistError::InvalidEntry {
                reason: format!("value of entry '{id}' must not be empty"),
            });
        }

        Ok(Self {
            id,
            title: title.into(),
            entry_type,
            value,
        })
    }

    /// Shorthand for an [`EntryType::Exact`] entry.
    pub fn exact(
        id: impl Into<String>,
        title: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        Self::new(id, title, EntryType::Exact, value)
    }

    /// Shorthand for an [`EntryType::Regex`] entry.
    pub fn regex(
        id: impl Into<String>,
        title: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        Self::new(id, title, EntryType::Regex, value)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Check whether this entry permits `url`.
    ///
    /// Regex entries are anchored at both ends: `http://x/.*` does not
    /// match `evil://http://x/`. A pattern that fails to compile yields
    /// [`WhitelistError::MalformedPattern`].
    pub fn matches(&self, url: &str) -> Result<bool> {
        match self.entry_type {
            EntryType::Exact => Ok(self.value == url),
            EntryType::Regex => Ok(self.compile()?.is_match(url)),
        }
    }

    /// Compile the pattern without matching anything.
    ///
    /// Always succeeds for exact entries.
    pub fn validate_pattern(&self) -> Result<()> {
        match self.entry_type {
            EntryType::Exact => Ok(()),
            EntryType::Regex => self.compile().map(|_| ()),
        }
    }

    // The bare value must compile first: an unbalanced value such as
    // `a)|(.*` would otherwise close the group and escape the anchors.
    fn compile(&self) -> Result<Regex> {
        let malformed = |source: regex::Error| WhitelistError::MalformedPattern {
            pattern: self.value.clone(),
            source,
        };
        Regex::new(&self.value).map_err(malformed)?;
        Regex::new(&format!("^(?:{})$", self.value)).map_err(malformed)
    }
}
