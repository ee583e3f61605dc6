// Cache entry format.
// Entries are `{data, timestamp}` JSON strings keyed by `github_{owner}_{repo}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Freshness window: one hour.
pub const FRESHNESS_MS: i64 = 60 * 60 * 1000;

/// Store key for a repository's metadata.
pub fn cache_key(owner: &str, repo: &str) -> String {
    format!("github_{}_{}", owner, repo)
}

/// Repository metadata as fetched, with the time it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Raw response body; not validated against any schema.
    pub data: Value,
    /// Fetch time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(data: Value, timestamp: i64) -> Self {
        Self { data, timestamp }
    }

    /// Parse a stored entry.
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Encode for storage.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Age of the entry at `now`, in milliseconds.
    pub fn age(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }

    /// Whether the entry may be used without a network call at `now`.
    pub fn is_fresh(&self, now: i64) -> bool {
        self.age(now) < FRESHNESS_MS
    }
}

/// State of a key in the store, as reported by `folio cache`.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryState {
    Missing,
    Fresh { age_ms: i64 },
    Stale { age_ms: i64 },
    Corrupt(String),
    /// The store failed to read the key; the entry itself may be fine.
    Unreadable(String),
}

impl EntryState {
    /// Classify a raw stored value at `now`.
    pub fn classify(raw: Option<&str>, now: i64) -> Self {
        let Some(raw) = raw else {
            return EntryState::Missing;
        };
        match CacheEntry::parse(raw) {
            Ok(entry) if entry.is_fresh(now) => EntryState::Fresh {
                age_ms: entry.age(now),
            },
            Ok(entry) => EntryState::Stale {
                age_ms: entry.age(now),
            },
            Err(e) => EntryState::Corrupt(e.to_string()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryState::Missing => "missing",
            EntryState::Fresh { .. } => "fresh",
            EntryState::Stale { .. } => "stale",
            EntryState::Corrupt(_) => "corrupt",
            EntryState::Unreadable(_) => "unreadable",
        }
    }
}
