//! Data models for daybook
//!
//! Defines the `Entry` record persisted to the journal.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Timestamp format used on disk and in listings (second resolution)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single timestamped journal entry
///
/// Title and content are trimmed before storage; both are non-empty for any
/// entry that went through validation. Entries are never mutated or deleted
/// once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    /// When the entry was submitted, formatted with [`TIMESTAMP_FORMAT`]
    pub timestamp: String,
    /// Entry title
    pub title: String,
    /// Entry body
    pub content: String,
}

impl Entry {
    /// Create a new entry stamped with the current local time
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::from_parts(
            Local::now().format(TIMESTAMP_FORMAT).to_string(),
            title,
            content,
        )
    }

    /// Create an entry from known parts (used when reloading from disk)
    pub fn from_parts(
        timestamp: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into().trim().to_string(),
            title: title.into().trim().to_string(),
            content: content.into().trim().to_string(),
        }
    }

    /// Case-insensitive substring match against title or content
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
    }
}
