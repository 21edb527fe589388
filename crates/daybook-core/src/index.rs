//! In-memory entry index
//!
//! Reverse-chronological cache of all durably written entries, rebuilt from
//! the journal at startup. The index never reorders existing entries and
//! never contains an entry absent from the log: it is populated by the
//! startup load and, after that, only by the background writer once an
//! append has succeeded.

use crate::models::Entry;

/// Newest-first view of all known entries
#[derive(Debug, Default)]
pub struct EntryIndex {
    entries: Vec<Entry>,
}

impl EntryIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Replace the index with entries loaded from disk (oldest first)
    ///
    /// The stored order is exactly the reverse of on-disk order.
    pub fn initialize(&mut self, oldest_first: Vec<Entry>) {
        self.entries = oldest_first;
        self.entries.reverse();
    }

    /// Prepend a newly written entry
    pub fn insert_front(&mut self, entry: Entry) {
        self.entries.insert(0, entry);
    }

    /// All entries, newest first
    pub fn all(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    /// Case-insensitive substring search over title and content
    ///
    /// An empty query returns everything; relative order is preserved.
    pub fn search(&self, query: &str) -> Vec<Entry> {
        if query.is_empty() {
            return self.all();
        }
        self.entries
            .iter()
            .filter(|e| e.matches(query))
            .cloned()
            .collect()
    }

    /// Number of entries in the index
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
