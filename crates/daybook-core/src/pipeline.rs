//! Persistence pipeline
//!
//! Decouples interactive entry submission from disk I/O. Submissions enter a
//! FIFO queue; a single long-lived background task drains it, appends each
//! entry to the journal, and publishes the entry to the in-memory index once
//! it is durable. Entries are written, and inserted into the index, in
//! exactly the order they were submitted.
//!
//! The [`PersistencePipeline`] is the one context object owning the queue,
//! the shared index, and the stop signal; it is constructed once per process
//! and handed to the presentation layer. Status is reported back through a
//! [`PipelineEvent`] stream: `EntrySaved` is the refresh trigger, and
//! `Notification` carries a `(message, severity)` pair for the status line.
//!
//! Entries still queued when shutdown fires are dropped; durability is only
//! guaranteed once a save event has been observed.

use std::sync::{Arc, RwLock};

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::codec;
use crate::config::Config;
use crate::index::EntryIndex;
use crate::models::Entry;
use crate::storage::LogStore;

/// Notification severity, mirrored to the presentation layer's status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation completed
    Success,
    /// Operation failed
    Error,
    /// Progress or advisory message
    Info,
}

/// Events emitted by the pipeline for the presentation layer
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// An entry became durable and was added to the index; refresh views
    EntrySaved(Entry),
    /// Status notification
    Notification {
        message: String,
        severity: Severity,
    },
}

/// Rejected submissions, resolved synchronously before anything is queued
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Title was empty after trimming
    #[error("Title is required")]
    EmptyTitle,
    /// Content was empty after trimming
    #[error("Content is required")]
    EmptyContent,
}

/// The persistence pipeline: write queue, background writer, entry index
///
/// Reads (`entries`, `search`) are safe from the interactive context at any
/// time; the background writer is the sole mutator of the journal file and
/// the sole inserter into the index.
pub struct PersistencePipeline {
    queue_tx: mpsc::UnboundedSender<Entry>,
    index: Arc<RwLock<EntryIndex>>,
    event_tx: mpsc::UnboundedSender<PipelineEvent>,
    event_rx: Option<mpsc::UnboundedReceiver<PipelineEvent>>,
    shutdown_tx: watch::Sender<bool>,
    writer: Option<JoinHandle<()>>,
}

impl PersistencePipeline {
    /// Open the pipeline: load the journal into the index and start the
    /// background writer
    ///
    /// A journal that cannot be read is reported once through the event
    /// stream and treated as empty; startup never fails on a bad file.
    pub fn open(config: &Config) -> Self {
        let store = LogStore::new(config.journal_path());
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mut index = EntryIndex::new();
        match store.load_all() {
            Ok(entries) => {
                info!(
                    "Loaded {} entries from {}",
                    entries.len(),
                    store.path().display()
                );
                index.initialize(entries);
            }
            Err(e) => {
                warn!("Failed to load journal: {}", e);
                let _ = event_tx.send(PipelineEvent::Notification {
                    message: format!("Error loading entries: {}", e),
                    severity: Severity::Error,
                });
            }
        }

        let index = Arc::new(RwLock::new(index));
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let writer = tokio::spawn(writer_task(
            store,
            Arc::clone(&index),
            queue_rx,
            event_tx.clone(),
            shutdown_rx,
        ));

        Self {
            queue_tx,
            index,
            event_tx,
            event_rx: Some(event_rx),
            shutdown_tx,
            writer: Some(writer),
        }
    }

    /// Validate and queue an entry for writing
    ///
    /// Title and content are trimmed; either being empty is rejected here,
    /// before anything reaches the queue. On success the entry is stamped
    /// with the current local time and handed to the background writer —
    /// this call never blocks on disk I/O.
    pub fn submit(&self, title: &str, content: &str) -> Result<(), ValidationError> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        let entry = Entry::new(title, content);
        debug!("Queued entry '{}'", entry.title);
        self.notify("Saving...", Severity::Info);
        if self.queue_tx.send(entry).is_err() {
            warn!("Entry submitted after writer stopped; it will not be written");
        }
        Ok(())
    }

    /// Current reverse-chronological view of all entries
    pub fn entries(&self) -> Vec<Entry> {
        self.read_index().all()
    }

    /// Case-insensitive search over title and content
    ///
    /// Pure read; safe to call concurrently with an in-progress write.
    pub fn search(&self, query: &str) -> Vec<Entry> {
        self.read_index().search(query)
    }

    /// Take the event receiver (can only be called once)
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<PipelineEvent>> {
        self.event_rx.take()
    }

    /// Signal the writer to stop and wait for it to exit
    ///
    /// Entries still queued when the signal fires are dropped.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(writer) = self.writer.take() {
            let _ = writer.await;
        }
    }

    fn read_index(&self) -> std::sync::RwLockReadGuard<'_, EntryIndex> {
        self.index.read().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self, message: &str, severity: Severity) {
        let _ = self.event_tx.send(PipelineEvent::Notification {
            message: message.to_string(),
            severity,
        });
    }
}

/// Background writer loop
///
/// Blocks on the queue (no polling); the stop signal is checked with
/// priority over pending entries, so queued-but-unwritten entries are
/// dropped at shutdown.
async fn writer_task(
    store: LogStore,
    index: Arc<RwLock<EntryIndex>>,
    mut queue_rx: mpsc::UnboundedReceiver<Entry>,
    event_tx: mpsc::UnboundedSender<PipelineEvent>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            biased;

            _ = shutdown_rx.changed() => {
                debug!("Writer stopping; {} queued entries dropped", queue_rx.len());
                break;
            }
            next = queue_rx.recv() => {
                match next {
                    Some(entry) => write_entry(&store, &index, entry, &event_tx),
                    None => break,
                }
            }
        }
    }
}

/// Append one entry; on success publish it to the index and event stream
///
/// A failed append is reported once and the entry is discarded — it was
/// never durable, so it must not appear in the index. The writer then
/// continues with the next queued entry.
fn write_entry(
    store: &LogStore,
    index: &Arc<RwLock<EntryIndex>>,
    entry: Entry,
    event_tx: &mpsc::UnboundedSender<PipelineEvent>,
) {
    let block = codec::serialize(&entry);
    match store.append(&block) {
        Ok(()) => {
            index
                .write()
                .unwrap_or_else(|e| e.into_inner())
                .insert_front(entry.clone());
            let _ = event_tx.send(PipelineEvent::EntrySaved(entry));
            let _ = event_tx.send(PipelineEvent::Notification {
                message: "Saved successfully".to_string(),
                severity: Severity::Success,
            });
        }
        Err(e) => {
            warn!("Failed to append entry '{}': {}", entry.title, e);
            let _ = event_tx.send(PipelineEvent::Notification {
                message: format!("Error saving entry: {}", e),
                severity: Severity::Error,
            });
        }
    }
}
