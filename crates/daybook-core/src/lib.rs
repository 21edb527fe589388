//! daybook Core Library
//!
//! This crate provides the persistence pipeline behind daybook, a
//! single-user local journal: an append-only plain-text log, a background
//! single-writer task that decouples entry submission from disk I/O, and an
//! in-memory reverse-chronological index rebuilt from the log at startup.
//!
//! # Architecture
//!
//! - **Journal file**: sole source of truth, append-only text blocks
//! - **Background writer**: the only task that touches the file
//! - **Entry index**: derived, rebuildable cache served to the UI
//!
//! The interactive side never blocks on disk I/O: it enqueues entries and
//! reads the index, nothing more.
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut pipeline = PersistencePipeline::open(&config);
//! let mut events = pipeline.take_events().unwrap();
//!
//! pipeline.submit("Morning run", "Felt great today.")?;
//! // drain `events` for refresh triggers and status notifications
//! pipeline.shutdown().await;
//! ```
//!
//! # Modules
//!
//! - `pipeline`: write queue, background writer, and the pipeline facade
//! - `codec`: on-disk block format (serialize/parse)
//! - `storage`: the append-only journal file
//! - `index`: in-memory reverse-chronological view with search
//! - `models`: the `Entry` record
//! - `config`: application configuration

pub mod codec;
pub mod config;
pub mod index;
pub mod models;
pub mod pipeline;
pub mod storage;

pub use config::Config;
pub use index::EntryIndex;
pub use models::Entry;
pub use pipeline::{PersistencePipeline, PipelineEvent, Severity, ValidationError};
pub use storage::{LogStore, StorageError};
