//! Storage layer
//!
//! The append-only journal file and its typed errors.
//!
//! Appends are whole serialized blocks, synced to disk before success is
//! reported. Reads load the complete file and hand it to the codec; the
//! in-memory index is rebuilt from this file at every startup.

pub mod error;
pub mod log;

pub use error::{StorageError, StorageResult};
pub use log::LogStore;
