//! Entry command handlers
//!
//! Each command opens the pipeline (which replays the journal into the
//! index), does its work, and shuts the writer down before exiting.

use std::io::Read;

use anyhow::{bail, Context, Result};

use daybook_core::{Config, PersistencePipeline, PipelineEvent, Severity};

use crate::output::Output;

/// Add a new entry and wait until it is durably written
pub async fn add(title: String, content: Option<String>, output: &Output) -> Result<()> {
    let content = match content {
        Some(c) => c,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read content from stdin")?;
            buf
        }
    };

    let config = Config::load().context("Failed to load configuration")?;
    let mut pipeline = PersistencePipeline::open(&config);
    let mut events = pipeline
        .take_events()
        .context("Event stream already taken")?;

    if let Err(e) = pipeline.submit(&title, &content) {
        pipeline.shutdown().await;
        bail!("{}", e);
    }

    // Wait for the writer to report the entry durable (or failed).
    let saved = loop {
        match events.recv().await {
            Some(PipelineEvent::EntrySaved(entry)) => break Some(entry),
            Some(PipelineEvent::Notification {
                message,
                severity: Severity::Error,
            }) => {
                output.error(&message);
                break None;
            }
            Some(_) => continue,
            None => break None,
        }
    };

    pipeline.shutdown().await;

    match saved {
        Some(entry) => {
            output.success(&format!("Saved '{}' at {}", entry.title, entry.timestamp));
            Ok(())
        }
        None => bail!("Entry was not saved"),
    }
}

/// List all entries, newest first
pub async fn list(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let pipeline = PersistencePipeline::open(&config);

    output.print_entries(&pipeline.entries());

    pipeline.shutdown().await;
    Ok(())
}

/// Search entries by title or content
pub async fn search(query: String, output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let pipeline = PersistencePipeline::open(&config);

    output.print_entries(&pipeline.search(&query));

    pipeline.shutdown().await;
    Ok(())
}
