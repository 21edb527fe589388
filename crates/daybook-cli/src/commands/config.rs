//! Config command handlers

use anyhow::{bail, Context, Result};

use daybook_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "journal_file": config.journal_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.journal_file.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  journal_file: {}", config.journal_file.display());
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "journal_file" => {
            config.journal_file = value.clone().into();
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: journal_file",
                key
            );
        }
    }

    config.save().context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}
