//! daybook CLI
//!
//! Command-line interface for daybook - a local append-only journal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "daybook - local append-only journal")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a journal entry
    Add {
        /// Entry title
        title: String,
        /// Entry content (read from stdin when omitted)
        #[arg(short, long)]
        content: Option<String>,
    },
    /// List all entries, newest first
    #[command(alias = "ls")]
    List,
    /// Search entries by title or content
    Search {
        /// Search query
        query: String,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (journal_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Logs go to stderr so --json output stays machine-readable
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("daybook_core=warn,daybook_cli=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Commands::Add { title, content } => commands::entry::add(title, content, &output).await,
        Commands::List => commands::entry::list(&output).await,
        Commands::Search { query } => commands::entry::search(query, &output).await,
        Commands::Config { command } => match command {
            Some(ConfigCommands::Show) | None => commands::config::show(&output),
            Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, &output),
        },
    }
}
