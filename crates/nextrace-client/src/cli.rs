//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nextrace_core::{OutputFormat, TracingOutputFormat};

/// nextrace - The next race of the season at a glance
#[derive(Debug, Parser)]
#[command(name = "nextrace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "NEXTRACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log line format on stderr: pretty, compact or json
    #[arg(long, env = "NEXTRACE_LOG_FORMAT")]
    pub log_format: Option<TracingOutputFormat>,

    // --- Source flags ---
    /// Base address of the calendar API
    #[arg(long, env = "NEXTRACE_BASE_URL")]
    pub base_url: Option<String>,

    /// Season to read, a year or "current"
    #[arg(long)]
    pub season: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    // --- Reference flags ---
    /// Reference date (YYYY-MM-DD) instead of now
    #[arg(long)]
    pub date: Option<String>,

    /// Reference time of day (HH:MM:SSZ), used with --date
    #[arg(long, requires = "date")]
    pub time: Option<String>,

    // --- Output flags ---
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Line printed above the next event
    #[arg(long)]
    pub label: Option<String>,

    /// Text to show when there is no upcoming event
    #[arg(long)]
    pub no_event_text: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the output format forced by CLI flags, if any.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.json.then_some(OutputFormat::Json)
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
