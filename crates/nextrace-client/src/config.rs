//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/nextrace/config.toml` by default:
//!
//! ```toml
//! debug = false
//!
//! [source]
//! base_url = "https://ergast.com/api/f1"
//! season = "2021"
//! timeout = 30
//!
//! [display]
//! label = "The next Formula-1 GP:"
//! no_event_text = "No upcoming event"
//! format = "pretty"
//!
//! [log]
//! format = "compact"
//! level = "info"
//! filter = "nextrace_pipeline=debug"
//! ```

use std::path::{Path, PathBuf};

use nextrace_core::format::{DEFAULT_LABEL, DEFAULT_NO_EVENT_TEXT};
use nextrace_core::{FormatOptions, OutputFormat, TracingOutputFormat};
use nextrace_providers::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Configuration for the nextrace client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Calendar source settings.
    #[serde(default)]
    pub source: SourceSettings,

    /// Display settings.
    #[serde(default)]
    pub display: DisplaySettings,

    /// Diagnostic log settings.
    #[serde(default)]
    pub log: LogSettings,
}

/// Diagnostic logging on stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log line format.
    pub format: TracingOutputFormat,

    /// Default level, such as `"info"`; `RUST_LOG` still wins when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Full filter directive; overrides both `level` and `RUST_LOG`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Where the calendar is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Base address of the calendar API.
    pub base_url: String,

    /// Season to read; the current year when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    /// HTTP request timeout in seconds.
    pub timeout: u64,
}

impl LogSettings {
    /// Parses `level`, if set.
    pub fn parsed_level(&self) -> Result<Option<Level>, String> {
        self.level
            .as_deref()
            .map(|level| {
                level
                    .parse()
                    .map_err(|_| format!("invalid [log] level '{}'", level))
            })
            .transpose()
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            season: None,
            timeout: 30,
        }
    }
}

/// Display settings for output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Line printed above the next event.
    pub label: String,

    /// Text to show when there is no upcoming event.
    pub no_event_text: String,

    /// Output format.
    pub format: OutputFormat,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            no_event_text: DEFAULT_NO_EVENT_TEXT.to_string(),
            format: OutputFormat::Pretty,
        }
    }
}

impl DisplaySettings {
    /// Converts to formatter options.
    pub fn to_format_options(&self) -> FormatOptions {
        FormatOptions::default()
            .with_format(self.format)
            .with_label(&self.label)
            .with_no_event_text(&self.no_event_text)
    }
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nextrace")
    }
}
