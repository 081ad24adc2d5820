//! Output formatting for the next event.
//!
//! This module renders the result of the "next event" lookup:
//! - **Pretty**: a label line followed by the pretty-printed event
//! - **JSON**: a single machine-readable document, `{"next": ...}`
//!
//! # Example
//!
//! ```rust
//! use nextrace_core::format::{FormatOptions, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(FormatOptions::default());
//! let output = formatter.format_next(None).unwrap();
//! assert_eq!(output, "The next Formula-1 GP:\nNo upcoming event");
//! ```

use serde::{Deserialize, Serialize};

use crate::event::RaceEvent;

/// Label printed above the event in pretty output.
pub const DEFAULT_LABEL: &str = "The next Formula-1 GP:";

/// Text printed when no event is left.
pub const DEFAULT_NO_EVENT_TEXT: &str = "No upcoming event";

/// The output format for the next event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Label line plus pretty-printed JSON of the event.
    #[default]
    Pretty,
    /// A single JSON document.
    Json,
}

/// Configuration options for output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Which output to produce.
    pub format: OutputFormat,
    /// Label line for pretty output.
    pub label: String,
    /// Absence indicator for pretty output.
    pub no_event_text: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Pretty,
            label: DEFAULT_LABEL.to_string(),
            no_event_text: DEFAULT_NO_EVENT_TEXT.to_string(),
        }
    }
}

impl FormatOptions {
    /// Builder: set the output format.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder: set the label line.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Builder: set the absence indicator.
    #[must_use]
    pub fn with_no_event_text(mut self, text: impl Into<String>) -> Self {
        self.no_event_text = text.into();
        self
    }
}

/// JSON output document.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// The next event, `null` when there is none.
    pub next: Option<&'a RaceEvent>,
}

/// Renders the next event according to [`FormatOptions`].
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a new formatter.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Returns the formatting options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats the lookup result in the configured format.
    pub fn format_next(&self, next: Option<&RaceEvent>) -> Result<String, serde_json::Error> {
        match self.options.format {
            OutputFormat::Pretty => self.format_pretty(next),
            OutputFormat::Json => self.format_json(next),
        }
    }

    /// Formats as a label line followed by the pretty-printed event.
    pub fn format_pretty(&self, next: Option<&RaceEvent>) -> Result<String, serde_json::Error> {
        let body = match next {
            Some(event) => serde_json::to_string_pretty(event)?,
            None => self.options.no_event_text.clone(),
        };
        Ok(format!("{}\n{}", self.options.label, body))
    }

    /// Formats as a single JSON document.
    pub fn format_json(&self, next: Option<&RaceEvent>) -> Result<String, serde_json::Error> {
        serde_json::to_string(&JsonOutput { next })
    }
}
