//! Ergast API addressing and response decoding.
//!
//! A season calendar lives at `{base}/{season}.json` and the events sit at
//! `MRData.RaceTable.Races`:
//!
//! ```text
//! {
//!   "MRData": {
//!     "series": "f1",
//!     "total": "22",
//!     "RaceTable": {
//!       "season": "2021",
//!       "Races": [ { "raceName": ..., "date": ..., "time": ... }, ... ]
//!     }
//!   }
//! }
//! ```
//!
//! Fields outside that path are ignored.

use serde::Deserialize;
use serde_json::error::Category;
use url::Url;

use nextrace_core::RaceEvent;

use crate::error::{ProviderError, ProviderResult};

/// Default base address of the Ergast Formula-1 API.
pub const DEFAULT_BASE_URL: &str = "https://ergast.com/api/f1";

/// Top-level Ergast response document.
#[derive(Debug, Clone, Deserialize)]
pub struct ErgastResponse {
    /// The payload envelope.
    #[serde(rename = "MRData")]
    pub mr_data: MrData,
}

/// The `MRData` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct MrData {
    /// Series identifier, e.g. `"f1"`.
    #[serde(default)]
    pub series: Option<String>,
    /// Total number of results, as a string.
    #[serde(default)]
    pub total: Option<String>,
    /// The race table.
    #[serde(rename = "RaceTable")]
    pub race_table: RaceTable,
}

/// The `RaceTable` object.
#[derive(Debug, Clone, Deserialize)]
pub struct RaceTable {
    /// The season the table describes.
    #[serde(default)]
    pub season: Option<String>,
    /// Events in calendar order.
    #[serde(rename = "Races")]
    pub races: Vec<RaceEvent>,
}

/// Builds the address of a season calendar.
///
/// A trailing `/` on `base` is ignored.
pub fn season_url(base: &str, season: &str) -> String {
    format!("{}/{}.json", base.trim_end_matches('/'), season)
}

/// Checks that `base` is an absolute http(s) address and returns it without
/// a trailing `/`.
pub fn validate_base_url(base: &str) -> ProviderResult<String> {
    let url = Url::parse(base).map_err(|e| {
        ProviderError::configuration(format!("Invalid base URL '{}': {}", base, e)).with_source(e)
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_string()),
        other => Err(ProviderError::configuration(format!(
            "Unsupported URL scheme '{}' in '{}'",
            other, base
        ))),
    }
}

/// Decodes a season calendar body.
///
/// # Errors
///
/// Returns an `InvalidResponse` error if the body is not JSON or if the
/// `MRData.RaceTable.Races` path is missing or has the wrong shape.
pub fn parse_race_table(body: &str) -> ProviderResult<RaceTable> {
    let response: ErgastResponse = serde_json::from_str(body).map_err(|e| {
        let message = match e.classify() {
            Category::Data => format!("Unexpected calendar shape: {}", e),
            Category::Syntax | Category::Eof | Category::Io => {
                format!("Malformed calendar JSON: {}", e)
            }
        };
        ProviderError::invalid_response(message).with_source(e)
    })?;

    tracing::debug!(
        series = response.mr_data.series.as_deref().unwrap_or("?"),
        total = response.mr_data.total.as_deref().unwrap_or("?"),
        races = response.mr_data.race_table.races.len(),
        "Decoded race table"
    );

    Ok(response.mr_data.race_table)
}
