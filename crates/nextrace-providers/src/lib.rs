//! Calendar sources and Ergast response decoding.
//!
//! This crate provides the data-access layer of nextrace:
//!
//! - [`CalendarSource`] - The trait every document source implements
//! - [`HttpCalendarSource`] - The production source, backed by `reqwest`
//! - [`StaticSource`] / [`ErrorSource`] - Canned sources for tests
//! - [`ergast`] - Season addressing and `MRData.RaceTable.Races` decoding
//! - [`ProviderError`] - Error types for source operations
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   Ergast API     │
//! └────────┬─────────┘
//!          │ GET {base}/{season}.json
//!          ▼
//! ┌──────────────────┐
//! │ CalendarSource   │  HttpCalendarSource / StaticSource / ErrorSource
//! └────────┬─────────┘
//!          │ body
//!          ▼ ergast::parse_race_table()
//! ┌──────────────────┐
//! │ Vec<RaceEvent>   │
//! └──────────────────┘
//! ```

pub mod ergast;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod source;

// Re-export main types at crate root
pub use ergast::{DEFAULT_BASE_URL, RaceTable, parse_race_table, season_url, validate_base_url};
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
#[cfg(feature = "http")]
pub use http::{HttpCalendarSource, HttpSourceConfig};
pub use source::{BoxFuture, CalendarSource, ErrorSource, StaticSource};
