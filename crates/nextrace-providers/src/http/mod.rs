//! HTTP calendar source.
//!
//! This module provides a [`CalendarSource`](crate::CalendarSource) backed
//! by `reqwest`:
//!
//! - [`HttpSourceConfig`] - timeout and user agent
//! - [`HttpCalendarSource`] - a GET-only client mapping statuses to
//!   [`ProviderError`](crate::ProviderError)s

mod client;
mod config;

pub use client::HttpCalendarSource;
pub use config::HttpSourceConfig;
