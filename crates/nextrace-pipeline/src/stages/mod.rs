//! The stages making up the default run.
//!
//! | Stage | Reads | Writes |
//! |-------|-------|--------|
//! | [`ConfigureSeason`] | - | `source_location`, `season` |
//! | [`FetchCalendar`] | `source_location`, `season` | `events` |
//! | [`DisplayNext`] | `events`, `reference` | - |

mod configure;
mod display;
mod fetch;

pub use configure::ConfigureSeason;
pub use display::DisplayNext;
pub use fetch::FetchCalendar;
