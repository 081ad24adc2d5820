//! Season source configuration.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use nextrace_providers::DEFAULT_BASE_URL;

/// Which season the configure stage selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SeasonSelector {
    /// The season of the current local calendar year.
    #[default]
    Current,
    /// A fixed season identifier such as `"2021"`.
    Fixed(String),
}

impl SeasonSelector {
    /// Parses a user supplied selector. `"current"` (any case) and the empty
    /// string select the current year, four digits pin a season.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected value for anything else.
    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("current") {
            Ok(Self::Current)
        } else if value.len() == 4 && value.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self::Fixed(value.to_string()))
        } else {
            Err(format!("season must be a year or \"current\", got '{}'", value))
        }
    }

    /// Resolves the selector to a season identifier using today's local date.
    pub fn resolve(&self) -> String {
        self.resolve_at(Local::now().date_naive())
    }

    /// Resolves the selector to a season identifier as of `today`.
    pub fn resolve_at(&self, today: NaiveDate) -> String {
        match self {
            Self::Current => today.year().to_string(),
            Self::Fixed(season) => season.clone(),
        }
    }
}

impl fmt::Display for SeasonSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Fixed(season) => f.write_str(season),
        }
    }
}

/// Where the calendar lives and which season to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonConfig {
    /// Base address of the calendar API.
    pub base_url: String,

    /// Season to fetch.
    pub season: SeasonSelector,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            season: SeasonSelector::Current,
        }
    }
}

impl SeasonConfig {
    /// Creates a configuration for the given base address.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Builder: set the season selector.
    pub fn with_season(mut self, season: SeasonSelector) -> Self {
        self.season = season;
        self
    }

    /// Builder: pin a fixed season.
    pub fn with_fixed_season(self, season: impl Into<String>) -> Self {
        self.with_season(SeasonSelector::Fixed(season.into()))
    }
}
