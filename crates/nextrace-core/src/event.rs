//! Race calendar events.
//!
//! This module provides:
//! - [`RaceEvent`]: one calendar entry as delivered by the data source
//! - [`find_next`]: selection of the first event at or after a reference
//!
//! Only `date` and `time` matter for selection. The payload itself is kept as
//! an ordered JSON object and written back out exactly as received, key order
//! included. Typed accessors read the few fields used for logging.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::time::{DEFAULT_TIME, InstantOptions, PointInTime, to_instant};

/// A single calendar entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaceEvent {
    fields: Map<String, Value>,
}

impl RaceEvent {
    /// Creates an event with the given date and optional start time.
    pub fn new(date: impl Into<String>, time: Option<&str>) -> Self {
        let event = Self::default().with_field("date", Value::String(date.into()));
        match time {
            Some(time) => event.with_field("time", Value::String(time.to_string())),
            None => event,
        }
    }

    /// Builder: set the event name.
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_field("raceName", Value::String(name.into()))
    }

    /// Builder: set the season and round.
    #[must_use]
    pub fn with_round(self, season: impl Into<String>, round: impl Into<String>) -> Self {
        self.with_field("season", Value::String(season.into()))
            .with_field("round", Value::String(round.into()))
    }

    /// Builder: set a field. A new key goes last, an existing one keeps its
    /// position.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// All fields, in payload order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns a field, whatever its type.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Season the event belongs to.
    pub fn season(&self) -> Option<&str> {
        self.str_field("season")
    }

    /// Round number within the season.
    pub fn round(&self) -> Option<&str> {
        self.str_field("round")
    }

    /// Human-readable event name.
    pub fn race_name(&self) -> Option<&str> {
        self.str_field("raceName")
    }

    /// Calendar date, `YYYY-MM-DD`.
    pub fn date(&self) -> Option<&str> {
        self.str_field("date")
    }

    /// Start time with zone marker, `HH:MM:SSZ`.
    pub fn time(&self) -> Option<&str> {
        self.str_field("time")
    }

    /// Returns a short label for logs.
    pub fn title(&self) -> String {
        match (self.race_name(), self.round()) {
            (Some(name), _) => name.to_string(),
            (None, Some(round)) => format!("round {round}"),
            (None, None) => "(unnamed event)".to_string(),
        }
    }

    /// Returns the normalized start of the event.
    ///
    /// A missing time defaults to midnight UTC. A missing, non-string or
    /// malformed date gives [`PointInTime::Invalid`].
    pub fn start_instant(&self) -> PointInTime {
        to_instant(&InstantOptions {
            explicit: None,
            date: self.date(),
            time: Some(self.time().unwrap_or(DEFAULT_TIME)),
        })
    }
}

/// Returns the first event, in slice order, starting at or after `reference`.
///
/// The boundary is inclusive. Events whose start cannot be resolved never
/// match, and nothing matches an invalid reference.
pub fn find_next<'a>(events: &'a [RaceEvent], reference: &PointInTime) -> Option<&'a RaceEvent> {
    events
        .iter()
        .find(|event| event.start_instant() >= *reference)
}
