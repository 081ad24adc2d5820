//! Pipeline state threaded between stages.
//!
//! A [`PipelineState`] is a snapshot. Stages receive it by shared reference
//! and hand back a new value, so every earlier snapshot stays intact.

use serde::{Deserialize, Serialize};

use crate::event::RaceEvent;

/// The user-supplied "as of" point.
///
/// Both fields absent means "use the wall clock".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Time of day with zone marker, `HH:MM:SSZ`.
    pub time: Option<String>,
}

impl Reference {
    /// A reference meaning "now".
    pub fn now() -> Self {
        Self::default()
    }

    /// A reference at midnight UTC on the given date.
    pub fn on(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            time: None,
        }
    }

    /// A reference at the given date and time.
    pub fn at(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            time: Some(time.into()),
        }
    }

    /// Returns `true` when the wall clock should be used.
    pub fn is_now(&self) -> bool {
        self.date.is_none()
    }
}

/// How far a state has progressed through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No source has been configured yet.
    Unconfigured,
    /// Source and season are set, events not fetched.
    Configured,
    /// Events have been fetched (possibly none).
    Fetched,
}

impl Phase {
    /// Returns a short name for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::Configured => "configured",
            Self::Fetched => "fetched",
        }
    }
}

/// Application progress passed from stage to stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    /// Base address of the remote calendar API.
    pub source_location: Option<String>,
    /// Identifier of the season to fetch (e.g. `"2021"`).
    pub season: Option<String>,
    /// Events of the season in source order; `None` until fetched.
    pub events: Option<Vec<RaceEvent>>,
    /// The "as of" point events are compared against.
    pub reference: Reference,
}

impl PipelineState {
    /// Creates the initial, empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the reference point.
    #[must_use]
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = reference;
        self
    }

    /// Returns a copy with the source location and season set.
    #[must_use]
    pub fn configured(&self, source_location: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            source_location: Some(source_location.into()),
            season: Some(season.into()),
            ..self.clone()
        }
    }

    /// Returns a copy with the fetched events set.
    #[must_use]
    pub fn with_events(&self, events: Vec<RaceEvent>) -> Self {
        Self {
            events: Some(events),
            ..self.clone()
        }
    }

    /// Returns the phase derived from which fields are populated.
    pub fn phase(&self) -> Phase {
        if self.events.is_some() {
            Phase::Fetched
        } else if self.source_location.is_some() && self.season.is_some() {
            Phase::Configured
        } else {
            Phase::Unconfigured
        }
    }
}
