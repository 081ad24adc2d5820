//! Time normalization for race events.
//!
//! This module provides [`PointInTime`], the single comparable representation
//! used when deciding which event comes next, and [`to_instant`] which builds
//! one either from an explicit instant or from a `(date, time)` pair as they
//! appear in calendar payloads (`"2021-05-09"` + `"13:00:00Z"`).
//!
//! Literals that cannot be resolved never panic. They become
//! [`PointInTime::Invalid`], which is unordered: every comparison involving it
//! is `false`, so an unresolvable event never matches as "next".

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::state::PipelineState;

/// Time of day assumed when a date is given without one.
pub const DEFAULT_TIME: &str = "00:00:00Z";

/// Errors produced when resolving a date-time literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    /// The concatenated literal is not a recognised date-time.
    #[error("invalid date-time literal '{literal}': {reason}")]
    InvalidLiteral { literal: String, reason: String },
}

/// A normalized point in time.
///
/// Ordering follows the wrapped UTC instant. An `Invalid` value compares as
/// neither smaller, equal nor greater than anything, itself included.
#[derive(Debug, Clone)]
pub enum PointInTime {
    /// A resolved instant in UTC.
    Valid(DateTime<Utc>),
    /// A literal that could not be resolved, kept for diagnostics.
    Invalid(String),
}

impl PointInTime {
    /// Creates a valid point in time from a UTC datetime.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::Valid(dt)
    }

    /// Returns `true` if the point in time was resolved.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Returns the resolved instant, if any.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Valid(dt) => Some(dt),
            Self::Invalid(_) => None,
        }
    }
}

impl PartialEq for PointInTime {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Valid(a), Self::Valid(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for PointInTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Valid(a), Self::Valid(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for PointInTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Invalid(literal) => write!(f, "invalid ({literal})"),
        }
    }
}

/// Inputs accepted by [`to_instant`].
///
/// When `explicit` is set it is returned as is and `date`/`time` are not
/// looked at.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantOptions<'a> {
    /// A caller-supplied instant, typically "now".
    pub explicit: Option<DateTime<Utc>>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: Option<&'a str>,
    /// Time of day with zone marker, `HH:MM:SSZ`.
    pub time: Option<&'a str>,
}

impl<'a> InstantOptions<'a> {
    /// Options carrying only an explicit instant.
    pub fn explicit(instant: DateTime<Utc>) -> Self {
        Self {
            explicit: Some(instant),
            ..Default::default()
        }
    }

    /// Options carrying a date and a time of day.
    pub fn date_time(date: &'a str, time: &'a str) -> Self {
        Self {
            explicit: None,
            date: Some(date),
            time: Some(time),
        }
    }

    /// Builder: set the explicit instant.
    #[must_use]
    pub fn with_explicit(mut self, instant: DateTime<Utc>) -> Self {
        self.explicit = Some(instant);
        self
    }
}

/// Resolves the given options into a [`PointInTime`].
///
/// The date and time are joined as `"{date}T{time}"`. A missing part leaves
/// a literal that cannot parse, which yields [`PointInTime::Invalid`].
pub fn to_instant(options: &InstantOptions<'_>) -> PointInTime {
    if let Some(instant) = options.explicit {
        return PointInTime::Valid(instant);
    }

    let date = options.date.unwrap_or_default();
    let time = options.time.unwrap_or_default();
    match parse_date_time(date, time) {
        Ok(dt) => PointInTime::Valid(dt),
        Err(TimeError::InvalidLiteral { literal, .. }) => PointInTime::Invalid(literal),
    }
}

/// Parses a `(date, time)` pair into a UTC instant.
///
/// Accepts RFC 3339 (`2021-05-09T13:00:00+02:00`, `...Z`, fractional
/// seconds). A literal without an offset is read as UTC.
pub fn parse_date_time(date: &str, time: &str) -> Result<DateTime<Utc>, TimeError> {
    let literal = format!("{date}T{time}");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&literal) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(&literal, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&literal, "%Y-%m-%dT%H:%M"));
    match naive {
        Ok(naive) => Ok(naive.and_utc()),
        Err(e) => Err(TimeError::InvalidLiteral {
            literal,
            reason: e.to_string(),
        }),
    }
}

/// Resolves the "as of" instant of a pipeline state against the wall clock.
pub fn resolve_reference(state: &PipelineState) -> PointInTime {
    resolve_reference_at(state, Utc::now())
}

/// Resolves the "as of" instant of a pipeline state.
///
/// Uses `state.reference.date` (with the time defaulting to midnight UTC)
/// when set, otherwise `now`. A reference time without a date is ignored.
pub fn resolve_reference_at(state: &PipelineState, now: DateTime<Utc>) -> PointInTime {
    let reference = &state.reference;
    match reference.date.as_deref() {
        Some(date) => {
            let time = reference.time.as_deref().unwrap_or(DEFAULT_TIME);
            to_instant(&InstantOptions::date_time(date, time))
        }
        None => to_instant(&InstantOptions::explicit(now)),
    }
}
