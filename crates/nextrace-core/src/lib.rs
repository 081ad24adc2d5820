//! Core types: time normalization, race events, pipeline state, formatting

pub mod event;
pub mod format;
pub mod state;
pub mod time;
pub mod tracing;

pub use event::{RaceEvent, find_next};
pub use format::{FormatOptions, JsonOutput, OutputFormat, OutputFormatter};
pub use state::{Phase, PipelineState, Reference};
pub use time::{
    DEFAULT_TIME, InstantOptions, PointInTime, TimeError, parse_date_time, resolve_reference,
    resolve_reference_at, to_instant,
};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
