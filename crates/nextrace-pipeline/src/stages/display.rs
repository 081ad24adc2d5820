//! Display stage: selects the next event and writes it out.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use nextrace_core::{
    OutputFormatter, PipelineState, PointInTime, find_next, resolve_reference, resolve_reference_at,
};
use nextrace_providers::BoxFuture;
use tracing::{debug, info, warn};

use crate::error::{StageError, StageResult};
use crate::stage::Stage;

const STAGE_NAME: &str = "display-next";

/// Writes the first event at or after the state's reference instant.
///
/// The state is returned unchanged.
pub struct DisplayNext {
    formatter: OutputFormatter,
    writer: Mutex<Box<dyn Write + Send>>,
    now: Option<DateTime<Utc>>,
}

impl DisplayNext {
    /// Creates the stage writing to standard output.
    pub fn new(formatter: OutputFormatter) -> Self {
        Self::with_writer(formatter, io::stdout())
    }

    /// Creates the stage writing to `writer`.
    pub fn with_writer(formatter: OutputFormatter, writer: impl Write + Send + 'static) -> Self {
        Self {
            formatter,
            writer: Mutex::new(Box::new(writer)),
            now: None,
        }
    }

    /// Builder: use a fixed instant instead of the wall clock for "now".
    #[must_use]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    fn reference(&self, state: &PipelineState) -> PointInTime {
        match self.now {
            Some(now) => resolve_reference_at(state, now),
            None => resolve_reference(state),
        }
    }

    fn execute(&self, state: &PipelineState) -> StageResult<PipelineState> {
        let Some(events) = state.events.as_deref() else {
            return Err(StageError::invalid_state(
                STAGE_NAME,
                "events have not been fetched",
            ));
        };

        let reference = self.reference(state);
        match &reference {
            PointInTime::Valid(at) => debug!(reference = %at, "Resolved reference instant"),
            PointInTime::Invalid(literal) => {
                warn!(literal = %literal, "Reference instant cannot be resolved, nothing will match");
            }
        }

        for event in events.iter().filter(|e| !e.start_instant().is_valid()) {
            warn!(
                event = %event.title(),
                date = event.date().unwrap_or_default(),
                time = event.time().unwrap_or_default(),
                "Skipping event with unresolvable start"
            );
        }

        let next = find_next(events, &reference);
        match next {
            Some(event) => info!(event = %event.title(), "Found next event"),
            None => info!(events = events.len(), "No upcoming event"),
        }

        let rendered = self.formatter.format_next(next)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| StageError::Output(io::Error::other("output writer lock poisoned")))?;
        writeln!(writer, "{}", rendered)?;
        writer.flush()?;

        Ok(state.clone())
    }
}

impl Stage for DisplayNext {
    fn name(&self) -> &str {
        STAGE_NAME
    }

    fn run<'a>(&'a self, state: &'a PipelineState) -> BoxFuture<'a, StageResult<PipelineState>> {
        Box::pin(async move { self.execute(state) })
    }
}
