//! Fetch stage: reads the season calendar from a [`CalendarSource`].

use std::sync::Arc;

use nextrace_core::PipelineState;
use nextrace_providers::{BoxFuture, CalendarSource, ProviderResult, parse_race_table, season_url};
use tracing::{debug, info};

use crate::error::{StageError, StageResult};
use crate::stage::Stage;

const STAGE_NAME: &str = "fetch-calendar";

/// Fetches `{source_location}/{season}.json` and stores the decoded events.
///
/// Any transport or decoding failure is fatal for the run.
#[derive(Clone)]
pub struct FetchCalendar {
    source: Arc<dyn CalendarSource>,
}

impl FetchCalendar {
    /// Creates the stage over the given source.
    pub fn new(source: Arc<dyn CalendarSource>) -> Self {
        Self { source }
    }

    /// Returns the name of the underlying source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    async fn fetch(&self, url: &str) -> ProviderResult<Vec<nextrace_core::RaceEvent>> {
        let body = self.source.get(url).await?;
        let table = parse_race_table(&body)?;
        Ok(table.races)
    }

    async fn execute(&self, state: &PipelineState) -> StageResult<PipelineState> {
        let (Some(base), Some(season)) = (state.source_location.as_deref(), state.season.as_deref())
        else {
            return Err(StageError::invalid_state(
                STAGE_NAME,
                "source location and season must be configured first",
            ));
        };

        let url = season_url(base, season);
        debug!(url = %url, source = self.source.name(), "Fetching calendar");

        match self.fetch(&url).await {
            Ok(events) => {
                info!(season = %season, events = events.len(), "Fetched calendar");
                Ok(state.with_events(events))
            }
            Err(e) => {
                debug!(source_location = %base, error = %e, "Cannot get calendar");
                Err(StageError::fetch(base, e))
            }
        }
    }
}

impl Stage for FetchCalendar {
    fn name(&self) -> &str {
        STAGE_NAME
    }

    fn run<'a>(&'a self, state: &'a PipelineState) -> BoxFuture<'a, StageResult<PipelineState>> {
        Box::pin(self.execute(state))
    }
}
