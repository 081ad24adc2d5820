//! Configure stage: records where the calendar lives and which season to read.

use chrono::NaiveDate;
use nextrace_core::PipelineState;
use nextrace_providers::BoxFuture;
use tracing::debug;

use crate::config::SeasonConfig;
use crate::error::StageResult;
use crate::stage::Stage;

/// Sets `source_location` and `season` on the state. Never fails.
#[derive(Debug, Clone, Default)]
pub struct ConfigureSeason {
    config: SeasonConfig,
    today: Option<NaiveDate>,
}

impl ConfigureSeason {
    /// Creates the stage from a season configuration.
    pub fn new(config: SeasonConfig) -> Self {
        Self {
            config,
            today: None,
        }
    }

    /// Builder: resolve the current season against a fixed date.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SeasonConfig {
        &self.config
    }

    fn season(&self) -> String {
        match self.today {
            Some(today) => self.config.season.resolve_at(today),
            None => self.config.season.resolve(),
        }
    }
}

impl Stage for ConfigureSeason {
    fn name(&self) -> &str {
        "configure-season"
    }

    fn run<'a>(&'a self, state: &'a PipelineState) -> BoxFuture<'a, StageResult<PipelineState>> {
        let season = self.season();
        debug!(source = %self.config.base_url, season = %season, "Configured season");
        let next = state.configured(&self.config.base_url, season);
        Box::pin(async move { Ok(next) })
    }
}
