//! Sequential stage pipeline for nextrace.
//!
//! A run is a fixed list of [`Stage`]s folded over a [`PipelineState`]:
//!
//! ```text
//! PipelineState::new()
//!     │ ConfigureSeason   source_location, season
//!     ▼
//!     │ FetchCalendar     events            (fatal on failure)
//!     ▼
//!     │ DisplayNext       writes the next event
//!     ▼
//! final state
//! ```
//!
//! Stages run one at a time, in registration order. The first
//! [`StageError`] stops the run and is reported as a [`PipelineError`].

pub mod config;
pub mod error;
pub mod runner;
pub mod stage;
pub mod stages;
#[cfg(test)]
mod test_support;

pub use config::{SeasonConfig, SeasonSelector};
pub use error::{PipelineError, PipelineResult, StageError, StageResult};
pub use runner::Pipeline;
pub use stage::Stage;
pub use stages::{ConfigureSeason, DisplayNext, FetchCalendar};

use std::sync::Arc;

use nextrace_core::OutputFormatter;
use nextrace_providers::CalendarSource;

/// Builds the standard configure, fetch and display pipeline.
pub fn calendar_pipeline(
    config: SeasonConfig,
    source: Arc<dyn CalendarSource>,
    display: DisplayNext,
) -> Pipeline {
    Pipeline::new()
        .with_stage(ConfigureSeason::new(config))
        .with_stage(FetchCalendar::new(source))
        .with_stage(display)
}

/// Same as [`calendar_pipeline`], printing to standard output.
pub fn default_pipeline(
    config: SeasonConfig,
    source: Arc<dyn CalendarSource>,
    formatter: OutputFormatter,
) -> Pipeline {
    calendar_pipeline(config, source, DisplayNext::new(formatter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use nextrace_core::{FormatOptions, OutputFormat, PipelineState, Reference};
    use nextrace_providers::{ErrorSource, ProviderError, StaticSource};

    use crate::test_support::SharedBuffer;

    const SEASON_2021: &str = r#"{
        "MRData": {
            "series": "f1",
            "total": "3",
            "RaceTable": {
                "season": "2021",
                "Races": [
                    {"season": "2021", "round": "4", "raceName": "Spanish Grand Prix", "date": "2021-05-09", "time": "13:00:00Z"},
                    {"season": "2021", "round": "5", "raceName": "Monaco Grand Prix", "date": "2021-05-23", "time": "13:00:00Z"},
                    {"season": "2021", "round": "6", "raceName": "Azerbaijan Grand Prix", "date": "2021-06-06", "time": "12:00:00Z"}
                ]
            }
        }
    }"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 5, 1).unwrap()
    }

    fn pipeline(
        source: Arc<dyn CalendarSource>,
        format: OutputFormat,
    ) -> (Pipeline, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let display = DisplayNext::with_writer(
            OutputFormatter::new(FormatOptions::default().with_format(format)),
            buffer.clone(),
        )
        .with_now(Utc.with_ymd_and_hms(2021, 5, 10, 8, 0, 0).unwrap());
        let pipeline = Pipeline::new()
            .with_stage(ConfigureSeason::new(SeasonConfig::default()).with_today(today()))
            .with_stage(FetchCalendar::new(source))
            .with_stage(display);
        (pipeline, buffer)
    }

    fn next_race_name(buffer: &SharedBuffer) -> serde_json::Value {
        let value: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();
        value["next"]["raceName"].clone()
    }

    #[test]
    fn standard_pipeline_stage_order() {
        let pipeline = default_pipeline(
            SeasonConfig::default(),
            Arc::new(StaticSource::new(SEASON_2021)),
            OutputFormatter::new(FormatOptions::default()),
        );
        assert_eq!(
            pipeline.stage_names(),
            vec!["configure-season", "fetch-calendar", "display-next"]
        );
    }

    #[tokio::test]
    async fn full_run_prints_next_event() {
        let source = Arc::new(StaticSource::new(SEASON_2021));
        let (pipeline, buffer) = pipeline(source.clone(), OutputFormat::Json);
        let initial = PipelineState::new().with_reference(Reference::on("2021-05-09"));

        let final_state = pipeline.run(initial).await.unwrap();

        assert_eq!(source.requests(), vec!["https://ergast.com/api/f1/2021.json"]);
        assert_eq!(next_race_name(&buffer), "Spanish Grand Prix");
        assert_eq!(final_state.season.as_deref(), Some("2021"));
        assert_eq!(final_state.events.map(|events| events.len()), Some(3));
    }

    #[tokio::test]
    async fn wall_clock_reference_when_no_date_given() {
        let (pipeline, buffer) = pipeline(Arc::new(StaticSource::new(SEASON_2021)), OutputFormat::Json);

        pipeline.run(PipelineState::new()).await.unwrap();

        assert_eq!(next_race_name(&buffer), "Monaco Grand Prix");
    }

    #[tokio::test]
    async fn reference_after_last_event_prints_absence_text() {
        let (pipeline, buffer) =
            pipeline(Arc::new(StaticSource::new(SEASON_2021)), OutputFormat::Pretty);
        let initial = PipelineState::new().with_reference(Reference::on("2021-12-31"));

        pipeline.run(initial).await.unwrap();

        assert_eq!(buffer.contents(), "The next Formula-1 GP:\nNo upcoming event\n");
    }

    #[tokio::test]
    async fn fetch_failure_stops_before_display() {
        let source = Arc::new(ErrorSource::new(
            "http",
            ProviderError::server("Server error (503 Service Unavailable): maintenance"),
        ));
        let (pipeline, buffer) = pipeline(source, OutputFormat::Pretty);

        let err = pipeline.run(PipelineState::new()).await.unwrap_err();

        assert_eq!(err.stage(), "fetch-calendar");
        assert_eq!(err.index(), 1);
        assert_eq!(
            err.stage_error().to_string(),
            "Cannot get calendar from https://ergast.com/api/f1"
        );
        assert!(buffer.contents().is_empty());
    }
}
