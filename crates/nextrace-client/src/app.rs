//! Wiring of the configure, fetch and display pipeline.
//!
//! Settings are merged in order of precedence: CLI flags, then the config
//! file, then built-in defaults.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use nextrace_core::{
    DEFAULT_TIME, FormatOptions, OutputFormatter, PipelineState, Reference, TracingConfig,
    parse_date_time,
};
use nextrace_pipeline::{SeasonConfig, SeasonSelector, default_pipeline};
use nextrace_providers::{HttpCalendarSource, HttpSourceConfig, validate_base_url};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Everything a run needs, resolved from the CLI and the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Calendar location and season.
    pub season: SeasonConfig,
    /// Output rendering.
    pub format: FormatOptions,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// The "as of" point.
    pub reference: Reference,
}

impl RunSettings {
    /// Merges CLI flags over the config file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] for an invalid base URL or season, a
    /// zero timeout, or a reference date/time that cannot be parsed.
    pub fn resolve(cli: &Cli, config: &ClientConfig) -> ClientResult<Self> {
        let raw_base = cli.base_url.as_deref().unwrap_or(&config.source.base_url);
        let base_url = validate_base_url(raw_base).map_err(|e| ClientError::Config(e.to_string()))?;

        let season = cli
            .season
            .as_deref()
            .or(config.source.season.as_deref())
            .map(SeasonSelector::parse)
            .transpose()
            .map_err(ClientError::Config)?
            .unwrap_or_default();

        let timeout = cli.timeout.unwrap_or(config.source.timeout);
        if timeout == 0 {
            return Err(ClientError::Config(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let mut format = config.display.to_format_options();
        if let Some(output_format) = cli.output_format() {
            format = format.with_format(output_format);
        }
        if let Some(ref label) = cli.label {
            format = format.with_label(label);
        }
        if let Some(ref text) = cli.no_event_text {
            format = format.with_no_event_text(text);
        }

        Ok(Self {
            season: SeasonConfig::new(base_url).with_season(season),
            format,
            timeout: Duration::from_secs(timeout),
            reference: resolve_reference(cli.date.as_deref(), cli.time.as_deref())?,
        })
    }

    /// Returns the initial pipeline state.
    pub fn initial_state(&self) -> PipelineState {
        PipelineState::new().with_reference(self.reference.clone())
    }
}

/// Validates the user supplied reference.
///
/// A malformed date or time is rejected here so the pipeline never starts
/// with a reference that cannot match anything.
fn resolve_reference(date: Option<&str>, time: Option<&str>) -> ClientResult<Reference> {
    let Some(date) = date else {
        if time.is_some() {
            return Err(ClientError::Config("--time requires --date".to_string()));
        }
        return Ok(Reference::now());
    };

    let at = parse_date_time(date, time.unwrap_or(DEFAULT_TIME))
        .map_err(|e| ClientError::Config(format!("invalid reference: {}", e)))?;
    debug!(reference = %at, "Using reference instant");

    Ok(match time {
        Some(time) => Reference::at(date, time),
        None => Reference::on(date),
    })
}

/// Builds the log setup from `--debug`, `--log-format` and the `[log]`
/// section.
///
/// # Errors
///
/// Returns [`ClientError::Config`] for an unknown `[log] level`.
pub fn tracing_config(cli: &Cli, config: &ClientConfig) -> ClientResult<TracingConfig> {
    let mut log = if cli.debug || config.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default()
    };

    if let Some(level) = config.log.parsed_level().map_err(ClientError::Config)? {
        log = log.with_level(level);
    }
    if let Some(ref filter) = config.log.filter {
        log = log.with_env_filter(filter);
    }

    Ok(log.with_format(cli.log_format.unwrap_or(config.log.format)))
}

/// Loads the config file named on the command line, or the default one.
///
/// # Errors
///
/// An explicitly named file must exist and parse. The default file is
/// optional.
pub fn load_config(path: Option<&Path>) -> ClientResult<ClientConfig> {
    match path {
        Some(path) => ClientConfig::load_from(path).map_err(ClientError::Config),
        None => ClientConfig::load().map_err(ClientError::Config),
    }
}

/// Fetches the season calendar and prints the next event.
///
/// # Errors
///
/// Returns [`ClientError::Pipeline`] when a stage halts the run.
pub async fn show_next(settings: RunSettings) -> ClientResult<()> {
    let source = HttpCalendarSource::new(HttpSourceConfig::new().with_timeout(settings.timeout))?;
    info!(
        base_url = %settings.season.base_url,
        season = %settings.season.season,
        "Looking up next event"
    );

    let initial = settings.initial_state();
    let pipeline = default_pipeline(
        settings.season,
        Arc::new(source),
        OutputFormatter::new(settings.format),
    );
    pipeline.run(initial).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use nextrace_core::{OutputFormat, TracingOutputFormat};
    use tracing::Level;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["nextrace"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn file_config() -> ClientConfig {
        toml::from_str(
            r#"
[source]
base_url = "http://localhost:8000/f1/"
season = "2020"
timeout = 10

[display]
label = "Next race:"
format = "json"
"#,
        )
        .unwrap()
    }

    #[test]
    fn defaults_without_file_or_flags() {
        let settings = RunSettings::resolve(&cli(&[]), &ClientConfig::default()).unwrap();

        assert_eq!(settings.season.base_url, "https://ergast.com/api/f1");
        assert_eq!(settings.season.season, SeasonSelector::Current);
        assert_eq!(settings.format, FormatOptions::default());
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(settings.reference.is_now());
    }

    #[test]
    fn file_overrides_defaults() {
        let settings = RunSettings::resolve(&cli(&[]), &file_config()).unwrap();

        assert_eq!(settings.season.base_url, "http://localhost:8000/f1");
        assert_eq!(settings.season.season, SeasonSelector::Fixed("2020".to_string()));
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.format.label, "Next race:");
        assert_eq!(settings.format.format, OutputFormat::Json);
        assert_eq!(settings.format.no_event_text, "No upcoming event");
    }

    #[test]
    fn flags_override_file() {
        let settings = RunSettings::resolve(
            &cli(&[
                "--base-url",
                "https://example.test/api/f1",
                "--season",
                "current",
                "--timeout",
                "3",
                "--label",
                "Up next:",
                "--no-event-text",
                "Season over",
            ]),
            &file_config(),
        )
        .unwrap();

        assert_eq!(settings.season.base_url, "https://example.test/api/f1");
        assert_eq!(settings.season.season, SeasonSelector::Current);
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.format.label, "Up next:");
        assert_eq!(settings.format.no_event_text, "Season over");
        assert_eq!(settings.format.format, OutputFormat::Json);
    }

    #[test]
    fn json_flag_forces_json() {
        let settings = RunSettings::resolve(&cli(&["--json"]), &ClientConfig::default()).unwrap();
        assert_eq!(settings.format.format, OutputFormat::Json);
    }

    #[test]
    fn reference_from_flags() {
        let settings = RunSettings::resolve(
            &cli(&["--date", "2021-05-09", "--time", "13:00:00Z"]),
            &ClientConfig::default(),
        )
        .unwrap();
        assert_eq!(settings.reference, Reference::at("2021-05-09", "13:00:00Z"));

        let state = settings.initial_state();
        assert_eq!(state.reference, Reference::at("2021-05-09", "13:00:00Z"));
        assert!(state.events.is_none());
    }

    #[test]
    fn date_alone_means_midnight() {
        let settings =
            RunSettings::resolve(&cli(&["--date", "2021-05-09"]), &ClientConfig::default()).unwrap();
        assert_eq!(settings.reference, Reference::on("2021-05-09"));
    }

    #[test]
    fn malformed_reference_is_rejected() {
        let err = RunSettings::resolve(&cli(&["--date", "09/05/2021"]), &ClientConfig::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(ref msg) if msg.starts_with("invalid reference")));

        let err = RunSettings::resolve(
            &cli(&["--date", "2021-05-09", "--time", "25:00:00Z"]),
            &ClientConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = RunSettings::resolve(
            &cli(&["--base-url", "ftp://example.test"]),
            &ClientConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = RunSettings::resolve(&cli(&["--timeout", "0"]), &ClientConfig::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn malformed_season_is_rejected() {
        let err = RunSettings::resolve(&cli(&["--season", "twenty"]), &ClientConfig::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(ref msg) if msg.contains("twenty")));

        let mut config = ClientConfig::default();
        config.source.season = Some("twenty".to_string());
        assert!(RunSettings::resolve(&cli(&[]), &config).is_err());
    }

    #[test]
    fn validate_and_resolve_agree_on_seasons() {
        for season in ["2021", "current", "", "twenty", "21"] {
            let mut config = ClientConfig::default();
            config.source.season = Some(season.to_string());
            assert_eq!(
                crate::commands::config::check(&config).is_ok(),
                RunSettings::resolve(&cli(&[]), &config).is_ok(),
                "season {season:?}"
            );
        }
    }

    #[test]
    fn time_without_date_is_rejected() {
        assert!(resolve_reference(None, Some("13:00:00Z")).is_err());
        assert_eq!(resolve_reference(None, None).unwrap(), Reference::now());
    }

    #[test]
    fn tracing_defaults_to_quiet_compact() {
        let tracing = tracing_config(&cli(&[]), &ClientConfig::default()).unwrap();
        assert_eq!(tracing.default_level, Level::WARN);
        assert_eq!(tracing.output_format, TracingOutputFormat::Compact);
        assert!(tracing.env_filter.is_none());
    }

    #[test]
    fn tracing_follows_log_section_and_flags() {
        let mut config = ClientConfig::default();
        config.log.format = TracingOutputFormat::Pretty;
        config.log.level = Some("info".to_string());
        config.log.filter = Some("nextrace_pipeline=trace".to_string());

        let tracing = tracing_config(&cli(&[]), &config).unwrap();
        assert_eq!(tracing.output_format, TracingOutputFormat::Pretty);
        assert_eq!(tracing.default_level, Level::INFO);
        assert_eq!(tracing.env_filter.as_deref(), Some("nextrace_pipeline=trace"));

        let tracing = tracing_config(&cli(&["--debug", "--log-format", "json"]), &config).unwrap();
        assert_eq!(tracing.output_format, TracingOutputFormat::Json);
        assert_eq!(tracing.default_level, Level::INFO);
        assert!(tracing.include_location);
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let mut config = ClientConfig::default();
        config.log.level = Some("loud".to_string());
        let err = tracing_config(&cli(&[]), &config).unwrap_err();
        assert!(matches!(err, ClientError::Config(ref msg) if msg.contains("loud")));
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("config.toml"))).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
