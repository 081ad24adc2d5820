//! Client error types.

use std::fmt;

use nextrace_pipeline::{PipelineError, StageError};
use tracing::debug;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Provider error.
    Provider(String),
    /// The pipeline halted.
    Pipeline(PipelineError),
}

impl ClientError {
    /// Lines to print on stderr for this error.
    ///
    /// A failed calendar fetch names the source on its own line, followed by
    /// the underlying cause. Nothing else is printed.
    pub fn report_lines(&self) -> Vec<String> {
        match self {
            Self::Pipeline(err) => match err.stage_error() {
                fetch @ StageError::Fetch { source, .. } => {
                    if source.code().is_transient() {
                        debug!(code = ?source.code(), "Fetch failure may be transient");
                    }
                    vec![fetch.to_string(), format!("error: {}", source)]
                }
                other => vec![format!("error: {}", other)],
            },
            other => vec![format!("error: {}", other)],
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Provider(msg) => write!(f, "provider error: {}", msg),
            Self::Pipeline(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pipeline(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PipelineError> for ClientError {
    fn from(err: PipelineError) -> Self {
        Self::Pipeline(err)
    }
}

impl From<nextrace_providers::ProviderError> for ClientError {
    fn from(err: nextrace_providers::ProviderError) -> Self {
        Self::Provider(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextrace_providers::ProviderError;

    #[test]
    fn fetch_failure_reports_two_lines() {
        let err = ClientError::from(PipelineError::StageFailed {
            stage: "fetch-calendar".to_string(),
            index: 1,
            source: StageError::fetch(
                "https://ergast.com/api/f1",
                ProviderError::not_found("Calendar not found").with_provider("http"),
            ),
        });

        assert_eq!(
            err.report_lines(),
            vec![
                "Cannot get calendar from https://ergast.com/api/f1".to_string(),
                "error: [http] not_found: Calendar not found".to_string(),
            ]
        );
    }

    #[test]
    fn transient_fetch_failure_reports_two_lines() {
        let err = ClientError::from(PipelineError::StageFailed {
            stage: "fetch-calendar".to_string(),
            index: 1,
            source: StageError::fetch(
                "https://ergast.com/api/f1",
                ProviderError::network("Request timed out after 30s"),
            ),
        });

        assert_eq!(
            err.report_lines(),
            vec![
                "Cannot get calendar from https://ergast.com/api/f1".to_string(),
                "error: network_error: Request timed out after 30s".to_string(),
            ]
        );
    }

    #[test]
    fn other_stage_failures_report_one_line() {
        let err = ClientError::from(PipelineError::StageFailed {
            stage: "display-next".to_string(),
            index: 2,
            source: StageError::invalid_state("display-next", "events have not been fetched"),
        });

        assert_eq!(
            err.report_lines(),
            vec!["error: Invalid state for stage 'display-next': events have not been fetched"]
        );
    }

    #[test]
    fn config_error_display() {
        let err = ClientError::Config("bad season".to_string());
        assert_eq!(err.to_string(), "configuration error: bad season");
        assert_eq!(err.report_lines(), vec!["error: configuration error: bad season"]);
    }

    #[test]
    fn pipeline_error_keeps_source() {
        use std::error::Error;

        let err = ClientError::from(PipelineError::StageFailed {
            stage: "display-next".to_string(),
            index: 2,
            source: StageError::invalid_state("display-next", "events have not been fetched"),
        });
        assert!(err.source().is_some());
        assert!(ClientError::Config("x".to_string()).source().is_none());
    }

    #[test]
    fn provider_error_conversion() {
        let err = ClientError::from(ProviderError::configuration("Invalid base URL"));
        assert!(matches!(err, ClientError::Provider(_)));
        assert_eq!(err.to_string(), "provider error: configuration_error: Invalid base URL");
    }
}
