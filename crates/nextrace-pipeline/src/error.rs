//! Stage and pipeline error types.

use std::io;

use nextrace_providers::ProviderError;
use thiserror::Error;

/// Result type for a single stage.
pub type StageResult<T> = Result<T, StageError>;

/// Result type for a whole pipeline run.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors a stage can return. Every variant halts the pipeline.
#[derive(Debug, Error)]
pub enum StageError {
    /// The calendar could not be fetched or decoded.
    #[error("Cannot get calendar from {source_location}")]
    Fetch {
        source_location: String,
        #[source]
        source: ProviderError,
    },

    /// The stage ran against a state it cannot work with.
    #[error("Invalid state for stage '{stage}': {reason}")]
    InvalidState { stage: String, reason: String },

    /// The result could not be rendered.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    /// The result could not be written.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl StageError {
    /// Creates an invalid state error.
    pub fn invalid_state(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidState {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Creates a fetch error.
    pub fn fetch(source_location: impl Into<String>, source: ProviderError) -> Self {
        Self::Fetch {
            source_location: source_location.into(),
            source,
        }
    }
}

/// Errors returned by [`Pipeline::run`](crate::Pipeline::run).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage failed; no later stage was run.
    #[error("Stage '{stage}' (#{index}) failed: {source}")]
    StageFailed {
        stage: String,
        index: usize,
        #[source]
        source: StageError,
    },
}

impl PipelineError {
    /// Name of the stage that halted the pipeline.
    pub fn stage(&self) -> &str {
        match self {
            Self::StageFailed { stage, .. } => stage,
        }
    }

    /// Zero-based position of the stage that halted the pipeline.
    pub fn index(&self) -> usize {
        match self {
            Self::StageFailed { index, .. } => *index,
        }
    }

    /// The error returned by the stage.
    pub fn stage_error(&self) -> &StageError {
        match self {
            Self::StageFailed { source, .. } => source,
        }
    }
}
