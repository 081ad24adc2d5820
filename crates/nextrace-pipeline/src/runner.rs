//! Sequential pipeline runner.
//!
//! [`Pipeline::run`] folds the registered stages over an initial state, left
//! to right. Each stage is awaited to completion before the next one starts,
//! so a stage always sees the cumulative result of every stage before it.
//! The first error stops the fold.

use std::time::Instant;

use nextrace_core::PipelineState;
use tracing::{Instrument, debug, info, info_span};

use crate::error::{PipelineError, PipelineResult};
use crate::stage::Stage;

/// An ordered, fixed list of stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pipeline from already boxed stages.
    pub fn from_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Builder: append a stage.
    #[must_use]
    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Number of registered stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if no stage is registered.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Runs every stage in order, threading the state through.
    ///
    /// Returns the state produced by the last stage, or the initial state for
    /// an empty pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::StageFailed`] for the first stage that fails.
    /// Stages after it are never invoked.
    pub async fn run(&self, initial: PipelineState) -> PipelineResult<PipelineState> {
        let mut state = initial;

        for (index, stage) in self.stages.iter().enumerate() {
            let name = stage.name();
            let span = info_span!("stage", stage = name, index);
            let started = Instant::now();
            debug!(stage = name, index, phase = state.phase().as_str(), "Running stage");

            let result = stage.run(&state).instrument(span).await;
            match result {
                Ok(next) => {
                    debug!(
                        stage = name,
                        index,
                        phase = next.phase().as_str(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Stage finished"
                    );
                    state = next;
                }
                Err(source) => {
                    debug!(stage = name, index, error = %source, "Stage failed, halting pipeline");
                    return Err(PipelineError::StageFailed {
                        stage: name.to_string(),
                        index,
                        source,
                    });
                }
            }
        }

        info!(
            stages = self.stages.len(),
            phase = state.phase().as_str(),
            "Pipeline finished"
        );
        Ok(state)
    }
}
