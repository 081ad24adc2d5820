//! The Stage trait.
//!
//! A stage turns one [`PipelineState`] snapshot into the next. The input is
//! borrowed, so a stage can only derive a new value from it; the runner keeps
//! ownership of every snapshot.

use nextrace_core::PipelineState;
use nextrace_providers::BoxFuture;

use crate::error::StageResult;

/// A unit of pipeline work.
///
/// Stages share this single capability whatever they do (pure transform,
/// network fetch, terminal output). A stage must return the fields it does not
/// own unchanged.
///
/// # Example Implementation
///
/// ```ignore
/// struct SetSeason(String);
///
/// impl Stage for SetSeason {
///     fn name(&self) -> &str { "set-season" }
///
///     fn run<'a>(&'a self, state: &'a PipelineState) -> BoxFuture<'a, StageResult<PipelineState>> {
///         let next = PipelineState { season: Some(self.0.clone()), ..state.clone() };
///         Box::pin(async move { Ok(next) })
///     }
/// }
/// ```
pub trait Stage: Send + Sync {
    /// Returns the stage name used in logs and errors.
    fn name(&self) -> &str;

    /// Produces the next state from `state`.
    ///
    /// # Errors
    ///
    /// Any error is fatal: the runner stops and no later stage runs.
    fn run<'a>(&'a self, state: &'a PipelineState) -> BoxFuture<'a, StageResult<PipelineState>>;
}
