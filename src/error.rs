//! Error types for dispatch model construction and solving.
use thiserror::Error;

/// Errors surfaced by the dispatch model.
///
/// None of these are retried internally; a failed solve is reported once and leaves any previous
/// results in place.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Malformed technology roster, demand series or time-delta literal.
    ///
    /// Detected at construction, before any solver invocation.
    #[error("invalid model configuration: {0}")]
    Configuration(String),

    /// Demand cannot be met given the capacity and ramp constraints.
    ///
    /// Detected at solve time from the solver's termination status.
    #[error("dispatch model is infeasible (solver status: {0})")]
    Infeasible(String),

    /// The solver backend failed or returned an unrecognised status.
    #[error("solver failure: {0}")]
    Solver(String),
}

impl DispatchError {
    /// Wrap a validation failure, preserving its context chain in the message.
    pub(crate) fn config(err: anyhow::Error) -> Self {
        Self::Configuration(format!("{err:#}"))
    }
}

/// Result type alias for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
