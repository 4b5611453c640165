//! Error types for the shuffled community search

use thiserror::Error;

/// Result alias used by the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the search
#[derive(Debug, Error)]
pub enum Error {
    /// The requested number of trials was zero
    #[error("trial count must be at least 1, got {0}")]
    InvalidTrialCount(usize),

    /// The graph handed to the search cannot be used as input
    #[error("malformed graph: {0}")]
    MalformedGraph(String),

    /// The community detection primitive rejected a graph
    #[error("community detection failed: {0}")]
    Detection(String),

    /// Every dispatched trial failed, so there is nothing to select from
    #[error("all {} trials failed", failures.len())]
    AllTrialsFailed {
        /// Failures in trial order
        failures: Vec<TrialFailure>,
    },

    /// The worker pool could not be created
    #[error("failed to build trial worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Failure of a single trial, isolated from its siblings
#[derive(Debug, Clone, PartialEq, Error)]
#[error("trial {trial} failed: {reason}")]
pub struct TrialFailure {
    /// Submission index of the failed trial
    pub trial: usize,

    /// Human-readable cause reported by the detection stage
    pub reason: String,
}

impl TrialFailure {
    pub fn new(trial: usize, reason: impl Into<String>) -> Self {
        Self {
            trial,
            reason: reason.into(),
        }
    }
}
