//! Errors that prevent a run from starting.

use thiserror::Error;

/// Pre-run configuration failures.
///
/// Per-item failures never surface here; they are recorded in the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No destination directory was configured.
    #[error("no destination folder selected\n  Suggestion: Pass --output-dir or set output_dir in the config file")]
    NoDestination,

    /// There is nothing to process.
    #[error("nothing to download: the queue is empty\n  Suggestion: Provide at least one link or search phrase")]
    EmptyQueue,
}
