//! Exit code logic for the tunefetch process.
//!
//! Single responsibility: map run outcomes to the process exit code.

use std::process::ExitCode;

use tunefetch_core::pipeline::{PipelineRun, RunState};

/// Process outcome, mapped to exit codes 0 / 1 / 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Failure,
    Partial,
}

impl From<ProcessExit> for ExitCode {
    fn from(outcome: ProcessExit) -> Self {
        match outcome {
            ProcessExit::Success => Self::SUCCESS,
            ProcessExit::Failure => Self::from(1),
            ProcessExit::Partial => Self::from(2),
        }
    }
}

/// Determines the process exit outcome from completed and failed item counts.
pub(crate) fn determine_exit_outcome(completed: usize, failed: usize) -> ProcessExit {
    if failed == 0 {
        ProcessExit::Success
    } else if completed > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}

/// Determines the exit outcome for a finished run.
///
/// An interrupted run is a failure, as is a non-empty run where nothing
/// completed (every item failed or was not found).
pub(crate) fn run_exit_outcome(run: &PipelineRun) -> ProcessExit {
    if run.state == RunState::Interrupted {
        return ProcessExit::Failure;
    }
    let completed = run.completed_count();
    if completed == 0 && run.total_count > 0 {
        return ProcessExit::Failure;
    }
    determine_exit_outcome(completed, run.failed_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunefetch_core::pipeline::ItemState;

    #[test]
    fn test_exit_outcome_success_when_no_failures() {
        assert_eq!(determine_exit_outcome(3, 0), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_success_when_zero_completed_zero_failed() {
        assert_eq!(determine_exit_outcome(0, 0), ProcessExit::Success);
    }

    #[test]
    fn test_exit_outcome_partial_when_mixed() {
        assert_eq!(determine_exit_outcome(2, 1), ProcessExit::Partial);
    }

    #[test]
    fn test_exit_outcome_failure_when_all_failed() {
        assert_eq!(determine_exit_outcome(0, 2), ProcessExit::Failure);
    }

    #[test]
    fn test_run_exit_outcome_interrupted_is_failure() {
        let mut run = PipelineRun::start(2);
        run.items[0].state = ItemState::Done;
        run.state = RunState::Interrupted;
        assert_eq!(run_exit_outcome(&run), ProcessExit::Failure);
    }

    #[test]
    fn test_run_exit_outcome_skips_do_not_fail() {
        let mut run = PipelineRun::start(2);
        run.items[0].state = ItemState::Done;
        run.items[1].state = ItemState::Skipped;
        run.state = RunState::Completed;
        assert_eq!(run_exit_outcome(&run), ProcessExit::Success);
    }

    #[test]
    fn test_run_exit_outcome_nothing_found_is_failure() {
        let mut run = PipelineRun::start(2);
        run.items[0].state = ItemState::Skipped;
        run.items[1].state = ItemState::Skipped;
        run.state = RunState::Completed;
        assert_eq!(run_exit_outcome(&run), ProcessExit::Failure);
    }

    #[test]
    fn test_run_exit_outcome_empty_run_is_success() {
        let mut run = PipelineRun::start(0);
        run.state = RunState::Completed;
        assert_eq!(run_exit_outcome(&run), ProcessExit::Success);
    }
}
