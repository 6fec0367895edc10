//! Observable state of one pipeline run.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::parser::VideoId;

/// Lifecycle of the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// No run has started.
    #[default]
    Idle,
    /// Items are being processed.
    Running,
    /// Every item was processed, whatever its outcome.
    Completed,
    /// Stopped early on request.
    Interrupted,
}

/// Lifecycle of one queue item within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Not reached yet.
    #[default]
    Pending,
    /// Waiting on the resolver.
    Resolving,
    /// Identifier known, download not started.
    Resolved,
    /// Waiting on the downloader.
    Acquiring,
    /// Downloaded.
    Done,
    /// Resolver or downloader failed.
    Failed,
    /// Resolver found no match.
    Skipped,
}

impl ItemState {
    /// Returns true once the item will not change again.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Skipped)
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Resolving => "resolving",
            Self::Resolved => "resolved",
            Self::Acquiring => "acquiring",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Skipped => "not found",
        };
        f.write_str(label)
    }
}

/// What happened to one queue item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    /// Current state.
    pub state: ItemState,
    /// Identifier used, from the link or from resolution.
    pub resolved_id: Option<VideoId>,
    /// File written, when the download succeeded.
    pub path: Option<PathBuf>,
}

/// Transient execution state of one run.
///
/// Written only by the driver; callers observe snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineRun {
    /// Number of queue items.
    pub total_count: usize,
    /// 1-based index of the item being processed; 0 before start.
    pub current_index: usize,
    /// Percentage of items started, 0..=100.
    pub progress: u8,
    /// Most recent event message.
    pub status: String,
    /// One message per failed item.
    pub errors: Vec<String>,
    /// Run lifecycle.
    pub state: RunState,
    /// Per-item outcomes, in queue order.
    pub items: Vec<ItemOutcome>,
}

impl PipelineRun {
    /// Creates a running state for `total_count` items.
    #[must_use]
    pub fn start(total_count: usize) -> Self {
        Self {
            total_count,
            state: RunState::Running,
            items: vec![ItemOutcome::default(); total_count],
            ..Self::default()
        }
    }

    /// Number of items that reached `state`.
    #[must_use]
    pub fn count(&self, state: ItemState) -> usize {
        self.items.iter().filter(|item| item.state == state).count()
    }

    /// Number of downloaded items.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.count(ItemState::Done)
    }

    /// Number of failed items.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.count(ItemState::Failed)
    }

    /// Number of items the resolver found nothing for.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.count(ItemState::Skipped)
    }

    /// Returns true when the run has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, RunState::Completed | RunState::Interrupted)
    }
}

/// Percentage for the item at 0-based `index` of `total`, rounded half up.
#[must_use]
pub fn progress_for(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = (index.saturating_mul(200) + total) / (total * 2);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}
