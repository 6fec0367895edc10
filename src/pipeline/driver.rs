//! The sequential control loop that drives queue items to completion.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::run::{ItemState, PipelineRun, RunState, progress_for};
use crate::download::Downloader;
use crate::metadata::TrackMetadata;
use crate::parser::{QueueItem, VideoId};
use crate::resolver::Resolver;

/// Processes queue items one at a time through a resolver and a downloader.
///
/// Per-item failures are recorded in the [`PipelineRun`] and never stop the
/// loop. Exactly one external call is in flight at any moment.
pub struct PipelineDriver<'a> {
    resolver: &'a dyn Resolver,
    downloader: &'a dyn Downloader,
    updates: Option<watch::Sender<PipelineRun>>,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<'a> PipelineDriver<'a> {
    /// Creates a driver over the given backends.
    #[must_use]
    pub fn new(resolver: &'a dyn Resolver, downloader: &'a dyn Downloader) -> Self {
        Self {
            resolver,
            downloader,
            updates: None,
            interrupt: None,
        }
    }

    /// Publishes a snapshot of the run after every change.
    #[must_use]
    pub fn with_updates(mut self, sender: watch::Sender<PipelineRun>) -> Self {
        self.updates = Some(sender);
        self
    }

    /// Stops before the next item once `flag` is set.
    ///
    /// An item already being downloaded is allowed to finish.
    #[must_use]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    fn publish(&self, run: &PipelineRun) {
        if let Some(sender) = &self.updates {
            sender.send_replace(run.clone());
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Runs every item in order and returns the final state.
    ///
    /// `metadata_lookup(i)` supplies the metadata override for 0-based
    /// position `i`. Progress reflects items started: it moves to
    /// `round(i / N * 100)` as item `i` begins and only reaches 100 after
    /// the last item has finished.
    #[tracing::instrument(skip_all, fields(items = items.len(), destination = %destination.display()))]
    pub async fn run<F>(
        &self,
        items: &[QueueItem],
        destination: &Path,
        metadata_lookup: F,
    ) -> PipelineRun
    where
        F: Fn(usize) -> Option<TrackMetadata>,
    {
        let total = items.len();
        let mut run = PipelineRun::start(total);
        info!(total, "Starting download run");
        self.publish(&run);

        for (index, item) in items.iter().enumerate() {
            if self.interrupted() {
                run.state = RunState::Interrupted;
                run.status = format!("Interrupted after {index} / total {total}");
                warn!(processed = index, total, "Run interrupted");
                self.publish(&run);
                return run;
            }

            let position = index + 1;
            run.current_index = position;
            run.progress = progress_for(index, total);
            let metadata = metadata_lookup(index);

            let id = match item.resolved_id() {
                Some(id) => id.clone(),
                None => match self.resolve_item(&mut run, index, item).await {
                    Some(id) => id,
                    None => continue,
                },
            };
            run.items[index].resolved_id = Some(id.clone());
            run.items[index].state = ItemState::Resolved;

            self.acquire_item(&mut run, index, item, &id, destination, metadata.as_ref())
                .await;
        }

        run.progress = 100;
        run.state = RunState::Completed;
        run.status = completion_summary(&run);
        info!(
            completed = run.completed_count(),
            failed = run.failed_count(),
            not_found = run.skipped_count(),
            "Download run finished"
        );
        self.publish(&run);
        run
    }

    /// Resolves a search phrase. Returns `None` when the item was skipped or failed.
    async fn resolve_item(
        &self,
        run: &mut PipelineRun,
        index: usize,
        item: &QueueItem,
    ) -> Option<VideoId> {
        let position = index + 1;
        let total = run.total_count;

        run.items[index].state = ItemState::Resolving;
        run.status = format!("Searching {position}/{total}: {}", item.original_input);
        self.publish(run);

        match self.resolver.resolve(&item.processed_query).await {
            Ok(Some(hit)) => {
                debug!(position, id = %hit.id, "Resolved search phrase");
                Some(hit.id)
            }
            Ok(None) => {
                run.items[index].state = ItemState::Skipped;
                run.status = format!("Not found {position}/{total}: {}", item.original_input);
                info!(position, query = %item.processed_query, "No match found; skipping");
                self.publish(run);
                None
            }
            Err(error) => {
                run.items[index].state = ItemState::Failed;
                let message = item_error(position, item, &format!("search failed: {error}"));
                warn!(position, error = %error, "Search failed");
                run.status = message.clone();
                run.errors.push(message);
                self.publish(run);
                None
            }
        }
    }

    async fn acquire_item(
        &self,
        run: &mut PipelineRun,
        index: usize,
        item: &QueueItem,
        id: &VideoId,
        destination: &Path,
        metadata: Option<&TrackMetadata>,
    ) {
        let position = index + 1;
        let total = run.total_count;

        run.items[index].state = ItemState::Acquiring;
        run.status = format!("Downloading {position}/{total}: {}", item.original_input);
        self.publish(run);

        match self.downloader.acquire(id, destination, metadata).await {
            Ok(outcome) => {
                run.items[index].state = ItemState::Done;
                run.items[index].path = Some(outcome.path);
                run.status = format!("Downloaded {position}/{total}: {}", item.original_input);
                debug!(position, id = %id, "Item done");
            }
            Err(error) => {
                run.items[index].state = ItemState::Failed;
                let message = item_error(position, item, &error.to_string());
                warn!(position, id = %id, error = %error, "Download failed");
                run.status = message.clone();
                run.errors.push(message);
            }
        }
        self.publish(run);
    }
}

fn item_error(position: usize, item: &QueueItem, reason: &str) -> String {
    format!("Item {position} ({}): {reason}", item.original_input)
}

/// Final status line for a finished run.
#[must_use]
pub fn completion_summary(run: &PipelineRun) -> String {
    if run.errors.is_empty() {
        let skipped = run.skipped_count();
        let mut summary = format!("Completed {} item(s)", run.total_count);
        if skipped > 0 {
            summary.push_str(&format!(", {skipped} not found"));
        }
        return summary;
    }

    format!(
        "Completed with errors: failed {} / total {}\n{}",
        run.errors.len(),
        run.total_count,
        run.errors.join("\n")
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_summary_success() {
        let mut run = PipelineRun::start(2);
        run.items[0].state = ItemState::Done;
        run.items[1].state = ItemState::Done;
        assert_eq!(completion_summary(&run), "Completed 2 item(s)");
    }

    #[test]
    fn test_completion_summary_with_skips() {
        let mut run = PipelineRun::start(3);
        run.items[1].state = ItemState::Skipped;
        assert_eq!(completion_summary(&run), "Completed 3 item(s), 1 not found");
    }

    #[test]
    fn test_completion_summary_with_failures() {
        let mut run = PipelineRun::start(3);
        run.errors.push("Item 2 (b): boom".to_string());
        assert_eq!(
            completion_summary(&run),
            "Completed with errors: failed 1 / total 3\nItem 2 (b): boom"
        );
    }
}
