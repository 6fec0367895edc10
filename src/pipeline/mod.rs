//! Sequential download pipeline.
//!
//! # Architecture
//!
//! - [`PipelineDriver`] - single control loop over the queue
//! - [`PipelineRun`] - observable run state (index, progress, status, errors)
//! - [`ItemState`] - per-item state machine:
//!   `Pending -> Resolving -> Resolved -> Acquiring -> Done | Failed`, with
//!   `Skipped` when a search matches nothing
//! - [`preflight`] - the only checks that can stop a run from starting
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tunefetch_core::download::YtDlpDownloader;
//! use tunefetch_core::parser::classify;
//! use tunefetch_core::pipeline::PipelineDriver;
//! use tunefetch_core::resolver::YtDlpResolver;
//!
//! # async fn example() {
//! let resolver = YtDlpResolver::default();
//! let downloader = YtDlpDownloader::default();
//! let items = classify("Artist - Song\nhttps://youtu.be/dQw4w9WgXcQ");
//!
//! let driver = PipelineDriver::new(&resolver, &downloader);
//! let run = driver.run(&items, Path::new("./music"), |_| None).await;
//! println!("{}", run.status);
//! # }
//! ```

mod driver;
mod error;
mod run;

pub use driver::{PipelineDriver, completion_summary};
pub use error::PipelineError;
pub use run::{ItemOutcome, ItemState, PipelineRun, RunState, progress_for};

use std::path::Path;

use crate::parser::QueueItem;

/// Checks that a run can start.
///
/// # Errors
///
/// - [`PipelineError::NoDestination`] when no destination is set.
/// - [`PipelineError::EmptyQueue`] when there are no items.
pub fn preflight(items: &[QueueItem], destination: Option<&Path>) -> Result<(), PipelineError> {
    if destination.is_none_or(|path| path.as_os_str().is_empty()) {
        return Err(PipelineError::NoDestination);
    }
    if items.is_empty() {
        return Err(PipelineError::EmptyQueue);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::classify;

    #[test]
    fn test_preflight_requires_destination() {
        let items = classify("Song");
        assert_eq!(preflight(&items, None), Err(PipelineError::NoDestination));
        assert_eq!(
            preflight(&items, Some(Path::new(""))),
            Err(PipelineError::NoDestination)
        );
    }

    #[test]
    fn test_preflight_requires_items() {
        assert_eq!(
            preflight(&[], Some(Path::new("/music"))),
            Err(PipelineError::EmptyQueue)
        );
    }

    #[test]
    fn test_preflight_checks_destination_first() {
        assert_eq!(preflight(&[], None), Err(PipelineError::NoDestination));
    }

    #[test]
    fn test_preflight_ok() {
        let items = classify("Song");
        assert!(preflight(&items, Some(Path::new("/music"))).is_ok());
    }
}
