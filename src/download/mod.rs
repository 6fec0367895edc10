//! Audio acquisition for resolved video identifiers.
//!
//! A [`Downloader`] fetches one track into a destination directory and embeds
//! the optional metadata override. Failures are scoped to that one track.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tunefetch_core::download::{Downloader, YtDlpDownloader};
//! use tunefetch_core::parser::VideoId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = YtDlpDownloader::new("yt-dlp");
//! let outcome = downloader
//!     .acquire(&VideoId::new("dQw4w9WgXcQ"), Path::new("./music"), None)
//!     .await?;
//! println!("Saved: {}", outcome.path.display());
//! # Ok(())
//! # }
//! ```

mod error;
mod filename;
mod tagging;
mod ytdlp;

pub use error::DownloadError;
pub use filename::{clean_title, title_from_path};
pub use tagging::{TagError, write_tags};
pub use ytdlp::{YtDlpDownloader, extract_downloaded_filename};

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::metadata::TrackMetadata;
use crate::parser::VideoId;

/// Result of one successful acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Final file on disk.
    pub path: PathBuf,
    /// Whether tags were written.
    pub tagged: bool,
}

/// Trait for download backends.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Returns the downloader's name (e.g., "yt-dlp").
    fn name(&self) -> &str;

    /// Downloads `id` into `destination`, embedding `metadata` when given.
    async fn acquire(
        &self,
        id: &VideoId,
        destination: &Path,
        metadata: Option<&TrackMetadata>,
    ) -> Result<DownloadOutcome, DownloadError>;
}
