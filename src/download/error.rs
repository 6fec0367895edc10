//! Error types for the download module.
//!
//! Every variant is scoped to a single queue item. The pipeline records the
//! message and moves on to the next item.

use std::path::PathBuf;

use thiserror::Error;

use super::tagging::TagError;

/// Errors that can occur while acquiring one track.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The destination directory does not exist.
    #[error("destination is not a directory: {path}\n  Suggestion: Create the folder or pass a different --output-dir")]
    DestinationMissing {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The downloader binary could not be found.
    #[error("download tool not found: {path}\n  Suggestion: Install yt-dlp or set ytdlp_path in the config file")]
    ToolNotFound {
        /// Program path that was tried.
        path: PathBuf,
    },

    /// The downloader could not be started.
    #[error("failed to run download tool {path}: {source}")]
    Spawn {
        /// Program path that was tried.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The downloader exited unsuccessfully.
    #[error("download failed for {id} (exit code {code:?}): {stderr}")]
    Failed {
        /// Identifier being downloaded.
        id: String,
        /// Process exit code, if any.
        code: Option<i32>,
        /// Captured diagnostic output.
        stderr: String,
    },

    /// The downloader succeeded but the produced file could not be located.
    #[error("downloaded file for {id} not found in {dir}")]
    OutputNotFound {
        /// Identifier being downloaded.
        id: String,
        /// Destination that was searched.
        dir: PathBuf,
    },

    /// Tags could not be written to the downloaded file.
    #[error("tagging failed: {source}")]
    Tagging {
        /// Underlying tagging error.
        #[source]
        source: TagError,
    },
}

impl DownloadError {
    /// Creates a destination-missing error.
    pub fn destination_missing(path: impl Into<PathBuf>) -> Self {
        Self::DestinationMissing { path: path.into() }
    }

    /// Maps a process start failure, distinguishing a missing binary.
    pub fn spawn(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::ToolNotFound { path }
        } else {
            Self::Spawn { path, source }
        }
    }

    /// Creates a failed-exit error.
    pub fn failed(id: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::Failed {
            id: id.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Creates an output-not-found error.
    pub fn output_not_found(id: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self::OutputNotFound {
            id: id.into(),
            dir: dir.into(),
        }
    }
}

impl From<TagError> for DownloadError {
    fn from(source: TagError) -> Self {
        Self::Tagging { source }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_missing_display() {
        let msg = DownloadError::destination_missing("/no/such/dir").to_string();
        assert!(msg.contains("/no/such/dir"), "Expected path in: {msg}");
        assert!(msg.contains("Suggestion"), "Expected suggestion in: {msg}");
    }

    #[test]
    fn test_spawn_not_found_is_tool_not_found() {
        let err = DownloadError::spawn(
            "yt-dlp",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, DownloadError::ToolNotFound { .. }));
    }

    #[test]
    fn test_failed_display_includes_id_and_stderr() {
        let msg = DownloadError::failed("dQw4w9WgXcQ", Some(1), "ERROR: Video unavailable")
            .to_string();
        assert!(msg.contains("dQw4w9WgXcQ"), "Expected id in: {msg}");
        assert!(msg.contains("Video unavailable"), "Expected stderr in: {msg}");
    }

    #[test]
    fn test_tag_error_converts() {
        let err: DownloadError = TagError::not_mp3("/tmp/song.wav").into();
        assert!(matches!(err, DownloadError::Tagging { .. }));
        assert!(err.to_string().contains("tagging failed"));
    }
}
