//! Error types for search resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the search capability.
///
/// "No match" is not an error: resolvers report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The search tool binary could not be found.
    #[error("search tool not found: {path}\n  Suggestion: Install yt-dlp or set ytdlp_path in the config file")]
    ToolNotFound {
        /// Program path that was tried.
        path: PathBuf,
    },

    /// The search tool could not be started.
    #[error("failed to run search tool {path}: {source}")]
    Spawn {
        /// Program path that was tried.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The search tool exited unsuccessfully.
    #[error("search failed for '{query}' (exit code {code:?}): {stderr}")]
    Failed {
        /// Query that was searched.
        query: String,
        /// Process exit code, if any.
        code: Option<i32>,
        /// Captured diagnostic output.
        stderr: String,
    },

    /// The search tool produced output that could not be interpreted.
    #[error("unreadable search output for '{query}': {reason}")]
    InvalidOutput {
        /// Query that was searched.
        query: String,
        /// What was wrong with the output.
        reason: String,
    },

    /// The search did not finish in time.
    #[error("search for '{query}' timed out after {timeout_secs}s\n  Suggestion: Raise search_timeout_secs in the config file")]
    Timeout {
        /// Query that was searched.
        query: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
}

impl ResolveError {
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
    pub fn failed(query: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self::Failed {
            query: query.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Creates an invalid-output error.
    pub fn invalid_output(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOutput {
            query: query.into(),
            reason: reason.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(query: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            query: query.into(),
            timeout_secs,
        }
    }
}
