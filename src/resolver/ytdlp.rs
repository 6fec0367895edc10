//! yt-dlp backed search resolver.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::{ResolveError, Resolver, SearchHit};
use crate::parser::{VideoId, is_valid_video_id};

/// Default time allowed for one search.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Subset of yt-dlp's `--dump-json` record that the resolver reads.
#[derive(Debug, Deserialize)]
struct SearchRecord {
    id: Option<String>,
    title: Option<String>,
    uploader: Option<String>,
    channel: Option<String>,
    duration: Option<f64>,
}

/// Resolves search phrases by asking yt-dlp for its top search result.
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    program: PathBuf,
    timeout: Duration,
}

impl YtDlpResolver {
    /// Creates a resolver invoking `program` with the default timeout.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }

    /// Sets the per-search timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the program path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Builds the command-line arguments for a search.
    #[must_use]
    pub fn search_args(query: &str) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--no-download".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            format!("ytsearch1:{query}"),
        ]
    }
}

impl Default for YtDlpResolver {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

/// Interprets yt-dlp's JSON-lines search output.
///
/// Empty output means nothing matched. Only the first record is used.
pub(crate) fn parse_search_output(
    query: &str,
    stdout: &str,
) -> Result<Option<SearchHit>, ResolveError> {
    let Some(line) = stdout.lines().map(str::trim).find(|line| !line.is_empty()) else {
        return Ok(None);
    };

    let record: SearchRecord = serde_json::from_str(line)
        .map_err(|e| ResolveError::invalid_output(query, format!("invalid JSON: {e}")))?;

    let id = record
        .id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ResolveError::invalid_output(query, "search result has no id"))?;
    if !is_valid_video_id(&id) {
        return Err(ResolveError::invalid_output(
            query,
            format!("search result id '{id}' is not a video id"),
        ));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let duration_seconds = record
        .duration
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(|secs| secs.round() as u64);

    Ok(Some(SearchHit {
        id: VideoId::new(id),
        title: record.title,
        uploader: record.uploader.or(record.channel),
        duration_seconds,
    }))
}

#[async_trait]
impl Resolver for YtDlpResolver {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    #[tracing::instrument(skip(self), fields(resolver = "yt-dlp"))]
    async fn resolve(&self, query: &str) -> Result<Option<SearchHit>, ResolveError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Empty search query; nothing to resolve");
            return Ok(None);
        }

        let output = Command::new(&self.program)
            .args(Self::search_args(query))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match timeout(self.timeout, output).await {
            Ok(result) => result.map_err(|e| ResolveError::spawn(&self.program, e))?,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "Search timed out");
                return Err(ResolveError::timeout(query, self.timeout.as_secs()));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ResolveError::failed(query, output.status.code(), stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let hit = parse_search_output(query, &stdout)?;
        match &hit {
            Some(hit) => debug!(id = %hit.id, title = ?hit.title, "Search matched"),
            None => debug!("Search returned no results"),
        }
        Ok(hit)
    }
}
