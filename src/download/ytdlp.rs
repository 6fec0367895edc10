//! yt-dlp backed audio downloader.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::filename::{clean_title, title_from_path};
use super::tagging::write_tags;
use super::{DownloadError, DownloadOutcome, Downloader};
use crate::metadata::TrackMetadata;
use crate::parser::VideoId;

/// Format selector preferring native audio streams.
const AUDIO_FORMAT: &str = "bestaudio[ext=m4a]/bestaudio[ext=webm]/bestaudio";

/// Patterns locating the final file in yt-dlp's output, tried in order.
#[allow(clippy::expect_used)]
static DESTINATION_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    // Static patterns, safe to panic
    [
        Regex::new(r"\[ExtractAudio\] Destination: (.+\.mp3)").expect("extract regex is valid"),
        Regex::new(r"\[Merger\] Merging formats into (.+\.mp3)").expect("merger regex is valid"),
        Regex::new(r"\[info\] (.+\.mp3)").expect("info regex is valid"),
    ]
});

/// Downloads audio with yt-dlp, converts it to MP3 and optionally tags it.
#[derive(Debug, Clone)]
pub struct YtDlpDownloader {
    program: PathBuf,
    ffmpeg_location: Option<PathBuf>,
    tag_files: bool,
}

impl YtDlpDownloader {
    /// Creates a downloader invoking `program`, with tagging enabled.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ffmpeg_location: None,
            tag_files: true,
        }
    }

    /// Points yt-dlp at a specific ffmpeg binary or directory.
    #[must_use]
    pub fn with_ffmpeg_location(mut self, location: Option<PathBuf>) -> Self {
        self.ffmpeg_location = location;
        self
    }

    /// Enables or disables ID3 tagging after download.
    #[must_use]
    pub fn with_tagging(mut self, enabled: bool) -> Self {
        self.tag_files = enabled;
        self
    }

    /// Builds the command-line arguments for downloading `id` into `destination`.
    #[must_use]
    pub fn download_args(&self, id: &VideoId, destination: &Path) -> Vec<String> {
        let template = destination.join("%(title)s [%(id)s].%(ext)s");
        let mut args = vec![
            "-f".to_string(),
            AUDIO_FORMAT.to_string(),
            "-o".to_string(),
            template.to_string_lossy().into_owned(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            "mp3".to_string(),
            "--audio-quality".to_string(),
            "0".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--newline".to_string(),
        ];
        if let Some(location) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".to_string());
            args.push(location.to_string_lossy().into_owned());
        }
        args.push(id.watch_url());
        args
    }

    fn tags_for(path: &Path, id: &VideoId, metadata: Option<&TrackMetadata>) -> TrackMetadata {
        let title = title_from_path(path, id.as_str()).unwrap_or_else(|| id.to_string());
        let defaults = TrackMetadata::from_video_title(&clean_title(&title));
        match metadata {
            Some(metadata) => metadata.overlaid_on(defaults),
            None => defaults,
        }
    }
}

impl Default for YtDlpDownloader {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

/// Finds the final MP3 path reported in yt-dlp's output.
#[must_use]
pub fn extract_downloaded_filename(output: &str) -> Option<PathBuf> {
    DESTINATION_PATTERNS.iter().find_map(|pattern| {
        output.lines().find_map(|line| {
            pattern
                .captures(line)
                .and_then(|captures| captures.get(1))
                .map(|path| PathBuf::from(path.as_str().trim()))
        })
    })
}

/// Looks for `"* [<id>].mp3"` in `dir` when the output did not name the file.
fn find_by_id(dir: &Path, id: &VideoId) -> Option<PathBuf> {
    let marker = format!("[{}]", id.as_str());
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.contains(&marker))
        })
}

#[async_trait]
impl Downloader for YtDlpDownloader {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    #[tracing::instrument(skip(self, metadata), fields(id = %id, has_metadata = metadata.is_some()))]
    async fn acquire(
        &self,
        id: &VideoId,
        destination: &Path,
        metadata: Option<&TrackMetadata>,
    ) -> Result<DownloadOutcome, DownloadError> {
        if !destination.is_dir() {
            return Err(DownloadError::destination_missing(destination));
        }

        let output = Command::new(&self.program)
            .args(self.download_args(id, destination))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DownloadError::spawn(&self.program, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(DownloadError::failed(id.as_str(), output.status.code(), stderr));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = extract_downloaded_filename(&stdout)
            .filter(|path| path.exists())
            .or_else(|| find_by_id(destination, id))
            .ok_or_else(|| DownloadError::output_not_found(id.as_str(), destination))?;
        debug!(path = %path.display(), "Located downloaded file");

        let tagged = if self.tag_files {
            let tags = Self::tags_for(&path, id, metadata);
            if let Err(error) = write_tags(&path, &tags) {
                warn!(path = %path.display(), error = %error, "Tagging failed");
                return Err(error.into());
            }
            true
        } else {
            false
        };

        info!(path = %path.display(), tagged, "Download complete");
        Ok(DownloadOutcome { path, tagged })
    }
}
