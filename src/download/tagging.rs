//! ID3v2.4 tag writing for downloaded MP3 files.

use std::path::{Path, PathBuf};

use id3::{Frame, Tag, TagLike, Version};
use thiserror::Error;
use tracing::debug;

use crate::metadata::TrackMetadata;

/// Errors from writing tags.
#[derive(Debug, Error)]
pub enum TagError {
    /// The file to tag does not exist.
    #[error("file does not exist: {path}")]
    FileNotFound {
        /// Missing file.
        path: PathBuf,
    },

    /// The file is not an MP3.
    #[error("not an MP3 file: {path}")]
    NotMp3 {
        /// Rejected file.
        path: PathBuf,
    },

    /// The tag library failed to write.
    #[error("failed to write ID3 tags to {path}: {source}")]
    Write {
        /// File being tagged.
        path: PathBuf,
        /// Underlying tag error.
        #[source]
        source: id3::Error,
    },
}

impl TagError {
    /// Creates a file-not-found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a not-MP3 error.
    pub fn not_mp3(path: impl Into<PathBuf>) -> Self {
        Self::NotMp3 { path: path.into() }
    }
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}

/// Builds the tag frames for `metadata`. Unset fields add no frame.
pub(crate) fn build_tag(metadata: &TrackMetadata) -> Tag {
    let mut tag = Tag::new();

    if let Some(title) = &metadata.title {
        tag.set_title(title.as_str());
    }
    if let Some(artists) = &metadata.artists {
        tag.set_artist(artists.as_str());
    }
    if let Some(album) = &metadata.album {
        tag.set_album(album.as_str());
    }
    if let Some(year) = metadata.release_year() {
        tag.add_frame(Frame::text("TYER", year.to_string()));
        tag.add_frame(Frame::text("TDOR", year.to_string()));
    }
    if let Some(genres) = &metadata.genres {
        tag.set_genre(genres.as_str());
    }
    if let Some(tempo) = &metadata.tempo {
        tag.add_frame(Frame::text("TBPM", tempo.as_str()));
    }

    tag
}

/// Writes `metadata` into the MP3 at `path` as an ID3v2.4 tag.
///
/// # Errors
///
/// Returns [`TagError`] if the file is missing, is not an MP3, or cannot be written.
pub fn write_tags(path: &Path, metadata: &TrackMetadata) -> Result<(), TagError> {
    if !path.exists() {
        return Err(TagError::file_not_found(path));
    }
    if !is_mp3(path) {
        return Err(TagError::not_mp3(path));
    }

    let tag = build_tag(metadata);
    tag.write_to_path(path, Version::Id3v24)
        .map_err(|source| TagError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "Wrote ID3 tags");
    Ok(())
}
