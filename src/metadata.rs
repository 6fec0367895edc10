//! Descriptive track metadata embedded into downloaded files.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Patterns that split a video title into artist and song title.
#[allow(clippy::expect_used)]
static TITLE_SPLIT_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"^(.+?)\s*[-–—]\s*(.+)$").expect("dash split regex is valid"),
        Regex::new(r"^(.+?)\s*:\s*(.+)$").expect("colon split regex is valid"),
    ]
});

const MAX_ARTIST_LEN: usize = 100;
const MAX_TITLE_LEN: usize = 200;

/// Optional descriptive fields for one track.
///
/// Every field is independently optional. `None` means "do not override",
/// so whatever default the tag writer would use is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Song title.
    pub title: Option<String>,
    /// Artist name(s), as exported (may hold several names).
    pub artists: Option<String>,
    /// Album name.
    pub album: Option<String>,
    /// Genre(s), as exported.
    pub genres: Option<String>,
    /// Release date, usually `YYYY` or `YYYY-MM-DD`.
    pub release_date: Option<String>,
    /// Tempo in beats per minute, as exported.
    pub tempo: Option<String>,
}

impl TrackMetadata {
    /// Returns true when no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artists.is_none()
            && self.album.is_none()
            && self.genres.is_none()
            && self.release_date.is_none()
            && self.tempo.is_none()
    }

    /// Returns the four-digit release year, when the release date starts with one.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?.trim();
        let year = date.get(..4)?;
        if !year.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if date.len() > 4 && !date[4..].starts_with('-') {
            return None;
        }
        year.parse().ok()
    }

    /// Derives artist and title from a video title such as `"Artist - Song"`.
    ///
    /// Falls back to using the whole (trimmed) title when no separator is found.
    #[must_use]
    pub fn from_video_title(title: &str) -> Self {
        let cleaned = title.trim();

        for pattern in TITLE_SPLIT_PATTERNS.iter() {
            let Some(captures) = pattern.captures(cleaned) else {
                continue;
            };
            let (Some(artist), Some(song)) = (captures.get(1), captures.get(2)) else {
                continue;
            };
            let artist = artist.as_str().trim();
            let song = song.as_str().trim();
            if !artist.is_empty()
                && !song.is_empty()
                && artist.len() < MAX_ARTIST_LEN
                && song.len() < MAX_TITLE_LEN
            {
                return Self {
                    title: Some(song.to_string()),
                    artists: Some(artist.to_string()),
                    ..Self::default()
                };
            }
        }

        Self {
            title: Some(cleaned.to_string()),
            ..Self::default()
        }
    }

    /// Layers these values over `defaults`; fields without a value keep the default.
    #[must_use]
    pub fn overlaid_on(&self, defaults: Self) -> Self {
        Self {
            title: self.title.clone().or(defaults.title),
            artists: self.artists.clone().or(defaults.artists),
            album: self.album.clone().or(defaults.album),
            genres: self.genres.clone().or(defaults.genres),
            release_date: self.release_date.clone().or(defaults.release_date),
            tempo: self.tempo.clone().or(defaults.tempo),
        }
    }
}
