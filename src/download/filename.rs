//! Title cleanup and downloaded-file naming.
//!
//! Video titles carry decoration like `(Official Video)` or `[Audio HD]`.
//! [`clean_title`] strips it so the remaining text can be split into artist
//! and song for tagging.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Decoration tokens removed from titles, matched case-insensitively.
const DECORATION_TOKENS: &[&str] = &[
    "[Audio HD]",
    "(Radio Mix)",
    "(Official Video)",
    "(Official Music Video)",
    "(Official Audio)",
    "(lyrics)",
    "(Radio Edit)",
    "[High Quality]",
    "(Audio)",
    "[Clean version]",
    "[visualizer]",
    "[Official]",
    "[Lyric Video]",
    "[Lyrics]",
    "(Lyric Video)",
    "(Explicit)",
    "[Explicit]",
    "(Clean)",
    "[Live]",
    "(Studio)",
    "[Studio]",
    "[Remastered]",
    "[Remix]",
    "(Remix)",
    "[DJ Mix]",
    "(DJ Mix)",
    "[Acoustic]",
    "(Acoustic)",
    "[Instrumental]",
    "(Instrumental)",
    "[Extended]",
    "(Extended)",
    "[Edit]",
    "(Edit)",
    "[Version]",
    "(Version)",
    "[Mixed]",
    "(Mixed)",
];

#[allow(clippy::expect_used)]
static DECORATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = DECORATION_TOKENS
        .iter()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join("|");
    // Static pattern, safe to panic
    Regex::new(&format!(r"(?i)\s*(?:{alternatives})")).expect("decoration regex is valid")
});

#[allow(clippy::expect_used)]
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    // Static pattern, safe to panic
    Regex::new(r"\s+").expect("whitespace regex is valid")
});

/// Removes decoration tokens and collapses whitespace.
#[must_use]
pub fn clean_title(title: &str) -> String {
    let stripped = DECORATION_PATTERN.replace_all(title, "");
    WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Recovers the video title from a file named `"<title> [<id>].<ext>"`.
///
/// Returns the file stem unchanged when the id suffix is absent.
#[must_use]
pub fn title_from_path(path: &Path, id: &str) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let suffix = format!(" [{id}]");
    let title = stem.strip_suffix(&suffix).unwrap_or(stem).trim();
    (!title.is_empty()).then(|| title.to_string())
}
