//! Video identifier extraction from pasted links.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;
use url::Url;

use super::input::VideoId;

/// Video identifiers are exactly 11 characters from the URL-safe base64 alphabet.
#[allow(clippy::expect_used)]
static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id regex is valid") // Static pattern, safe to panic
});

/// Hosts that serve `watch?v=` and `shorts/` links.
const WATCH_HOSTS: [&str; 4] = [
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
];

/// Host that serves short `youtu.be/<id>` links.
const SHORT_HOST: &str = "youtu.be";

/// Extracts the canonical video identifier from a link, if the line is one.
///
/// Recognized forms (http or https, scheme optional):
/// - `youtube.com/watch?v=<id>`
/// - `youtu.be/<id>`
/// - `youtube.com/shorts/<id>`
///
/// Anything else, including links whose id is malformed, yields `None`.
///
/// # Examples
///
/// ```
/// use tunefetch_core::parser::extract_video_id;
///
/// let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
/// assert_eq!(id.as_str(), "dQw4w9WgXcQ");
/// assert!(extract_video_id("never gonna give you up").is_none());
/// ```
#[must_use]
pub fn extract_video_id(line: &str) -> Option<VideoId> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return None;
    }

    let parsed = parse_link(trimmed)?;
    let host = parsed.host_str()?.to_ascii_lowercase();

    let candidate = if host == SHORT_HOST {
        parsed.path_segments()?.next().map(str::to_string)
    } else if WATCH_HOSTS.contains(&host.as_str()) {
        watch_or_shorts_id(&parsed)
    } else {
        None
    }?;

    if is_valid_video_id(&candidate) {
        trace!(id = %candidate, "extracted video id");
        Some(VideoId::new(candidate))
    } else {
        trace!(candidate = %candidate, "link id rejected");
        None
    }
}

/// Returns true when `candidate` has the shape of a video identifier.
#[must_use]
pub fn is_valid_video_id(candidate: &str) -> bool {
    VIDEO_ID_PATTERN.is_match(candidate)
}

/// Returns true when the line is a link carrying an extractable identifier.
#[must_use]
pub fn is_direct_reference(line: &str) -> bool {
    extract_video_id(line).is_some()
}

fn parse_link(text: &str) -> Option<Url> {
    match Url::parse(text) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(parsed),
        Ok(_) => None,
        // Bare `youtu.be/...` or `www.youtube.com/...` pasted without a scheme
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{text}")).ok()
        }
        Err(_) => None,
    }
}

fn watch_or_shorts_id(parsed: &Url) -> Option<String> {
    let mut segments = parsed.path_segments()?;
    match segments.next()? {
        "watch" => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned()),
        "shorts" => segments.next().map(str::to_string),
        _ => None,
    }
}
