//! Line classification for pasted input.
//!
//! Raw text is split into trimmed, non-empty lines. Each line becomes one
//! [`QueueItem`]: a direct reference when a video identifier can be extracted
//! from it, otherwise a search phrase that the resolver must look up.
//!
//! Classification is a pure text transformation. It never touches the network
//! or the filesystem and cannot fail; empty input yields an empty batch.
//!
//! # Example
//!
//! ```
//! use tunefetch_core::parser::{classify, InputKind};
//!
//! let items = classify("https://youtu.be/dQw4w9WgXcQ\nArtist - Song");
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].kind, InputKind::DirectReference);
//! assert_eq!(items[1].kind, InputKind::SearchPhrase);
//! ```

mod input;
mod mode;
mod url;

pub use input::{ClassifyCounts, ClassifyResult, InputKind, QueueItem, VideoId};
pub use mode::AudioMode;
pub use url::{extract_video_id, is_direct_reference, is_valid_video_id};

use tracing::debug;

/// Classifies input text into queue items, one per non-empty line.
///
/// Search phrases keep the trimmed line as their query. Use
/// [`classify_with_mode`] to append the audio-mode suffix.
#[must_use]
pub fn classify(input: &str) -> Vec<QueueItem> {
    classify_lines(input, None).into_items()
}

/// Classifies input text, shaping search queries with `mode`.
///
/// A search phrase's query becomes `"<line> <mode suffix>"`, e.g.
/// `"Song One official audio"`. Direct references are unaffected.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
#[must_use]
pub fn classify_with_mode(input: &str, mode: AudioMode) -> ClassifyResult {
    classify_lines(input, Some(mode))
}

fn classify_lines(input: &str, mode: Option<AudioMode>) -> ClassifyResult {
    let mut result = ClassifyResult::new();

    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let item = match extract_video_id(line) {
            Some(id) => QueueItem::direct(line, id),
            None => {
                let query = mode.map_or_else(|| line.to_string(), |mode| mode.search_query(line));
                QueueItem::search(line, query)
            }
        };
        result.push(item);
    }

    let counts = result.counts();
    debug!(
        total = counts.total,
        links = counts.links,
        searches = counts.searches,
        "Classification complete"
    );

    result
}
