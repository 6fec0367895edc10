//! Types representing classified queue items and classification results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of input line detected.
///
/// Decided once at classification time and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// A link that carries a video identifier.
    DirectReference,
    /// Free text that must be searched before it can be downloaded.
    SearchPhrase,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectReference => write!(f, "Link"),
            Self::SearchPhrase => write!(f, "Search"),
        }
    }
}

/// Canonical identifier understood by the downloader (an 11 character video id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Wraps an already validated identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the watch URL for this identifier.
    #[must_use]
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One unit of work derived from one non-empty input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueItem {
    /// The line as typed or pasted, trimmed.
    pub original_input: String,
    /// Link or search phrase.
    pub kind: InputKind,
    /// Text used as the search term (or the link itself for direct references).
    pub processed_query: String,
    /// Identifier known at classification time, if any.
    resolved_id: Option<VideoId>,
}

impl QueueItem {
    /// Creates a direct reference whose identifier was extracted from the link.
    #[must_use]
    pub fn direct(line: impl Into<String>, id: VideoId) -> Self {
        let line = line.into();
        Self {
            processed_query: line.clone(),
            original_input: line,
            kind: InputKind::DirectReference,
            resolved_id: Some(id),
        }
    }

    /// Creates a search phrase item with the query that will be sent to the resolver.
    #[must_use]
    pub fn search(line: impl Into<String>, processed_query: impl Into<String>) -> Self {
        Self {
            original_input: line.into(),
            kind: InputKind::SearchPhrase,
            processed_query: processed_query.into(),
            resolved_id: None,
        }
    }

    /// Returns the identifier known for this item, if any.
    #[must_use]
    pub fn resolved_id(&self) -> Option<&VideoId> {
        self.resolved_id.as_ref()
    }

    /// Returns true when the item must go through the resolver before download.
    #[must_use]
    pub fn needs_resolution(&self) -> bool {
        self.resolved_id.is_none()
    }
}

impl fmt::Display for QueueItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.original_input)
    }
}

/// Counts of classified items by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyCounts {
    /// Total items.
    pub total: usize,
    /// Direct references.
    pub links: usize,
    /// Search phrases.
    pub searches: usize,
}

/// Ordered batch of classified items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyResult {
    /// Items in input order.
    pub items: Vec<QueueItem>,
}

impl ClassifyResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item, keeping input order.
    pub fn push(&mut self, item: QueueItem) {
        self.items.push(item);
    }

    /// Returns true if no items were classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns count of classified items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns per-kind counts.
    #[must_use]
    pub fn counts(&self) -> ClassifyCounts {
        let links = self
            .items
            .iter()
            .filter(|item| item.kind == InputKind::DirectReference)
            .count();
        ClassifyCounts {
            total: self.items.len(),
            links,
            searches: self.items.len() - links,
        }
    }

    /// Consumes the result and returns the items.
    #[must_use]
    pub fn into_items(self) -> Vec<QueueItem> {
        self.items
    }
}

impl fmt::Display for ClassifyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.counts();
        write!(
            f,
            "Classified {} items ({} links, {} searches)",
            counts.total, counts.links, counts.searches
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind_display() {
        assert_eq!(InputKind::DirectReference.to_string(), "Link");
        assert_eq!(InputKind::SearchPhrase.to_string(), "Search");
    }

    #[test]
    fn test_video_id_watch_url() {
        let id = VideoId::new("dQw4w9WgXcQ");
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(id.to_string(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_queue_item_direct_is_resolved() {
        let item = QueueItem::direct("https://youtu.be/dQw4w9WgXcQ", VideoId::new("dQw4w9WgXcQ"));
        assert_eq!(item.kind, InputKind::DirectReference);
        assert_eq!(item.processed_query, item.original_input);
        assert!(!item.needs_resolution());
        assert_eq!(item.resolved_id().unwrap().as_str(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_queue_item_search_needs_resolution() {
        let item = QueueItem::search("Song A", "Song A official audio");
        assert_eq!(item.kind, InputKind::SearchPhrase);
        assert!(item.needs_resolution());
        assert_eq!(item.to_string(), "[Search] Song A");
    }

    #[test]
    fn test_classify_result_counts() {
        let mut result = ClassifyResult::new();
        result.push(QueueItem::direct("link", VideoId::new("abcdefghijk")));
        result.push(QueueItem::search("a", "a"));
        result.push(QueueItem::search("b", "b"));

        let counts = result.counts();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.links, 1);
        assert_eq!(counts.searches, 2);
        assert_eq!(result.to_string(), "Classified 3 items (1 links, 2 searches)");
    }

    #[test]
    fn test_queue_item_serde_kind_snake_case() {
        let item = QueueItem::search("a", "a");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"search_phrase\""));
    }
}
