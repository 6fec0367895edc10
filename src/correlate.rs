//! Positional correlation between imported CSV rows and queue items.
//!
//! The two lists come from independent sources: the CSV file and the typed
//! input text. They are only treated as describing the same tracks when they
//! have the same length. Each position is then checked on its own, so one
//! mismatched line only loses its own metadata.

use tracing::debug;

use crate::csv_import::CsvTrackEntry;
use crate::metadata::TrackMetadata;
use crate::parser::QueueItem;

/// Result of lining up CSV rows against queue items.
///
/// Holds a per-position metadata override. An unusable correlation has no
/// overrides at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Correlation {
    overrides: Option<Vec<Option<TrackMetadata>>>,
}

impl Correlation {
    /// A correlation that never yields metadata.
    #[must_use]
    pub fn unusable() -> Self {
        Self { overrides: None }
    }

    /// Returns true when the lists have equal length.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.overrides.is_some()
    }

    /// Returns the metadata override for queue position `index` (0-based).
    #[must_use]
    pub fn metadata_for(&self, index: usize) -> Option<&TrackMetadata> {
        self.overrides.as_ref()?.get(index)?.as_ref()
    }

    /// Number of positions that passed the per-item check.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.overrides
            .as_ref()
            .map_or(0, |overrides| overrides.iter().flatten().count())
    }
}

/// Returns true when the queue item at a position corresponds to the CSV row.
///
/// Matches when the item's original input equals the row's search query, or
/// when the item's processed query contains it. Both sides are trimmed.
#[must_use]
pub fn entry_matches(entry: &CsvTrackEntry, item: &QueueItem) -> bool {
    let query = entry.search_query.trim();
    if query.is_empty() {
        return false;
    }
    item.original_input.trim() == query || item.processed_query.trim().contains(query)
}

/// Lines up CSV rows against queue items by position.
///
/// Unequal lengths produce an unusable correlation: no metadata is applied
/// to any item for the run.
#[must_use]
pub fn correlate(entries: &[CsvTrackEntry], items: &[QueueItem]) -> Correlation {
    if entries.len() != items.len() {
        debug!(
            csv_rows = entries.len(),
            queue_items = items.len(),
            "CSV rows do not line up with queue; metadata disabled"
        );
        return Correlation::unusable();
    }

    let overrides: Vec<Option<TrackMetadata>> = entries
        .iter()
        .zip(items)
        .map(|(entry, item)| entry_matches(entry, item).then(|| entry.metadata.clone()))
        .collect();

    let correlation = Correlation {
        overrides: Some(overrides),
    };
    debug!(
        matched = correlation.matched_count(),
        total = items.len(),
        "Correlated CSV rows with queue"
    );
    correlation
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::{AudioMode, classify, classify_with_mode};

    fn entry(row_number: usize, query: &str, title: &str) -> CsvTrackEntry {
        CsvTrackEntry {
            row_number,
            search_query: query.to_string(),
            metadata: TrackMetadata {
                title: Some(title.to_string()),
                ..TrackMetadata::default()
            },
        }
    }

    #[test]
    fn test_correlate_length_mismatch_is_unusable() {
        let entries = vec![entry(2, "A", "a"), entry(3, "B", "b"), entry(4, "C", "c")];
        let items = classify("A\nB");

        let correlation = correlate(&entries, &items);

        assert!(!correlation.is_usable());
        assert!(correlation.metadata_for(0).is_none());
        assert!(correlation.metadata_for(1).is_none());
        assert_eq!(correlation.matched_count(), 0);
    }

    #[test]
    fn test_correlate_checks_each_index_independently() {
        let entries = vec![entry(2, "Song A", "A"), entry(3, "Different", "B")];
        let items = classify("Song A\nSong B");

        let correlation = correlate(&entries, &items);

        assert!(correlation.is_usable());
        assert_eq!(correlation.metadata_for(0).unwrap().title.as_deref(), Some("A"));
        assert!(correlation.metadata_for(1).is_none());
    }

    #[test]
    fn test_correlate_matches_on_processed_query_substring() {
        let entries = vec![entry(2, "Queen - Bohemian Rhapsody", "Bohemian Rhapsody")];
        let items = classify_with_mode("Queen - Bohemian Rhapsody", AudioMode::Clean).into_items();

        assert!(entry_matches(&entries[0], &items[0]));
        let correlation = correlate(&entries, &items);
        assert!(correlation.metadata_for(0).is_some());
    }

    #[test]
    fn test_correlate_empty_lists_are_usable() {
        let correlation = correlate(&[], &[]);
        assert!(correlation.is_usable());
        assert!(correlation.metadata_for(0).is_none());
    }

    #[test]
    fn test_entry_matches_trims_both_sides() {
        let entries = vec![entry(2, "  Song A  ", "A")];
        let items = classify("   Song A");
        assert!(entry_matches(&entries[0], &items[0]));
    }

    #[test]
    fn test_entry_matches_rejects_blank_query() {
        let entries = vec![entry(2, "   ", "A")];
        let items = classify("Song A");
        assert!(!entry_matches(&entries[0], &items[0]));
    }

    #[test]
    fn test_metadata_for_out_of_range() {
        let entries = vec![entry(2, "Song A", "A")];
        let items = classify("Song A");
        let correlation = correlate(&entries, &items);
        assert!(correlation.metadata_for(5).is_none());
    }
}
