//! Error types for CSV import.

use thiserror::Error;

/// Errors that abort a whole CSV import.
///
/// Problems with individual rows never produce this error; they are counted
/// and reported in [`super::CsvImportResult::errors`].
#[derive(Debug, Error)]
pub enum CsvImportError {
    /// The header row could not be read.
    #[error("failed to read CSV headers: {source}\n  Suggestion: {suggestion}")]
    Headers {
        /// Underlying CSV reader error.
        #[source]
        source: csv::Error,
        /// How to fix the issue.
        suggestion: String,
    },

    /// Not a single row produced a usable track.
    #[error(
        "no usable tracks in CSV ({error_count} row error(s))\n  Suggestion: Ensure rows provide 'Artist Name(s)' or 'Track Name'"
    )]
    NoTracks {
        /// Number of rows that failed.
        error_count: usize,
    },
}

impl CsvImportError {
    /// Creates a `Headers` error.
    #[must_use]
    pub fn headers(source: csv::Error) -> Self {
        Self::Headers {
            source,
            suggestion: "Export the playlist again as UTF-8 CSV with a header row".to_string(),
        }
    }

    /// Creates a `NoTracks` error.
    #[must_use]
    pub fn no_tracks(error_count: usize) -> Self {
        Self::NoTracks { error_count }
    }
}

/// Message for a row that names neither artist nor track.
pub(super) fn missing_query_fields(row_number: usize) -> String {
    format!(
        "Row {row_number}: Missing both 'Artist Name(s)' and 'Track Name' - cannot create search query"
    )
}

/// Message for a row the CSV reader rejected.
pub(super) fn malformed_record(row_number: usize, error: &csv::Error) -> String {
    format!("Row {row_number}: Failed to parse CSV record: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tracks_message() {
        let msg = CsvImportError::no_tracks(3).to_string();
        assert!(msg.contains("3 row error(s)"));
        assert!(msg.contains("Suggestion"));
    }

    #[test]
    fn test_missing_query_fields_message() {
        let msg = missing_query_fields(4);
        assert!(msg.starts_with("Row 4:"));
        assert!(msg.contains("Missing both"));
    }
}
