//! CSV import of exported playlists.
//!
//! Each data row becomes one [`CsvTrackEntry`] holding a search query and the
//! optional [`TrackMetadata`] to embed after download. Row-level problems are
//! counted and reported without aborting the import; the whole batch is then
//! handed to the store in a single assignment.
//!
//! # Example
//!
//! ```
//! use tunefetch_core::csv_import::parse_csv;
//! use tunefetch_core::parser::AudioMode;
//!
//! let content = "Artist Name(s),Track Name\nThe Beatles,Hey Jude";
//! let import = parse_csv(content, AudioMode::Official).unwrap();
//! assert_eq!(import.tracks[0].search_query, "The Beatles - Hey Jude");
//! ```

mod error;

pub use error::CsvImportError;

use std::io::Cursor;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::metadata::TrackMetadata;
use crate::parser::AudioMode;

/// Column headers produced by common playlist exporters.
pub const EXPECTED_HEADERS: [&str; 6] = [
    "Artist Name(s)",
    "Track Name",
    "Album Name",
    "Artist Genres",
    "Album Release Date",
    "BPM/Tempo",
];

/// One row imported from a CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTrackEntry {
    /// 1-based line in the source file (the header is row 1).
    pub row_number: usize,
    /// Text used to build the matching input line.
    pub search_query: String,
    /// Descriptive fields to embed; unset fields are not overridden.
    pub metadata: TrackMetadata,
}

/// Outcome of a CSV import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvImportResult {
    /// Successfully imported rows, in file order.
    pub tracks: Vec<CsvTrackEntry>,
    /// Rows seen (tracks plus errors).
    pub total_count: usize,
    /// Rows that produced a track.
    pub success_count: usize,
    /// Rows that failed.
    pub error_count: usize,
    /// One message per failed row.
    pub errors: Vec<String>,
    /// Search mode the import was made for.
    pub mode: AudioMode,
}

impl CsvImportResult {
    /// Returns true if no track was imported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Returns the number of imported tracks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Renders the queue input text, one search query per line.
    ///
    /// Classifying this text yields exactly one queue item per track, in
    /// the same order, which is what lets the correlator line them up.
    #[must_use]
    pub fn to_input_text(&self) -> String {
        self.tracks
            .iter()
            .map(|track| track.search_query.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Column positions resolved once from the header row.
#[derive(Debug, Clone, Copy, Default)]
struct ColumnMap {
    artists: Option<usize>,
    title: Option<usize>,
    album: Option<usize>,
    genres: Option<usize>,
    release_date: Option<usize>,
    tempo: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Self {
        Self {
            artists: find_column_index(headers, EXPECTED_HEADERS[0]),
            title: find_column_index(headers, EXPECTED_HEADERS[1]),
            album: find_column_index(headers, EXPECTED_HEADERS[2]),
            genres: find_column_index(headers, EXPECTED_HEADERS[3]),
            release_date: find_column_index(headers, EXPECTED_HEADERS[4]),
            tempo: find_column_index(headers, EXPECTED_HEADERS[5]),
        }
    }

    fn metadata(self, record: &StringRecord) -> TrackMetadata {
        TrackMetadata {
            title: cell(record, self.title),
            artists: cell(record, self.artists),
            album: cell(record, self.album),
            genres: cell(record, self.genres),
            release_date: cell(record, self.release_date),
            tempo: cell(record, self.tempo),
        }
    }
}

/// Reads one cell with whitespace runs (including quoted line breaks) collapsed.
fn cell(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|idx| record.get(idx))
        .map(|value| value.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|value| !value.is_empty())
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .replace([' ', '-', '/'], "_")
        .replace(['(', ')', '[', ']', '"'], "")
}

fn find_column_index(headers: &[String], target: &str) -> Option<usize> {
    let normalized_target = normalize_header(target);

    headers.iter().position(|header| {
        let normalized_header = normalize_header(header);
        !normalized_header.is_empty()
            && (normalized_header == normalized_target
                || normalized_header.contains(&normalized_target)
                || normalized_target.contains(&normalized_header))
    })
}

fn read_headers(content: &str) -> Result<(csv::Reader<Cursor<&str>>, Vec<String>), CsvImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(content));

    let headers = reader
        .headers()
        .map_err(CsvImportError::headers)?
        .iter()
        .map(str::to_string)
        .collect();

    Ok((reader, headers))
}

/// Builds the search query for a row: `"Artist - Track"`, or whichever is present.
fn build_search_query(metadata: &TrackMetadata) -> Option<String> {
    match (&metadata.artists, &metadata.title) {
        (Some(artist), Some(track)) => Some(format!("{artist} - {track}")),
        (Some(artist), None) => Some(artist.clone()),
        (None, Some(track)) => Some(track.clone()),
        (None, None) => None,
    }
}

/// Parses CSV content into track entries.
///
/// Rows missing both artist and track name, and rows the CSV reader rejects,
/// are counted as errors and skipped. Blank lines are ignored.
///
/// # Errors
///
/// - [`CsvImportError::Headers`] when the header row cannot be read.
/// - [`CsvImportError::NoTracks`] when rows were present but every one failed.
///   A file with only a header row imports successfully as an empty batch.
#[tracing::instrument(skip(content), fields(content_len = content.len(), mode = %mode))]
pub fn parse_csv(content: &str, mode: AudioMode) -> Result<CsvImportResult, CsvImportError> {
    let (mut reader, headers) = read_headers(content)?;
    let columns = ColumnMap::from_headers(&headers);
    debug!(?columns, "Resolved CSV columns");

    let mut tracks = Vec::new();
    let mut errors = Vec::new();

    for result in reader.records() {
        // Header is row 1; the reader's position reports the true line even past blank lines.
        let row_number = match &result {
            Ok(record) => record.position().map_or(tracks.len() + errors.len() + 2, |pos| {
                usize::try_from(pos.line()).unwrap_or(usize::MAX)
            }),
            Err(_) => tracks.len() + errors.len() + 2,
        };

        let record = match result {
            Ok(record) => record,
            Err(error) => {
                warn!(row = row_number, error = %error, "Skipped malformed CSV row");
                errors.push(error::malformed_record(row_number, &error));
                continue;
            }
        };

        let metadata = columns.metadata(&record);
        let Some(search_query) = build_search_query(&metadata) else {
            debug!(row = row_number, "Skipped CSV row without artist or track");
            errors.push(error::missing_query_fields(row_number));
            continue;
        };

        tracks.push(CsvTrackEntry {
            row_number,
            search_query,
            metadata,
        });
    }

    if tracks.is_empty() && !errors.is_empty() {
        return Err(CsvImportError::no_tracks(errors.len()));
    }

    let success_count = tracks.len();
    let error_count = errors.len();
    info!(
        tracks = success_count,
        errors = error_count,
        "CSV import complete"
    );

    Ok(CsvImportResult {
        total_count: success_count + error_count,
        tracks,
        success_count,
        error_count,
        errors,
        mode,
    })
}

/// Returns which of [`EXPECTED_HEADERS`] are present in the CSV header row.
///
/// # Errors
///
/// Returns [`CsvImportError::Headers`] when the header row cannot be read.
pub fn validate_headers(content: &str) -> Result<Vec<String>, CsvImportError> {
    let (_, headers) = read_headers(content)?;
    Ok(EXPECTED_HEADERS
        .iter()
        .filter(|expected| find_column_index(&headers, expected).is_some())
        .map(|expected| (*expected).to_string())
        .collect())
}
