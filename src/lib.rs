//! Tunefetch Core Library
//!
//! This library turns a block of pasted lines (video links or search
//! phrases) into a queue of audio downloads processed one at a time, with
//! optional track metadata imported from a playlist CSV.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Line classification into direct references and search phrases
//! - [`csv_import`] - Playlist CSV loading into track entries
//! - [`correlate`] - Positional matching of CSV rows to queue items
//! - [`resolver`] - Search resolution to a video identifier
//! - [`download`] - Audio acquisition, title cleanup and ID3 tagging
//! - [`pipeline`] - Sequential driver with per-item failure isolation
//! - [`store`] - Single-owner queue state with reset

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod correlate;
pub mod csv_import;
pub mod download;
pub mod metadata;
pub mod parser;
pub mod pipeline;
pub mod resolver;
pub mod store;

// Re-export commonly used types
pub use correlate::{Correlation, correlate};
pub use csv_import::{CsvImportError, CsvImportResult, CsvTrackEntry, parse_csv};
pub use download::{DownloadError, DownloadOutcome, Downloader, YtDlpDownloader};
pub use metadata::TrackMetadata;
pub use parser::{AudioMode, InputKind, QueueItem, VideoId, classify, classify_with_mode};
pub use pipeline::{PipelineDriver, PipelineError, PipelineRun, RunState};
pub use resolver::{ResolveError, Resolver, SearchHit, YtDlpResolver};
pub use store::{DownloadStore, StoreError};
