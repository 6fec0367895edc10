//! Queue state owned by a single caller.
//!
//! [`DownloadStore`] holds the input text, the classified queue, the imported
//! CSV batch and the state of the latest run. It is a plain value: the owner
//! passes it by reference, and [`DownloadStore::reset`] puts every field back
//! to its initial value in one assignment.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::correlate::{Correlation, correlate};
use crate::csv_import::CsvImportResult;
use crate::parser::{AudioMode, ClassifyCounts, QueueItem, classify_with_mode};
use crate::pipeline::{PipelineDriver, PipelineError, PipelineRun, preflight};

/// Errors from store operations that change the queue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A CSV import was attempted while typed input is present.
    #[error("cannot import CSV while input text is present\n  Suggestion: Clear the input first, or pass only --csv")]
    InputNotEmpty,
}

/// Single owner of all queue and run state.
#[derive(Debug, Clone, Default)]
pub struct DownloadStore {
    input_text: String,
    audio_mode: AudioMode,
    destination: Option<PathBuf>,
    items: Vec<QueueItem>,
    csv: Option<CsvImportResult>,
    run: PipelineRun,
}

impl DownloadStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the input text. The queue is rebuilt by [`Self::classify`].
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    /// Returns the input text.
    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Sets the search mode used by [`Self::classify`].
    pub fn set_audio_mode(&mut self, mode: AudioMode) {
        self.audio_mode = mode;
    }

    /// Returns the search mode.
    #[must_use]
    pub fn audio_mode(&self) -> AudioMode {
        self.audio_mode
    }

    /// Sets or clears the destination directory.
    pub fn set_destination(&mut self, destination: Option<PathBuf>) {
        self.destination = destination;
    }

    /// Returns the destination directory.
    #[must_use]
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Replaces the queue with a fresh classification of the input text.
    pub fn classify(&mut self) -> ClassifyCounts {
        let result = classify_with_mode(&self.input_text, self.audio_mode);
        let counts = result.counts();
        self.items = result.into_items();
        counts
    }

    /// Returns the classified queue.
    #[must_use]
    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    /// Assigns a whole CSV import and queues its tracks.
    ///
    /// The input text becomes one search query per track and the audio mode
    /// follows the import, so the queue lines up with the CSV rows.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InputNotEmpty`] when input text is already present.
    pub fn import_csv(&mut self, import: CsvImportResult) -> Result<ClassifyCounts, StoreError> {
        if !self.input_text.trim().is_empty() {
            return Err(StoreError::InputNotEmpty);
        }

        self.input_text = import.to_input_text();
        self.audio_mode = import.mode;
        debug!(tracks = import.len(), errors = import.error_count, "Assigned CSV import");
        self.csv = Some(import);
        Ok(self.classify())
    }

    /// Drops the imported CSV batch. The queue is left as is.
    pub fn clear_csv(&mut self) {
        self.csv = None;
    }

    /// Returns the imported CSV batch.
    #[must_use]
    pub fn csv(&self) -> Option<&CsvImportResult> {
        self.csv.as_ref()
    }

    /// Lines up the imported CSV rows with the current queue.
    #[must_use]
    pub fn correlation(&self) -> Correlation {
        self.csv
            .as_ref()
            .map_or_else(Correlation::unusable, |csv| correlate(&csv.tracks, &self.items))
    }

    /// Returns the state of the latest run.
    #[must_use]
    pub fn run(&self) -> &PipelineRun {
        &self.run
    }

    /// Runs the queue through `driver` and keeps the final state.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError`] when no destination is set or the queue is
    /// empty. No item is processed in that case.
    pub async fn start_run(
        &mut self,
        driver: &PipelineDriver<'_>,
    ) -> Result<&PipelineRun, PipelineError> {
        preflight(&self.items, self.destination.as_deref())?;
        let destination = self
            .destination
            .as_deref()
            .ok_or(PipelineError::NoDestination)?;

        let correlation = self.correlation();
        info!(
            items = self.items.len(),
            metadata = correlation.is_usable(),
            "Starting run from store"
        );

        let run = driver
            .run(&self.items, destination, |index| {
                correlation.metadata_for(index).cloned()
            })
            .await;
        self.run = run;
        Ok(&self.run)
    }

    /// Returns every field to its initial value.
    pub fn reset(&mut self) {
        *self = Self::default();
        debug!("Store reset");
    }
}
