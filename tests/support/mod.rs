//! Shared test doubles for pipeline and store integration tests.
//!
//! The mocks record every call so tests can assert on what the driver asked
//! the external capabilities to do, and in what order.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;
use tunefetch_core::download::{DownloadError, DownloadOutcome, Downloader};
use tunefetch_core::metadata::TrackMetadata;
use tunefetch_core::parser::VideoId;
use tunefetch_core::pipeline::PipelineRun;
use tunefetch_core::resolver::{ResolveError, Resolver, SearchHit};

/// Scripted answer for one search query.
#[derive(Debug, Clone)]
enum Answer {
    Hit(String),
    Fail(String),
}

/// Resolver that answers from a fixed script. Unknown queries match nothing.
#[derive(Debug, Default)]
pub struct ScriptedResolver {
    answers: HashMap<String, Answer>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `query` with video `id`.
    pub fn with_hit(mut self, query: &str, id: &str) -> Self {
        self.answers
            .insert(query.to_string(), Answer::Hit(id.to_string()));
        self
    }

    /// Fails `query` with a tool error.
    pub fn with_failure(mut self, query: &str, stderr: &str) -> Self {
        self.answers
            .insert(query.to_string(), Answer::Fail(stderr.to_string()));
        self
    }

    /// Queries received, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Resolver for ScriptedResolver {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn resolve(&self, query: &str) -> Result<Option<SearchHit>, ResolveError> {
        self.calls.lock().unwrap().push(query.to_string());
        match self.answers.get(query) {
            Some(Answer::Hit(id)) => Ok(Some(SearchHit::new(VideoId::new(id.clone())))),
            Some(Answer::Fail(stderr)) => Err(ResolveError::failed(query, Some(1), stderr.clone())),
            None => Ok(None),
        }
    }
}

/// One recorded download request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireCall {
    pub id: String,
    pub metadata: Option<TrackMetadata>,
    /// Progress published by the driver when the call was made.
    pub progress: Option<u8>,
}

/// Downloader that succeeds unless told to fail a given id.
#[derive(Debug, Default)]
pub struct RecordingDownloader {
    failing_ids: HashSet<String>,
    calls: Mutex<Vec<AcquireCall>>,
    observer: Option<watch::Receiver<PipelineRun>>,
    interrupt_after: Option<(usize, Arc<AtomicBool>)>,
}

impl RecordingDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes downloads of `id` fail.
    pub fn failing(mut self, id: &str) -> Self {
        self.failing_ids.insert(id.to_string());
        self
    }

    /// Records the published progress at each call.
    pub fn observing(mut self, updates: watch::Receiver<PipelineRun>) -> Self {
        self.observer = Some(updates);
        self
    }

    /// Sets `flag` once `calls` downloads have been made.
    pub fn interrupt_after(mut self, calls: usize, flag: Arc<AtomicBool>) -> Self {
        self.interrupt_after = Some((calls, flag));
        self
    }

    /// Requests received, in call order.
    pub fn calls(&self) -> Vec<AcquireCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Ids requested, in call order.
    pub fn ids(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.id).collect()
    }
}

#[async_trait]
impl Downloader for RecordingDownloader {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn acquire(
        &self,
        id: &VideoId,
        destination: &Path,
        metadata: Option<&TrackMetadata>,
    ) -> Result<DownloadOutcome, DownloadError> {
        let progress = self.observer.as_ref().map(|rx| rx.borrow().progress);
        let call_count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(AcquireCall {
                id: id.to_string(),
                metadata: metadata.cloned(),
                progress,
            });
            calls.len()
        };

        if let Some((after, flag)) = &self.interrupt_after
            && call_count >= *after
        {
            flag.store(true, Ordering::SeqCst);
        }

        if self.failing_ids.contains(id.as_str()) {
            return Err(DownloadError::failed(id.as_str(), Some(1), "ERROR: mock failure"));
        }

        Ok(DownloadOutcome {
            path: destination.join(format!("{id}.mp3")),
            tagged: metadata.is_some(),
        })
    }
}
