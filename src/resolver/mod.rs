//! Search resolution for queue items without a known video identifier.
//!
//! A [`Resolver`] turns a search phrase into at most one [`SearchHit`].
//! Finding nothing is a normal outcome (`Ok(None)`); only failures of the
//! search capability itself are errors.
//!
//! # Example
//!
//! ```no_run
//! use tunefetch_core::resolver::{Resolver, YtDlpResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = YtDlpResolver::new("yt-dlp");
//! if let Some(hit) = resolver.resolve("Artist - Song official audio").await? {
//!     println!("Found {}", hit.id);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod ytdlp;

pub use error::ResolveError;
pub use ytdlp::{DEFAULT_SEARCH_TIMEOUT, YtDlpResolver};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::parser::VideoId;

/// The single best match for a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Canonical identifier of the matched video.
    pub id: VideoId,
    /// Video title, when reported.
    pub title: Option<String>,
    /// Channel or uploader name, when reported.
    pub uploader: Option<String>,
    /// Duration in seconds, when reported.
    pub duration_seconds: Option<u64>,
}

impl SearchHit {
    /// Creates a hit with only an identifier.
    #[must_use]
    pub fn new(id: VideoId) -> Self {
        Self {
            id,
            title: None,
            uploader: None,
            duration_seconds: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Trait for search backends.
///
/// Uses `async_trait` so the pipeline can hold a `&dyn Resolver`.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Returns the resolver's name (e.g., "yt-dlp").
    fn name(&self) -> &str;

    /// Looks up the best match for `query`.
    ///
    /// Returns `Ok(None)` when the search ran but matched nothing.
    async fn resolve(&self, query: &str) -> Result<Option<SearchHit>, ResolveError>;
}
