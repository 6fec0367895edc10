//! Search mode that shapes the query sent to the resolver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Flavor of audio the search should favor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioMode {
    /// Studio release uploads.
    #[default]
    Official,
    /// Unprocessed uploads.
    Raw,
    /// Radio-safe edits.
    Clean,
}

impl AudioMode {
    /// Returns the stable label used in config files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Official => "official",
            Self::Raw => "raw",
            Self::Clean => "clean",
        }
    }

    /// Returns the phrase appended to search queries.
    #[must_use]
    pub fn search_suffix(self) -> &'static str {
        match self {
            Self::Official => "official audio",
            Self::Raw => "raw audio",
            Self::Clean => "clean audio",
        }
    }

    /// Builds the resolver query for a typed line.
    #[must_use]
    pub fn search_query(self, line: &str) -> String {
        format!("{} {}", line.trim(), self.search_suffix())
    }
}

impl fmt::Display for AudioMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "official" => Ok(Self::Official),
            "raw" => Ok(Self::Raw),
            "clean" => Ok(Self::Clean),
            other => Err(format!(
                "invalid audio mode: {other} (expected one of: official, raw, clean)"
            )),
        }
    }
}
