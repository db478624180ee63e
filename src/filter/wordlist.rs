// file: src/filter/wordlist.rs
// description: static blocked-word list loaded once per run from a json asset

use crate::error::{Result, SweepError};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Immutable blocked-word list. Loaded once at the start of a scan; blank
/// entries are dropped.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Load the list from a JSON array of strings. A missing file yields an
    /// empty list (the scan then flags nothing); a file that exists but is
    /// not valid JSON is a hard error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Word list {} not found, no comments will be flagged",
                path.display()
            );
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let words: Vec<String> = serde_json::from_str(&raw).map_err(|e| {
            SweepError::WordList(format!("{} is not a JSON string array: {}", path.display(), e))
        })?;

        let list = Self::from_words(words);
        debug!("Loaded {} blocked words from {}", list.len(), path.display());
        Ok(list)
    }

    pub fn from_words(words: Vec<String>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
