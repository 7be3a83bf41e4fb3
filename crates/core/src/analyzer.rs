//! Text analysis settings shared by indexing and search
//!
//! The same [`AnalyzerConfig`] value must be handed to the corpus indexer and
//! to the retriever. The engine turns it into a concrete tokenizer chain:
//! split on non-alphanumeric characters, lowercase, drop overlong tokens,
//! then optionally remove stopwords and apply English stemming.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tokens longer than this many bytes are dropped.
pub const MAX_TOKEN_LEN: usize = 40;

/// Analyzer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Lowercased terms removed after tokenization
    #[serde(default)]
    pub stopwords: Vec<String>,
    /// Apply English (Porter/Snowball) stemming
    #[serde(default)]
    pub stem: bool,
}

impl AnalyzerConfig {
    /// Plain analyzer: tokenize and lowercase only
    pub fn simple() -> Self {
        Self::default()
    }

    /// Builder: remove the given stopwords
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords = normalize_stopwords(words);
        self
    }

    /// Builder: enable or disable stemming
    pub fn with_stemming(mut self, stem: bool) -> Self {
        self.stem = stem;
        self
    }

    /// Builder: remove the stopwords listed in `path`, one per line
    pub fn with_stopwords_file(self, path: &Path) -> Result<Self> {
        let words = load_stopwords(path)?;
        Ok(self.with_stopwords(words))
    }

    /// Short human-readable label, used in log lines
    pub fn label(&self) -> String {
        match (self.stopwords.is_empty(), self.stem) {
            (true, false) => "simple".to_string(),
            (true, true) => "stemmed".to_string(),
            (false, false) => format!("stopped({})", self.stopwords.len()),
            (false, true) => format!("stopped({})+stemmed", self.stopwords.len()),
        }
    }
}

/// Read a stopword file: one word per line, blank lines ignored.
pub fn load_stopwords(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read stopword file '{}': {}",
            path.display(),
            e
        ))
    })?;
    Ok(normalize_stopwords(content.lines()))
}

/// Trim, lowercase, drop blanks, sort and dedup.
fn normalize_stopwords<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}
