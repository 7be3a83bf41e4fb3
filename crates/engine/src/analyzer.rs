//! Analyzer construction
//!
//! Pipeline: split on non-alphanumeric characters → drop tokens longer than
//! `MAX_TOKEN_LEN` → lowercase → remove stopwords (optional) → English stem
//! (optional).
//!
//! Indexing and query parsing both build their analyzer through
//! [`build_analyzer`], so the two sides tokenize identically whenever they
//! are given the same `AnalyzerConfig`.

use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter,
    TextAnalyzer, TokenStream,
};
use trecrun_core::{AnalyzerConfig, MAX_TOKEN_LEN};

/// Name under which the analyzer is registered for the content field.
pub const ANALYZER_NAME: &str = "trecrun";

/// Build the tantivy analyzer described by `config`.
pub fn build_analyzer(config: &AnalyzerConfig) -> TextAnalyzer {
    let mut builder = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter_dynamic(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter_dynamic(LowerCaser);

    if !config.stopwords.is_empty() {
        builder = builder.filter_dynamic(StopWordFilter::remove(config.stopwords.clone()));
    }
    if config.stem {
        builder = builder.filter_dynamic(Stemmer::new(Language::English));
    }

    builder.build()
}

/// Run `text` through the analyzer and collect the resulting terms.
///
/// # Example
///
/// ```
/// use trecrun_core::AnalyzerConfig;
/// use trecrun_engine::analyze;
///
/// let terms = analyze(&AnalyzerConfig::simple(), "Hello, World!");
/// assert_eq!(terms, vec!["hello", "world"]);
/// ```
pub fn analyze(config: &AnalyzerConfig, text: &str) -> Vec<String> {
    TermAnalyzer::new(config).terms(text)
}

/// Analyzer built once and reused across many short inputs
pub struct TermAnalyzer {
    inner: TextAnalyzer,
}

impl TermAnalyzer {
    /// Build the analyzer described by `config`
    pub fn new(config: &AnalyzerConfig) -> Self {
        TermAnalyzer {
            inner: build_analyzer(config),
        }
    }

    /// Terms produced for `text`
    pub fn terms(&mut self, text: &str) -> Vec<String> {
        let mut stream = self.inner.token_stream(text);
        let mut terms = Vec::new();
        while stream.advance() {
            terms.push(stream.token().text.clone());
        }
        terms
    }
}
