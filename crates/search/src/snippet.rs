//! Query-biased snippets for ranked documents
//!
//! Content is not stored in the index, so each snippet re-reads the source
//! file through the stored `path` field. A document is cut into sentences
//! (paragraphs split on blank lines, sentences on a period followed by
//! whitespace). Each sentence contributes the span between its first and last
//! query term, widened by a few words of context, scored as
//! `significant² / span length`. The best spans are taken until the word
//! budget is exceeded and shown in document order, joined by ` ... `, with
//! query-term words in upper case.

use serde::Serialize;
use std::collections::HashSet;
use trecrun_core::{AnalyzerConfig, Error, Query, QueryId, Result};
use trecrun_engine::{IndexReaderHandle, TermAnalyzer};

use crate::evaluation::RunRankings;

/// Default word budget of a snippet.
pub const DEFAULT_SNIPPET_WORDS: usize = 50;

/// Words of context kept on each side of a span.
const CONTEXT_WORDS: usize = 3;

/// Snippet of one ranked document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snippet {
    /// Query the document was ranked for
    pub query_id: QueryId,
    /// 1-based rank in the run
    pub rank: usize,
    /// External document id
    pub doc_id: u32,
    /// File name of the document
    pub name: String,
    /// Rendered snippet text, empty if no query term occurs in the document
    pub text: String,
}

/// Builds snippets from an opened index
pub struct SnippetGenerator<R> {
    reader: R,
    analyzer: AnalyzerConfig,
    max_words: usize,
}

impl<R: IndexReaderHandle> SnippetGenerator<R> {
    /// Create a generator; `analyzer` must be the one the index was built with.
    pub fn new(reader: R, analyzer: AnalyzerConfig) -> Self {
        SnippetGenerator {
            reader,
            analyzer,
            max_words: DEFAULT_SNIPPET_WORDS,
        }
    }

    /// Builder: stop adding spans once a snippet holds more than `max_words`
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }

    /// Snippet of document `doc_id` at `rank` for `query`.
    ///
    /// # Errors
    ///
    /// - `Error::EngineSearch` if the index holds no document `doc_id`
    /// - `Error::Io` if the indexed file can no longer be read
    pub fn snippet(&self, query: &Query, rank: usize, doc_id: u32) -> Result<Snippet> {
        let stored = self.reader.lookup(doc_id)?.ok_or_else(|| {
            Error::EngineSearch(format!("no document with id {} in the index", doc_id))
        })?;
        let bytes = std::fs::read(&stored.path)?;
        let content = String::from_utf8_lossy(&bytes);

        let mut analyzer = TermAnalyzer::new(&self.analyzer);
        let significant: HashSet<String> = analyzer.terms(query.text()).into_iter().collect();
        let text = render_snippet(&content, &significant, &mut analyzer, self.max_words);

        Ok(Snippet {
            query_id: query.id(),
            rank,
            doc_id,
            name: stored.name,
            text,
        })
    }

    /// Snippets for every ranked document of `run`, in query-file order then
    /// rank order.
    ///
    /// Run entries for queries missing from `queries` are ignored. A document
    /// that cannot be found or read is logged and left out.
    pub fn generate(&self, queries: &[Query], run: &RunRankings) -> Vec<Snippet> {
        let mut snippets = Vec::new();
        let mut failed = 0usize;
        for query in queries {
            for (i, &doc_id) in run.ranking(query.id()).iter().enumerate() {
                match self.snippet(query, i + 1, doc_id) {
                    Ok(snippet) => snippets.push(snippet),
                    Err(e) => {
                        failed += 1;
                        tracing::warn!(
                            target: "trecrun::search",
                            query_id = query.id(),
                            doc_id,
                            error = %e,
                            "No snippet for document"
                        );
                    }
                }
            }
        }

        tracing::info!(
            target: "trecrun::search",
            snippets = snippets.len(),
            failed,
            "Snippets generated"
        );
        snippets
    }
}

struct Span {
    sentence: usize,
    words: Vec<String>,
    score: f64,
}

/// Render the snippet of `content` for the `significant` query terms.
///
/// Words are matched after running them through `analyzer`, so the terms
/// must come from the same analyzer.
pub fn render_snippet(
    content: &str,
    significant: &HashSet<String>,
    analyzer: &mut TermAnalyzer,
    max_words: usize,
) -> String {
    let mut spans = Vec::new();
    for (sentence, words) in sentences(content).into_iter().enumerate() {
        let hits: Vec<bool> = words
            .iter()
            .map(|w| analyzer.terms(w).iter().any(|t| significant.contains(t)))
            .collect();
        let (first, last) = match (
            hits.iter().position(|&h| h),
            hits.iter().rposition(|&h| h),
        ) {
            (Some(first), Some(last)) => (first, last),
            _ => continue,
        };

        let start = first.saturating_sub(CONTEXT_WORDS);
        let end = (last + CONTEXT_WORDS + 1).min(words.len());
        let count = hits[start..end].iter().filter(|&&h| h).count();
        let score = (count * count) as f64 / (end - start) as f64;
        let rendered: Vec<String> = words[start..end]
            .iter()
            .zip(&hits[start..end])
            .map(|(w, &hit)| if hit { w.to_uppercase() } else { w.to_string() })
            .collect();
        spans.push(Span {
            sentence,
            words: rendered,
            score,
        });
    }

    spans.sort_by(|a, b| b.score.total_cmp(&a.score));
    let mut chosen = Vec::new();
    let mut total = 0usize;
    for span in spans {
        if total > max_words {
            break;
        }
        total += span.words.len();
        chosen.push(span);
    }
    chosen.sort_by_key(|span| span.sentence);

    chosen
        .iter()
        .map(|span| span.words.join(" "))
        .collect::<Vec<_>>()
        .join(" ... ")
}

/// Split text into sentences of whitespace-separated words.
fn sentences(content: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    for paragraph in content.split("\n\n") {
        let mut start = 0;
        for (i, c) in paragraph.char_indices() {
            if c == '.' && paragraph[i + 1..].starts_with(char::is_whitespace) {
                push_sentence(&mut out, &paragraph[start..i]);
                start = i + 1;
            }
        }
        push_sentence(&mut out, &paragraph[start..]);
    }
    out
}

fn push_sentence<'a>(out: &mut Vec<Vec<&'a str>>, text: &'a str) {
    let words: Vec<&str> = text.split_whitespace().collect();
    if !words.is_empty() {
        out.push(words);
    }
}
