//! Batch retrieval
//!
//! Runs every query of a set against an opened index and turns engine hits
//! into ranked [`ScoredResult`]s. Output is aligned with the input: the i-th
//! list always answers the i-th query, even when that query failed.
//!
//! # Ranking
//!
//! Hits are ordered by descending score. Equal scores fall back to the
//! engine's document order (ascending `DocRef`), which is indexing order for
//! an index built by [`CorpusIndexer`](crate::CorpusIndexer). Ranks are dense
//! and 1-based over the hits that are finally kept.

use std::cmp::Ordering;
use trecrun_core::{AnalyzerConfig, Error, Query, Result, ResultSet, ScoredResult};
use trecrun_engine::{IndexReaderHandle, FIELD_CONTENT};

/// Runs queries against an index reader
pub struct Retriever<R> {
    reader: R,
    analyzer: AnalyzerConfig,
    top_k: usize,
    run_tag: String,
}

impl<R: IndexReaderHandle> Retriever<R> {
    /// Create a retriever returning at most `top_k` hits per query.
    ///
    /// `analyzer` must be the configuration the index was built with.
    ///
    /// # Errors
    ///
    /// `Error::InvalidArgument` if `top_k` is zero or `run_tag` is empty or
    /// contains whitespace.
    pub fn new(
        reader: R,
        analyzer: AnalyzerConfig,
        top_k: usize,
        run_tag: impl Into<String>,
    ) -> Result<Self> {
        let run_tag = run_tag.into();
        if top_k == 0 {
            return Err(Error::InvalidArgument(
                "top-k must be a positive integer".to_string(),
            ));
        }
        if run_tag.is_empty() || run_tag.contains(char::is_whitespace) {
            return Err(Error::InvalidArgument(format!(
                "run tag {:?} must be a single non-empty word",
                run_tag
            )));
        }
        Ok(Retriever {
            reader,
            analyzer,
            top_k,
            run_tag,
        })
    }

    /// Maximum hits per query
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Run tag stamped on every result
    pub fn run_tag(&self) -> &str {
        &self.run_tag
    }

    /// Retrieve the ranked hits of one query.
    ///
    /// A hit whose stored fields cannot be loaded is logged and dropped.
    ///
    /// # Errors
    ///
    /// `Error::QueryParse` or `Error::EngineSearch` from the engine.
    pub fn retrieve<'q>(&self, query: &'q Query) -> Result<Vec<ScoredResult<'q>>> {
        let parsed = self
            .reader
            .parse_query(query.text(), FIELD_CONTENT, &self.analyzer)?;
        let mut hits = self.reader.search(&parsed, self.top_k)?;

        hits.sort_by(|a, b| rank_order(*a, *b));
        hits.truncate(self.top_k);

        let mut results = Vec::with_capacity(hits.len());
        for (doc, score) in hits {
            match self.reader.fetch_stored_fields(doc) {
                Ok(stored) => results.push(ScoredResult::new(
                    query,
                    results.len() + 1,
                    self.run_tag.as_str(),
                    stored.external_doc_id,
                    score,
                )),
                Err(e) => tracing::warn!(
                    target: "trecrun::search",
                    query_id = query.id(),
                    doc = ?doc,
                    error = %e,
                    "Dropping hit with unreadable stored fields"
                ),
            }
        }

        tracing::debug!(
            target: "trecrun::search",
            query_id = query.id(),
            hits = results.len(),
            "Query answered"
        );
        Ok(results)
    }

    /// Retrieve every query of `queries`, in order.
    ///
    /// A query that fails to parse or search gets an empty list; the batch
    /// continues.
    pub fn retrieve_all<'q>(&self, queries: &'q [Query]) -> ResultSet<'q> {
        let mut failed = 0usize;
        let results: ResultSet<'q> = queries
            .iter()
            .map(|query| match self.retrieve(query) {
                Ok(hits) => hits,
                Err(e) => {
                    failed += 1;
                    tracing::warn!(
                        target: "trecrun::search",
                        query_id = query.id(),
                        error = %e,
                        "Query produced no results"
                    );
                    Vec::new()
                }
            })
            .collect();

        tracing::info!(
            target: "trecrun::search",
            queries = queries.len(),
            failed,
            top_k = self.top_k,
            "Retrieval finished"
        );
        results
    }
}

fn rank_order<D: Ord>(a: (D, f32), b: (D, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Check that `results` answers `queries` one-to-one with at most `k` hits
/// per query, each hit pointing back at its own query.
///
/// # Errors
///
/// `Error::InvalidArgument` describing the first violation.
pub fn ensure_aligned(queries: &[Query], results: &ResultSet<'_>, k: usize) -> Result<()> {
    if queries.len() != results.len() {
        return Err(Error::InvalidArgument(format!(
            "{} result lists for {} queries",
            results.len(),
            queries.len()
        )));
    }
    for (i, (query, hits)) in queries.iter().zip(results).enumerate() {
        if hits.len() > k {
            return Err(Error::InvalidArgument(format!(
                "query {} at position {} has {} hits, more than {}",
                query.id(),
                i,
                hits.len(),
                k
            )));
        }
        if let Some(hit) = hits.iter().find(|hit| hit.query() != query) {
            return Err(Error::InvalidArgument(format!(
                "position {} holds a hit for query {} instead of {}",
                i,
                hit.query_id(),
                query.id()
            )));
        }
    }
    Ok(())
}
