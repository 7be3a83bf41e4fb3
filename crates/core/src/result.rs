//! Ranked result model and TREC run-line formatting
//!
//! Downstream evaluation tools parse run lines positionally, so the line
//! format produced here is a public contract:
//!
//! ```text
//! <queryId> Q0 <externalDocId> <rank> <score> <runTag>
//! ```
//!
//! The persisted form appends `_<runDescription>` to the run tag.

use crate::query::{Query, QueryId};
use std::fmt;

/// Result lists for a query set, aligned by position with the queries.
///
/// The i-th list holds the hits of the i-th query; a query that failed to
/// parse or search still owns an (empty) slot.
pub type ResultSet<'q> = Vec<Vec<ScoredResult<'q>>>;

/// One ranked hit for a query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult<'q> {
    query: &'q Query,
    rank: usize,
    run_tag: String,
    external_doc_id: u32,
    score: f32,
}

impl<'q> ScoredResult<'q> {
    /// Create a result for `query` at 1-based `rank`
    pub fn new(
        query: &'q Query,
        rank: usize,
        run_tag: impl Into<String>,
        external_doc_id: u32,
        score: f32,
    ) -> Self {
        ScoredResult {
            query,
            rank,
            run_tag: run_tag.into(),
            external_doc_id,
            score,
        }
    }

    /// The query this hit answers
    pub fn query(&self) -> &'q Query {
        self.query
    }

    /// Id of the query this hit answers
    pub fn query_id(&self) -> QueryId {
        self.query.id()
    }

    /// 1-based rank within the query's result list
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Label of the retrieval method
    pub fn run_tag(&self) -> &str {
        &self.run_tag
    }

    /// Document id derived from the corpus filename
    pub fn external_doc_id(&self) -> u32 {
        self.external_doc_id
    }

    /// Engine-native relevance score, higher is better
    pub fn score(&self) -> f32 {
        self.score
    }

    /// TREC run line with the run tag as the last field
    pub fn line(&self) -> String {
        self.to_string()
    }

    /// TREC run line as written to a run file: the run tag is suffixed with
    /// `_<description>`.
    pub fn persisted_line(&self, description: &str) -> String {
        format!("{}_{}", self, description)
    }
}

impl fmt::Display for ScoredResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Q0 {} {} {} {}",
            self.query.id(),
            self.external_doc_id,
            self.rank,
            self.score,
            self.run_tag
        )
    }
}
