//! Run evaluation against relevance judgments
//!
//! Reads CACM-style qrels (`<qid> Q0 CACM-<docid> <rel>`) and a run file
//! written by [`ResultWriter`](crate::ResultWriter), then computes for each
//! judged query:
//! - Average precision (divided by the number of relevant documents)
//! - Reciprocal rank of the first relevant hit
//! - Precision at 5 and 20
//! - Recall over the whole list
//! - Precision and recall after every retrieved document
//!
//! MAP and MRR average over judged queries; a judged query absent from the
//! run scores zero.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use trecrun_core::{Error, QueryId, Result};

/// Relevant documents per query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qrels {
    judged: BTreeMap<QueryId, HashSet<u32>>,
}

impl Qrels {
    /// Load a qrels file.
    ///
    /// # Errors
    ///
    /// `Error::Io` if unreadable, `Error::InvalidArgument` on a malformed line.
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Parse qrels text.
    ///
    /// The document column may carry a collection prefix (`CACM-0042`); the
    /// digits after the last `-` are the id. Lines with relevance `<= 0` are
    /// ignored; a missing relevance column counts as relevant.
    pub fn parse(content: &str) -> Result<Self> {
        let mut judged: BTreeMap<QueryId, HashSet<u32>> = BTreeMap::new();
        for (index, line) in content.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < 3 {
                return Err(Error::InvalidArgument(format!(
                    "qrels line {}: expected '<qid> <iter> <doc> <rel>'",
                    index + 1
                )));
            }
            let qid = parse_field::<QueryId>(fields[0], "query id", index)?;
            let doc = fields[2].rsplit('-').next().unwrap_or(fields[2]);
            let doc = parse_field::<u32>(doc, "document id", index)?;
            let rel = match fields.get(3) {
                Some(rel) => parse_field::<i32>(rel, "relevance", index)?,
                None => 1,
            };
            if rel > 0 {
                judged.entry(qid).or_default().insert(doc);
            }
        }
        Ok(Qrels { judged })
    }

    /// Relevant documents of `query`, if it was judged
    pub fn relevant(&self, query: QueryId) -> Option<&HashSet<u32>> {
        self.judged.get(&query)
    }

    /// Number of judged queries
    pub fn len(&self) -> usize {
        self.judged.len()
    }

    /// True if no query has a relevant document
    pub fn is_empty(&self) -> bool {
        self.judged.is_empty()
    }
}

/// Ranked document ids per query, read back from a run file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRankings {
    ranked: BTreeMap<QueryId, Vec<u32>>,
}

impl RunRankings {
    /// Load a run file.
    ///
    /// # Errors
    ///
    /// `Error::Io` if unreadable, `Error::InvalidArgument` on a malformed line.
    pub fn load(path: &Path) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Parse run lines `<qid> Q0 <doc> <rank> <score> <tag>`.
    ///
    /// Hits are ordered by the rank column, not by line position.
    pub fn parse(content: &str) -> Result<Self> {
        let mut rows: BTreeMap<QueryId, Vec<(usize, u32)>> = BTreeMap::new();
        for (index, line) in content.lines().enumerate() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < 4 {
                return Err(Error::InvalidArgument(format!(
                    "run line {}: expected '<qid> Q0 <doc> <rank> <score> <tag>'",
                    index + 1
                )));
            }
            let qid = parse_field::<QueryId>(fields[0], "query id", index)?;
            let doc = parse_field::<u32>(fields[2], "document id", index)?;
            let rank = parse_field::<usize>(fields[3], "rank", index)?;
            rows.entry(qid).or_default().push((rank, doc));
        }

        let ranked = rows
            .into_iter()
            .map(|(qid, mut hits)| {
                hits.sort_by_key(|&(rank, _)| rank);
                (qid, hits.into_iter().map(|(_, doc)| doc).collect())
            })
            .collect();
        Ok(RunRankings { ranked })
    }

    /// Ranked documents of `query`, empty if absent from the run
    pub fn ranking(&self, query: QueryId) -> &[u32] {
        self.ranked.get(&query).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of queries with at least one hit
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    /// True if the run holds no hits
    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }
}

fn parse_field<T: std::str::FromStr>(raw: &str, what: &str, index: usize) -> Result<T> {
    raw.parse().map_err(|_| {
        Error::InvalidArgument(format!("line {}: {} {:?} is not valid", index + 1, what, raw))
    })
}

// ============================================================================
// Metrics
// ============================================================================

/// Precision and recall after one retrieved document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankPoint {
    /// 1-based rank
    pub rank: usize,
    /// Document retrieved at this rank
    pub doc_id: u32,
    /// Whether the document is judged relevant
    pub relevant: bool,
    /// Relevant retrieved so far over documents retrieved so far
    pub precision: f64,
    /// Relevant retrieved so far over all relevant documents
    pub recall: f64,
}

/// Metrics for one judged query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMetrics {
    /// Query id
    pub query_id: QueryId,
    /// Number of relevant documents in the judgments
    pub relevant: usize,
    /// Number of relevant documents retrieved
    pub relevant_retrieved: usize,
    /// Average precision
    pub average_precision: f64,
    /// Reciprocal rank of the first relevant hit
    pub reciprocal_rank: f64,
    /// Precision at rank 5
    pub precision_at_5: f64,
    /// Precision at rank 20
    pub precision_at_20: f64,
    /// Recall over the full ranking
    pub recall: f64,
    /// Precision and recall at every rank of the run
    pub ranks: Vec<RankPoint>,
}

impl QueryMetrics {
    /// Compute metrics for `ranking` against the `relevant` set.
    pub fn compute(query_id: QueryId, ranking: &[u32], relevant: &HashSet<u32>) -> Self {
        let mut hits = 0usize;
        let mut precision_sum = 0.0;
        let mut reciprocal_rank = 0.0;
        let mut ranks = Vec::with_capacity(ranking.len());

        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
        for (i, &doc) in ranking.iter().enumerate() {
            let is_relevant = relevant.contains(&doc);
            if is_relevant {
                hits += 1;
                precision_sum += hits as f64 / (i + 1) as f64;
                if hits == 1 {
                    reciprocal_rank = 1.0 / (i + 1) as f64;
                }
            }
            ranks.push(RankPoint {
                rank: i + 1,
                doc_id: doc,
                relevant: is_relevant,
                precision: ratio(hits, i + 1),
                recall: ratio(hits, relevant.len()),
            });
        }

        QueryMetrics {
            query_id,
            relevant: relevant.len(),
            relevant_retrieved: hits,
            average_precision: if relevant.is_empty() {
                0.0
            } else {
                precision_sum / relevant.len() as f64
            },
            reciprocal_rank,
            precision_at_5: precision_at(ranking, relevant, 5),
            precision_at_20: precision_at(ranking, relevant, 20),
            recall: ratio(hits, relevant.len()),
            ranks,
        }
    }
}

/// Precision at cutoff `k`, always dividing by `k`
fn precision_at(ranking: &[u32], relevant: &HashSet<u32>, k: usize) -> f64 {
    let found = ranking
        .iter()
        .take(k)
        .filter(|doc| relevant.contains(doc))
        .count();
    found as f64 / k as f64
}

/// Aggregate metrics of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    /// Mean average precision over judged queries
    pub map: f64,
    /// Mean reciprocal rank over judged queries
    pub mrr: f64,
    /// Mean P@5
    pub mean_precision_at_5: f64,
    /// Mean P@20
    pub mean_precision_at_20: f64,
    /// Judged queries evaluated
    pub queries: usize,
    /// Per-query breakdown in query id order
    pub per_query: Vec<QueryMetrics>,
}

/// Evaluate `run` against `qrels`.
pub fn evaluate(qrels: &Qrels, run: &RunRankings) -> EvaluationSummary {
    let per_query: Vec<QueryMetrics> = qrels
        .judged
        .iter()
        .map(|(&qid, relevant)| QueryMetrics::compute(qid, run.ranking(qid), relevant))
        .collect();

    let n = per_query.len();
    let mean = |f: fn(&QueryMetrics) -> f64| {
        if n == 0 {
            0.0
        } else {
            per_query.iter().map(f).sum::<f64>() / n as f64
        }
    };

    let summary = EvaluationSummary {
        map: mean(|m| m.average_precision),
        mrr: mean(|m| m.reciprocal_rank),
        mean_precision_at_5: mean(|m| m.precision_at_5),
        mean_precision_at_20: mean(|m| m.precision_at_20),
        queries: n,
        per_query,
    };

    tracing::info!(
        target: "trecrun::search",
        queries = summary.queries,
        map = summary.map,
        mrr = summary.mrr,
        "Run evaluated"
    );
    summary
}
