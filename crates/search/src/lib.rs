//! Indexing and retrieval pipeline for trecrun
//!
//! This crate provides:
//! - QueryLoader for simple and legacy CACM query files
//! - CorpusIndexer and reset_index for building indexes from a corpus directory
//! - Retriever for batch, rank-aligned retrieval
//! - ResultWriter for TREC run files
//! - Run evaluation (MAP, MRR, P@k, per-rank precision/recall) against
//!   relevance judgments
//! - SnippetGenerator for query-biased snippets of ranked documents
//!
//! Every stage is generic over the engine contract in `trecrun-engine`.
//!
//! # Usage
//!
//! ```ignore
//! use trecrun_search::{CorpusIndexer, QueryLoader, ResultWriter, Retriever};
//!
//! let indexer = CorpusIndexer::new(TantivyEngine::new(), analyzer.clone(), convention);
//! indexer.index(corpus, index)?;
//!
//! let queries = QueryLoader::load_simple(query_file)?;
//! let retriever = Retriever::new(TantivyEngine::new().open_index(index)?, analyzer, 100, "tantivy")?;
//! let results = retriever.retrieve_all(&queries);
//! ResultWriter::new("STOPPED")?.write(run_file, &results)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod evaluation;
pub mod indexer;
pub mod query_loader;
pub mod retriever;
pub mod snippet;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use evaluation::{evaluate, EvaluationSummary, QueryMetrics, Qrels, RankPoint, RunRankings};
pub use indexer::{external_doc_id, reset_index, CorpusIndexer, IndexSummary, ID_SUFFIX};
pub use query_loader::QueryLoader;
pub use retriever::{ensure_aligned, Retriever};
pub use snippet::{render_snippet, Snippet, SnippetGenerator, DEFAULT_SNIPPET_WORDS};
pub use writer::ResultWriter;
