//! Core types for trecrun
//!
//! This crate defines the value types shared by every stage of the pipeline:
//! - Query: one search request read from a query file
//! - ScoredResult: one ranked hit, formatted as a TREC run line
//! - Error: the error taxonomy used across the workspace
//! - AnalyzerConfig: the text analysis settings shared by indexing and search
//! - HarnessConfig: run settings loaded from `trecrun.toml`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod config;
pub mod error;
pub mod query;
pub mod result;

pub use analyzer::{load_stopwords, AnalyzerConfig, MAX_TOKEN_LEN};
pub use config::{
    AnalyzerSection, CorpusConvention, HarnessConfig, CONFIG_FILE_NAME, DEFAULT_RUN_TAG,
    DEFAULT_TOP_K, ID_SUFFIX,
};
pub use error::{Error, Result};
pub use query::{Query, QueryId};
pub use result::{ResultSet, ScoredResult};
