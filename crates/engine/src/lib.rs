//! Text index engine for trecrun
//!
//! This crate provides:
//! - The engine contract the pipeline codes against (`TextIndexEngine`,
//!   `IndexWriterHandle`, `IndexReaderHandle`)
//! - Field names and the per-document field bundle
//! - Analyzer construction from an `AnalyzerConfig`
//! - `TantivyEngine`, the tantivy-backed implementation of the contract
//!
//! The pipeline never touches tantivy types directly, so tests can swap in
//! an engine double that fails on demand.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod document;
pub mod tantivy_index;
pub mod traits;

pub use analyzer::{analyze, build_analyzer, TermAnalyzer, ANALYZER_NAME};
pub use document::{DocumentFields, StoredFields, FIELD_CONTENT, FIELD_DOC_ID, FIELD_NAME, FIELD_PATH};
pub use tantivy_index::{TantivyEngine, TantivyIndexReader, TantivyIndexWriter, ANALYZER_FILE};
pub use traits::{IndexReaderHandle, IndexWriterHandle, TextIndexEngine};
