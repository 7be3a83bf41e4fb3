//! Engine contract used by the pipeline
//!
//! These traits are the only seam between the pipeline and a concrete full-text
//! engine. A build produces an [`IndexWriterHandle`] that is closed exactly
//! once; a search opens an [`IndexReaderHandle`] over a closed index.

use crate::document::{DocumentFields, StoredFields};
use std::fmt::Debug;
use std::path::Path;
use trecrun_core::{AnalyzerConfig, Result};

/// Factory for index writers and readers
pub trait TextIndexEngine {
    /// Writer produced by [`build_index`](Self::build_index)
    type Writer: IndexWriterHandle;
    /// Reader produced by [`open_index`](Self::open_index)
    type Reader: IndexReaderHandle;

    /// Create a new index at `destination`, analyzing content with `analyzer`.
    ///
    /// # Errors
    ///
    /// `Error::IndexAlreadyExists` if `destination` exists,
    /// `Error::EngineWrite` if the index cannot be created.
    fn build_index(&self, destination: &Path, analyzer: &AnalyzerConfig) -> Result<Self::Writer>;

    /// Open a finalized index for search.
    ///
    /// # Errors
    ///
    /// `Error::EngineOpen` if `path` is not a valid index.
    fn open_index(&self, path: &Path) -> Result<Self::Reader>;
}

/// Write side of an index under construction
pub trait IndexWriterHandle {
    /// Submit one document.
    ///
    /// # Errors
    ///
    /// `Error::EngineWrite` on I/O or validation failure. The writer stays
    /// usable; the caller decides whether to continue.
    fn add_document(&mut self, doc: &DocumentFields) -> Result<()>;

    /// Number of documents accepted so far
    fn num_docs(&self) -> u64;

    /// Flush and finalize the index, returning the number of documents in it.
    fn close(self) -> Result<u64>;
}

/// Read side of a finalized index
pub trait IndexReaderHandle {
    /// Engine-native parsed query
    type ParsedQuery;
    /// Engine-internal document handle.
    ///
    /// Its ordering is the deterministic tie-break between equal scores.
    type DocRef: Copy + Ord + Debug;

    /// Parse raw query text against `field` using `analyzer`.
    ///
    /// # Errors
    ///
    /// `Error::QueryParse` if the text is not a valid query.
    fn parse_query(
        &self,
        raw: &str,
        field: &str,
        analyzer: &AnalyzerConfig,
    ) -> Result<Self::ParsedQuery>;

    /// Return at most `top_k` hits as `(doc, score)`.
    ///
    /// # Errors
    ///
    /// `Error::EngineSearch` if the engine fails while searching.
    fn search(&self, query: &Self::ParsedQuery, top_k: usize) -> Result<Vec<(Self::DocRef, f32)>>;

    /// Load the stored fields of a hit.
    ///
    /// # Errors
    ///
    /// `Error::EngineSearch` if the document cannot be loaded or lacks a
    /// stored external id.
    fn fetch_stored_fields(&self, doc: Self::DocRef) -> Result<StoredFields>;

    /// Load the stored fields of the document indexed under
    /// `external_doc_id`, or `None` if no such document exists.
    ///
    /// # Errors
    ///
    /// `Error::EngineSearch` if the lookup itself fails.
    fn lookup(&self, external_doc_id: u32) -> Result<Option<StoredFields>>;

    /// Number of searchable documents
    fn num_docs(&self) -> u64;
}
