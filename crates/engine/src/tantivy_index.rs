//! tantivy-backed implementation of the engine contract
//!
//! Index layout: one tantivy index directory holding
//! - `content`: analyzed with the registered `trecrun` analyzer, not stored
//! - `path`, `name`: raw strings, stored
//! - `docid`: the external document id as an indexed, stored u64
//!
//! plus a `trecrun-analyzer.json` sidecar recording the analyzer the index
//! was built with.
//!
//! The writer runs a single indexing thread and commits once, so documents
//! land in one segment in submission order. Readers therefore see internal
//! addresses that follow indexing order, which makes the `(score desc,
//! address asc)` ranking reproducible.

use crate::analyzer::{build_analyzer, ANALYZER_NAME};
use crate::document::{
    DocumentFields, StoredFields, FIELD_CONTENT, FIELD_DOC_ID, FIELD_NAME, FIELD_PATH,
};
use crate::traits::{IndexReaderHandle, IndexWriterHandle, TextIndexEngine};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tantivy::collector::TopDocs;
use tantivy::query::{Query, QueryParser, TermQuery};
use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, Value, INDEXED, STORED,
    STRING,
};
use tantivy::tokenizer::TokenizerManager;
use tantivy::{DocAddress, Index, IndexWriter, ReloadPolicy, Searcher, TantivyDocument, Term};
use trecrun_core::{AnalyzerConfig, Error, Result};

/// Sidecar file recording the analyzer an index was built with.
pub const ANALYZER_FILE: &str = "trecrun-analyzer.json";

/// Indexing memory budget for the single writer thread.
const WRITER_HEAP_BYTES: usize = 50_000_000;

// ============================================================================
// Schema
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct SchemaFields {
    content: Field,
    path: Field,
    name: Field,
    doc_id: Field,
}

impl SchemaFields {
    fn from_schema(schema: &Schema) -> tantivy::Result<Self> {
        Ok(SchemaFields {
            content: schema.get_field(FIELD_CONTENT)?,
            path: schema.get_field(FIELD_PATH)?,
            name: schema.get_field(FIELD_NAME)?,
            doc_id: schema.get_field(FIELD_DOC_ID)?,
        })
    }
}

fn build_schema() -> (Schema, SchemaFields) {
    let mut builder = Schema::builder();

    let content_indexing = TextFieldIndexing::default()
        .set_tokenizer(ANALYZER_NAME)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let content = builder.add_text_field(
        FIELD_CONTENT,
        TextOptions::default().set_indexing_options(content_indexing),
    );
    let path = builder.add_text_field(FIELD_PATH, STRING | STORED);
    let name = builder.add_text_field(FIELD_NAME, STRING | STORED);
    let doc_id = builder.add_u64_field(FIELD_DOC_ID, INDEXED | STORED);

    let schema = builder.build();
    (
        schema,
        SchemaFields {
            content,
            path,
            name,
            doc_id,
        },
    )
}

// ============================================================================
// TantivyEngine
// ============================================================================

/// Engine factory backed by tantivy
#[derive(Debug, Clone, Copy, Default)]
pub struct TantivyEngine;

impl TantivyEngine {
    /// Create an engine
    pub fn new() -> Self {
        TantivyEngine
    }
}

impl TextIndexEngine for TantivyEngine {
    type Writer = TantivyIndexWriter;
    type Reader = TantivyIndexReader;

    fn build_index(&self, destination: &Path, analyzer: &AnalyzerConfig) -> Result<Self::Writer> {
        if destination.exists() {
            return Err(Error::IndexAlreadyExists(destination.to_path_buf()));
        }

        std::fs::create_dir_all(destination).map_err(|e| {
            Error::EngineWrite(format!(
                "cannot create index directory {}: {}",
                destination.display(),
                e
            ))
        })?;

        let (schema, fields) = build_schema();
        let index = Index::create_in_dir(destination, schema)
            .map_err(|e| Error::EngineWrite(e.to_string()))?;
        index
            .tokenizers()
            .register(ANALYZER_NAME, build_analyzer(analyzer));

        let writer: IndexWriter = index
            .writer_with_num_threads(1, WRITER_HEAP_BYTES)
            .map_err(|e| Error::EngineWrite(e.to_string()))?;

        tracing::debug!(
            target: "trecrun::engine",
            path = %destination.display(),
            analyzer = %analyzer.label(),
            "Index writer opened"
        );

        Ok(TantivyIndexWriter {
            writer,
            fields,
            destination: destination.to_path_buf(),
            analyzer: analyzer.clone(),
            added: 0,
        })
    }

    fn open_index(&self, path: &Path) -> Result<Self::Reader> {
        if !path.is_dir() {
            return Err(Error::engine_open(path, "index directory does not exist"));
        }

        let index = Index::open_in_dir(path).map_err(|e| Error::engine_open(path, e))?;
        let fields =
            SchemaFields::from_schema(&index.schema()).map_err(|e| Error::engine_open(path, e))?;
        let reader: tantivy::IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e: tantivy::TantivyError| Error::engine_open(path, e))?;
        let searcher = reader.searcher();

        let indexed_with = read_analyzer_sidecar(path);
        if indexed_with.is_none() {
            tracing::warn!(
                target: "trecrun::engine",
                path = %path.display(),
                "Index has no analyzer record; cannot verify query analysis matches indexing"
            );
        }

        tracing::info!(
            target: "trecrun::engine",
            path = %path.display(),
            num_docs = searcher.num_docs(),
            "Index opened"
        );

        Ok(TantivyIndexReader {
            schema: index.schema(),
            fields,
            searcher,
            indexed_with,
            mismatch_reported: AtomicBool::new(false),
            path: path.to_path_buf(),
        })
    }
}

fn read_analyzer_sidecar(index_path: &Path) -> Option<AnalyzerConfig> {
    let content = std::fs::read_to_string(index_path.join(ANALYZER_FILE)).ok()?;
    match serde_json::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(
                target: "trecrun::engine",
                error = %e,
                "Ignoring unreadable analyzer record"
            );
            None
        }
    }
}

// ============================================================================
// TantivyIndexWriter
// ============================================================================

/// Writer for an index under construction
pub struct TantivyIndexWriter {
    writer: IndexWriter,
    fields: SchemaFields,
    destination: PathBuf,
    analyzer: AnalyzerConfig,
    added: u64,
}

impl TantivyIndexWriter {
    fn to_tantivy_doc(&self, doc: &DocumentFields) -> TantivyDocument {
        let mut tantivy_doc = TantivyDocument::new();
        tantivy_doc.add_text(self.fields.content, &doc.content);
        tantivy_doc.add_text(self.fields.path, &doc.path);
        tantivy_doc.add_text(self.fields.name, &doc.name);
        tantivy_doc.add_u64(self.fields.doc_id, u64::from(doc.external_doc_id));
        tantivy_doc
    }
}

impl IndexWriterHandle for TantivyIndexWriter {
    fn add_document(&mut self, doc: &DocumentFields) -> Result<()> {
        let tantivy_doc = self.to_tantivy_doc(doc);
        self.writer
            .add_document(tantivy_doc)
            .map_err(|e| Error::EngineWrite(format!("{}: {}", doc.name, e)))?;
        self.added += 1;
        Ok(())
    }

    fn num_docs(&self) -> u64 {
        self.added
    }

    fn close(self) -> Result<u64> {
        let TantivyIndexWriter {
            mut writer,
            destination,
            analyzer,
            added,
            ..
        } = self;

        writer
            .commit()
            .map_err(|e| Error::EngineWrite(format!("commit failed: {}", e)))?;
        writer
            .wait_merging_threads()
            .map_err(|e| Error::EngineWrite(format!("merge failed: {}", e)))?;

        let record = serde_json::to_string_pretty(&analyzer)
            .map_err(|e| Error::EngineWrite(format!("cannot encode analyzer record: {}", e)))?;
        std::fs::write(destination.join(ANALYZER_FILE), record).map_err(|e| {
            Error::EngineWrite(format!("cannot write analyzer record: {}", e))
        })?;

        tracing::debug!(
            target: "trecrun::engine",
            path = %destination.display(),
            num_docs = added,
            "Index finalized"
        );

        Ok(added)
    }
}

// ============================================================================
// TantivyIndexReader
// ============================================================================

/// Read-only handle over a finalized index
pub struct TantivyIndexReader {
    schema: Schema,
    fields: SchemaFields,
    searcher: Searcher,
    indexed_with: Option<AnalyzerConfig>,
    mismatch_reported: AtomicBool,
    path: PathBuf,
}

impl TantivyIndexReader {
    /// Analyzer recorded when the index was built, if any
    pub fn indexed_with(&self) -> Option<&AnalyzerConfig> {
        self.indexed_with.as_ref()
    }

    /// Directory of the opened index
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_analyzer(&self, analyzer: &AnalyzerConfig) {
        if let Some(indexed_with) = &self.indexed_with {
            if indexed_with != analyzer && !self.mismatch_reported.swap(true, Ordering::Relaxed) {
                tracing::warn!(
                    target: "trecrun::engine",
                    indexed = %indexed_with.label(),
                    query = %analyzer.label(),
                    "Query analyzer differs from the analyzer used at index time"
                );
            }
        }
    }
}

impl IndexReaderHandle for TantivyIndexReader {
    type ParsedQuery = Box<dyn Query>;
    type DocRef = DocAddress;

    fn parse_query(
        &self,
        raw: &str,
        field: &str,
        analyzer: &AnalyzerConfig,
    ) -> Result<Self::ParsedQuery> {
        self.check_analyzer(analyzer);

        let field = self
            .schema
            .get_field(field)
            .map_err(|e| Error::query_parse(raw, e))?;

        let tokenizers = TokenizerManager::default();
        tokenizers.register(ANALYZER_NAME, build_analyzer(analyzer));

        let parser = QueryParser::new(self.schema.clone(), vec![field], tokenizers);
        parser.parse_query(raw).map_err(|e| Error::query_parse(raw, e))
    }

    fn search(
        &self,
        query: &Self::ParsedQuery,
        top_k: usize,
    ) -> Result<Vec<(Self::DocRef, f32)>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }
        let top_docs = self
            .searcher
            .search(query.as_ref(), &TopDocs::with_limit(top_k))
            .map_err(|e| Error::EngineSearch(e.to_string()))?;

        Ok(top_docs
            .into_iter()
            .map(|(score, address)| (address, score))
            .collect())
    }

    fn fetch_stored_fields(&self, doc: Self::DocRef) -> Result<StoredFields> {
        let stored: TantivyDocument = self.searcher.doc(doc).map_err(|e| {
            Error::EngineSearch(format!("cannot load stored fields of {:?}: {}", doc, e))
        })?;

        let raw_id = stored
            .get_first(self.fields.doc_id)
            .and_then(|v| v.as_u64())
            .ok_or_else(|| {
                Error::EngineSearch(format!("document {:?} has no stored {}", doc, FIELD_DOC_ID))
            })?;
        let external_doc_id = u32::try_from(raw_id).map_err(|_| {
            Error::EngineSearch(format!(
                "document {:?} has out-of-range {} {}",
                doc, FIELD_DOC_ID, raw_id
            ))
        })?;

        Ok(StoredFields {
            external_doc_id,
            path: text_field(&stored, self.fields.path),
            name: text_field(&stored, self.fields.name),
        })
    }

    fn lookup(&self, external_doc_id: u32) -> Result<Option<StoredFields>> {
        let term = Term::from_field_u64(self.fields.doc_id, u64::from(external_doc_id));
        let query = TermQuery::new(term, IndexRecordOption::Basic);
        let hits = self
            .searcher
            .search(&query, &TopDocs::with_limit(1))
            .map_err(|e| Error::EngineSearch(e.to_string()))?;
        match hits.first() {
            Some(&(_, address)) => self.fetch_stored_fields(address).map(Some),
            None => Ok(None),
        }
    }

    fn num_docs(&self) -> u64 {
        self.searcher.num_docs()
    }
}

fn text_field(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}
