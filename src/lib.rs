//! trecrun - batch indexing and TREC run generation for IR test collections
//!
//! trecrun indexes a directory of corpus files (CACM layout by default),
//! runs a query file against the index and writes the ranked hits as a TREC
//! run file for downstream evaluation.
//!
//! # Quick Start
//!
//! ```ignore
//! use trecrun::{
//!     AnalyzerConfig, CorpusConvention, CorpusIndexer, QueryLoader, ResultWriter, Retriever,
//!     TantivyEngine, TextIndexEngine,
//! };
//!
//! let analyzer = AnalyzerConfig::simple();
//! CorpusIndexer::new(TantivyEngine::new(), analyzer.clone(), CorpusConvention::default())
//!     .index("cacm/".as_ref(), "cacm.index".as_ref())?;
//!
//! let queries = QueryLoader::load_simple("queries.txt".as_ref())?;
//! let reader = TantivyEngine::new().open_index("cacm.index".as_ref())?;
//! let results = Retriever::new(reader, analyzer, 100, "tantivy")?.retrieve_all(&queries);
//! ResultWriter::new("BASE")?.write("run.txt".as_ref(), &results)?;
//! ```
//!
//! # Architecture
//!
//! - `trecrun-core`: query and result models, errors, configuration
//! - `trecrun-engine`: the text index engine contract and its tantivy backend
//! - `trecrun-search`: query loading, indexing, retrieval, run files, evaluation,
//!   snippets

pub use trecrun_core::{
    load_stopwords, AnalyzerConfig, AnalyzerSection, CorpusConvention, Error, HarnessConfig,
    Query, QueryId, Result, ResultSet, ScoredResult, CONFIG_FILE_NAME, DEFAULT_RUN_TAG,
    DEFAULT_TOP_K, MAX_TOKEN_LEN,
};
pub use trecrun_engine::{
    analyze, build_analyzer, DocumentFields, IndexReaderHandle, IndexWriterHandle, StoredFields,
    TantivyEngine, TantivyIndexReader, TantivyIndexWriter, TermAnalyzer, TextIndexEngine,
    ANALYZER_FILE,
    ANALYZER_NAME, FIELD_CONTENT, FIELD_DOC_ID, FIELD_NAME, FIELD_PATH,
};
pub use trecrun_search::{
    ensure_aligned, evaluate, external_doc_id, render_snippet, reset_index, CorpusIndexer,
    EvaluationSummary, IndexSummary, QueryLoader, QueryMetrics, Qrels, RankPoint, ResultWriter,
    Retriever, RunRankings, Snippet, SnippetGenerator, DEFAULT_SNIPPET_WORDS, ID_SUFFIX,
};
