//! Engine doubles and corpus helpers for unit tests

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use trecrun_core::{AnalyzerConfig, Error, Result};
use trecrun_engine::{
    analyze, DocumentFields, IndexReaderHandle, IndexWriterHandle, StoredFields, TextIndexEngine,
};

/// Write `files` into `<dir>/corpus` and return the corpus path.
pub(crate) fn write_corpus(dir: &Path, files: &[(&str, &str)]) -> PathBuf {
    let corpus = dir.join("corpus");
    std::fs::create_dir_all(&corpus).unwrap();
    for (name, content) in files {
        std::fs::write(corpus.join(name), content).unwrap();
    }
    corpus
}

pub(crate) fn doc(id: u32, content: &str) -> DocumentFields {
    let name = format!("cacm-{}.html.txt", id);
    DocumentFields {
        external_doc_id: id,
        path: format!("corpus/{}", name),
        name,
        content: content.to_string(),
    }
}

// ============================================================================
// Writer double
// ============================================================================

#[derive(Default)]
struct EngineState {
    reject: BTreeSet<u32>,
    accepted: Vec<u32>,
    closed: bool,
}

/// Engine whose writer rejects chosen document ids and records the rest
#[derive(Clone, Default)]
pub(crate) struct FailingEngine {
    state: Rc<RefCell<EngineState>>,
}

impl FailingEngine {
    pub(crate) fn rejecting(ids: impl IntoIterator<Item = u32>) -> Self {
        let engine = FailingEngine::default();
        engine.state.borrow_mut().reject = ids.into_iter().collect();
        engine
    }

    pub(crate) fn accepted_ids(&self) -> Vec<u32> {
        self.state.borrow().accepted.clone()
    }

    pub(crate) fn closed(&self) -> bool {
        self.state.borrow().closed
    }
}

pub(crate) struct RecordingWriter {
    state: Rc<RefCell<EngineState>>,
}

impl TextIndexEngine for FailingEngine {
    type Writer = RecordingWriter;
    type Reader = FakeReader;

    fn build_index(&self, _destination: &Path, _analyzer: &AnalyzerConfig) -> Result<Self::Writer> {
        Ok(RecordingWriter {
            state: Rc::clone(&self.state),
        })
    }

    fn open_index(&self, path: &Path) -> Result<Self::Reader> {
        Err(Error::engine_open(path, "writer double has no reader"))
    }
}

impl IndexWriterHandle for RecordingWriter {
    fn add_document(&mut self, doc: &DocumentFields) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.reject.contains(&doc.external_doc_id) {
            return Err(Error::EngineWrite(format!("rejected {}", doc.name)));
        }
        state.accepted.push(doc.external_doc_id);
        Ok(())
    }

    fn num_docs(&self) -> u64 {
        self.state.borrow().accepted.len() as u64
    }

    fn close(self) -> Result<u64> {
        let mut state = self.state.borrow_mut();
        state.closed = true;
        Ok(state.accepted.len() as u64)
    }
}

// ============================================================================
// Reader double
// ============================================================================

/// In-memory reader scoring by raw term frequency.
///
/// Queries starting with `!` fail to parse; a query containing the failing
/// term fails to search. Hits come back in reverse rank order.
pub(crate) struct FakeReader {
    docs: Vec<DocumentFields>,
    unreadable: BTreeSet<u32>,
    failing_term: Option<String>,
}

impl FakeReader {
    pub(crate) fn new(docs: Vec<DocumentFields>) -> Self {
        FakeReader {
            docs,
            unreadable: BTreeSet::new(),
            failing_term: None,
        }
    }

    pub(crate) fn with_unreadable(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.unreadable = ids.into_iter().collect();
        self
    }

    pub(crate) fn with_failing_term(mut self, term: &str) -> Self {
        self.failing_term = Some(term.to_string());
        self
    }
}

impl IndexReaderHandle for FakeReader {
    type ParsedQuery = (Vec<String>, AnalyzerConfig);
    type DocRef = usize;

    fn parse_query(
        &self,
        raw: &str,
        _field: &str,
        analyzer: &AnalyzerConfig,
    ) -> Result<Self::ParsedQuery> {
        if raw.starts_with('!') {
            return Err(Error::query_parse(raw, "leading '!'"));
        }
        Ok((analyze(analyzer, raw), analyzer.clone()))
    }

    fn search(&self, query: &Self::ParsedQuery, top_k: usize) -> Result<Vec<(usize, f32)>> {
        let (terms, analyzer) = query;
        if let Some(term) = &self.failing_term {
            if terms.contains(term) {
                return Err(Error::EngineSearch(format!("term {} exploded", term)));
            }
        }

        let mut hits: Vec<(usize, f32)> = self
            .docs
            .iter()
            .enumerate()
            .filter_map(|(i, doc)| {
                let tokens = analyze(analyzer, &doc.content);
                let tf = tokens.iter().filter(|t| terms.contains(t)).count();
                (tf > 0).then_some((i, tf as f32))
            })
            .collect();
        hits.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        hits.truncate(top_k);
        hits.reverse();
        Ok(hits)
    }

    fn fetch_stored_fields(&self, doc: usize) -> Result<StoredFields> {
        let fields = self
            .docs
            .get(doc)
            .ok_or_else(|| Error::EngineSearch(format!("no document {}", doc)))?;
        if self.unreadable.contains(&fields.external_doc_id) {
            return Err(Error::EngineSearch(format!(
                "stored fields of {} are corrupt",
                fields.external_doc_id
            )));
        }
        Ok(StoredFields {
            external_doc_id: fields.external_doc_id,
            path: fields.path.clone(),
            name: fields.name.clone(),
        })
    }

    fn lookup(&self, external_doc_id: u32) -> Result<Option<StoredFields>> {
        match self
            .docs
            .iter()
            .position(|d| d.external_doc_id == external_doc_id)
        {
            Some(i) => self.fetch_stored_fields(i).map(Some),
            None => Ok(None),
        }
    }

    fn num_docs(&self) -> u64 {
        self.docs.len() as u64
    }
}
