//! Test utilities for pipeline comprehensive tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use trecrun::{
    AnalyzerConfig, CorpusConvention, CorpusIndexer, IndexSummary, Query, Retriever,
    TantivyEngine, TantivyIndexReader, TextIndexEngine,
};

/// The three-document fruit corpus
pub const FRUIT: &[(&str, &str)] = &[
    ("cacm-1.html.txt", "apple banana"),
    ("cacm-2.html.txt", "banana cherry"),
    ("cacm-3.html.txt", "cherry date"),
];

/// Scratch workspace holding a corpus and its index
pub struct Workspace {
    pub dir: TempDir,
    pub corpus: PathBuf,
    pub index: PathBuf,
}

impl Workspace {
    /// Create a workspace and write `files` into its corpus directory
    pub fn with_corpus(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let corpus = dir.path().join("corpus");
        std::fs::create_dir(&corpus).unwrap();
        for (name, content) in files {
            std::fs::write(corpus.join(name), content).unwrap();
        }
        let index = dir.path().join("index");
        Workspace { dir, corpus, index }
    }

    /// Path inside the workspace
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Build the index with `analyzer`
    pub fn build(&self, analyzer: &AnalyzerConfig) -> IndexSummary {
        CorpusIndexer::new(
            TantivyEngine::new(),
            analyzer.clone(),
            CorpusConvention::default(),
        )
        .index(&self.corpus, &self.index)
        .expect("Failed to build index")
    }

    /// Open a retriever over the built index
    pub fn retriever(&self, analyzer: &AnalyzerConfig, top_k: usize) -> Retriever<TantivyIndexReader> {
        open_retriever(&self.index, analyzer, top_k)
    }
}

/// Open a retriever with run tag `lucene`
pub fn open_retriever(
    index: &Path,
    analyzer: &AnalyzerConfig,
    top_k: usize,
) -> Retriever<TantivyIndexReader> {
    let reader = TantivyEngine::new()
        .open_index(index)
        .expect("Failed to open index");
    Retriever::new(reader, analyzer.clone(), top_k, "lucene").unwrap()
}

/// Document ids of the hits for `text`, in rank order
pub fn hit_ids(retriever: &Retriever<TantivyIndexReader>, text: &str) -> Vec<u32> {
    let query = Query::new(1, text);
    retriever
        .retrieve(&query)
        .unwrap()
        .iter()
        .map(|r| r.external_doc_id())
        .collect()
}
