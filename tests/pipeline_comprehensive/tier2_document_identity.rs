//! Tier 2: Document Identity
//!
//! Document ids come from file names; files outside the convention never
//! reach the index.

use crate::test_utils::*;
use trecrun::{external_doc_id, AnalyzerConfig, CorpusConvention, Error};

/// Zero padding is dropped from ids
#[test]
fn test_tier2_padded_ids() {
    let cacm = CorpusConvention::default();
    assert_eq!(external_doc_id("cacm-0042.html.txt", &cacm).unwrap(), 42);
    assert_eq!(external_doc_id("cacm-7.html.txt", &cacm).unwrap(), 7);
}

/// Malformed names are rejected with the offending name
#[test]
fn test_tier2_malformed_names() {
    let err = external_doc_id("cacm-x12.html.txt", &CorpusConvention::default()).unwrap_err();
    match err {
        Error::MalformedFilename { name, .. } => assert_eq!(name, "cacm-x12.html.txt"),
        other => panic!("unexpected error {:?}", other),
    }
}

/// Non-conforming files are excluded from the indexed count
#[test]
fn test_tier2_non_conforming_files_skipped() {
    let ws = Workspace::with_corpus(&[
        ("cacm-1.html.txt", "kept one"),
        ("cacm-two.html.txt", "bad id"),
        ("notes.txt", "wrong prefix"),
        ("cacm-3.html.pdf", "wrong extension"),
        ("cacm-4.html.txt", "kept four"),
    ]);
    let analyzer = AnalyzerConfig::simple();
    let summary = ws.build(&analyzer);
    assert_eq!(summary.indexed, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped, 2);

    let mut ids = hit_ids(&ws.retriever(&analyzer, 10), "kept bad wrong");
    ids.sort();
    assert_eq!(ids, vec![1, 4]);
}

/// Prefix and extension match without regard to case
#[test]
fn test_tier2_case_insensitive_names() {
    let ws = Workspace::with_corpus(&[("CACM-0010.HTML.TXT", "uppercase name")]);
    let analyzer = AnalyzerConfig::simple();
    assert_eq!(ws.build(&analyzer).indexed, 1);
    assert_eq!(hit_ids(&ws.retriever(&analyzer, 10), "uppercase"), vec![10]);
}

/// Undecodable bytes do not stop a document from being indexed
#[test]
fn test_tier2_non_utf8_content_indexed() {
    let ws = Workspace::with_corpus(&[]);
    std::fs::write(
        ws.corpus.join("cacm-5.html.txt"),
        b"latin \xe9t\xe9 survives".as_slice(),
    )
    .unwrap();
    let analyzer = AnalyzerConfig::simple();
    assert_eq!(ws.build(&analyzer).indexed, 1);
    assert_eq!(hit_ids(&ws.retriever(&analyzer, 10), "survives"), vec![5]);
}

/// Two names that decode to the same id index only the first; a run never
/// repeats a document for one query
#[test]
fn test_tier2_duplicate_ids_indexed_once() {
    let ws = Workspace::with_corpus(&[
        ("cacm-1.html.txt", "banana"),
        ("cacm-01.html.txt", "banana"),
        ("cacm-2.html.txt", "banana split"),
    ]);
    let analyzer = AnalyzerConfig::simple();
    let summary = ws.build(&analyzer);
    assert_eq!(summary.indexed, 2);
    assert_eq!(summary.failed, 1);

    let mut ids = hit_ids(&ws.retriever(&analyzer, 10), "banana");
    ids.sort();
    assert_eq!(ids, vec![1, 2]);
}
