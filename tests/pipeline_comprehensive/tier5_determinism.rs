//! Tier 5: Determinism
//!
//! Same index, queries and K give byte-identical runs; equal scores fall
//! back to indexing order.

use crate::test_utils::*;
use std::path::Path;
use trecrun::{AnalyzerConfig, Query, ResultWriter};

fn run_text(index: &Path, queries: &[Query]) -> String {
    let retriever = open_retriever(index, &AnalyzerConfig::simple(), 100);
    let results = retriever.retrieve_all(queries);
    let mut out = Vec::new();
    ResultWriter::new("DET")
        .unwrap()
        .write_to(&mut out, &results)
        .unwrap();
    String::from_utf8(out).unwrap()
}

/// Repeating a batch reproduces the run exactly
#[test]
fn test_tier5_repeat_batch() {
    let ws = Workspace::with_corpus(FRUIT);
    ws.build(&AnalyzerConfig::simple());
    let queries = vec![
        Query::new(1, "banana"),
        Query::new(2, "cherry apple"),
        Query::new(3, "date banana cherry"),
    ];
    let first = run_text(&ws.index, &queries);
    assert_eq!(first, run_text(&ws.index, &queries));
}

/// Equal-scoring documents come back in file-name order
#[test]
fn test_tier5_ties_in_file_name_order() {
    let ws = Workspace::with_corpus(&[
        ("cacm-30.html.txt", "shared term"),
        ("cacm-10.html.txt", "shared term"),
        ("cacm-20.html.txt", "shared term"),
    ]);
    let analyzer = AnalyzerConfig::simple();
    ws.build(&analyzer);
    assert_eq!(
        hit_ids(&ws.retriever(&analyzer, 10), "shared"),
        vec![10, 20, 30]
    );
}

/// Truncation at K keeps the earliest tied documents
#[test]
fn test_tier5_truncation_is_stable() {
    let files: Vec<(String, String)> = (1..=12)
        .map(|i| (format!("cacm-{:02}.html.txt", i), "same words".to_string()))
        .collect();
    let refs: Vec<(&str, &str)> = files.iter().map(|(n, c)| (n.as_str(), c.as_str())).collect();
    let ws = Workspace::with_corpus(&refs);
    let analyzer = AnalyzerConfig::simple();
    ws.build(&analyzer);

    assert_eq!(hit_ids(&ws.retriever(&analyzer, 4), "same"), vec![1, 2, 3, 4]);
}

/// Rebuilding from the same corpus gives the same run
#[test]
fn test_tier5_rebuild_identical() {
    let ws = Workspace::with_corpus(FRUIT);
    ws.build(&AnalyzerConfig::simple());
    let queries = vec![Query::new(1, "banana"), Query::new(2, "date")];
    let first = run_text(&ws.index, &queries);

    trecrun::reset_index(&ws.index).unwrap();
    ws.build(&AnalyzerConfig::simple());
    assert_eq!(first, run_text(&ws.index, &queries));
}
