//! Tier 1: End-to-End
//!
//! Corpus directory in, run file out.

use crate::test_utils::*;
use trecrun::{AnalyzerConfig, QueryLoader, ResultWriter};

/// Banana query over the fruit corpus hits exactly docs 1 and 2
#[test]
fn test_tier1_fruit_corpus_banana() {
    let ws = Workspace::with_corpus(FRUIT);
    let analyzer = AnalyzerConfig::simple();
    assert_eq!(ws.build(&analyzer).indexed, 3);

    let queries = QueryLoader::parse_simple("1 banana\n").unwrap();
    let results = ws.retriever(&analyzer, 10).retrieve_all(&queries);

    let hits = &results[0];
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].external_doc_id(), 1);
    assert_eq!(hits[1].external_doc_id(), 2);
    assert_eq!(hits[0].rank(), 1);
    assert_eq!(hits[1].rank(), 2);
    assert!(hits[0].score() >= hits[1].score());
}

/// Run file written from a query file reads back line for line
#[test]
fn test_tier1_query_file_to_run_file() {
    let ws = Workspace::with_corpus(FRUIT);
    let analyzer = AnalyzerConfig::simple();
    ws.build(&analyzer);

    let query_file = ws.path("queries.txt");
    std::fs::write(&query_file, "1 apple\n2 date\n3 zucchini\n").unwrap();
    let queries = QueryLoader::load_simple(&query_file).unwrap();
    let results = ws.retriever(&analyzer, 100).retrieve_all(&queries);

    let run = ws.path("run.txt");
    let lines = ResultWriter::new("BASE").unwrap().write(&run, &results).unwrap();
    assert_eq!(lines, 2);

    let content = std::fs::read_to_string(&run).unwrap();
    let rows: Vec<Vec<&str>> = content.lines().map(|l| l.split(' ').collect()).collect();
    assert_eq!(rows[0][0], "1");
    assert_eq!(rows[0][2], "1");
    assert_eq!(rows[1][0], "2");
    assert_eq!(rows[1][2], "3");
    assert!(rows.iter().all(|r| r[1] == "Q0" && r[3] == "1" && r[5] == "lucene_BASE"));
}

/// Unique terms find their own document
#[test]
fn test_tier1_unique_terms() {
    let ws = Workspace::with_corpus(&[
        ("cacm-0042.html.txt", "compiler optimization"),
        ("cacm-0007.html.txt", "parallel sorting networks"),
        ("cacm-3204.html.txt", "hash table collisions"),
    ]);
    let analyzer = AnalyzerConfig::simple();
    ws.build(&analyzer);
    let retriever = ws.retriever(&analyzer, 10);

    assert_eq!(hit_ids(&retriever, "compiler"), vec![42]);
    assert_eq!(hit_ids(&retriever, "sorting"), vec![7]);
    assert_eq!(hit_ids(&retriever, "collisions"), vec![3204]);
}

/// An empty corpus still yields a valid, empty index
#[test]
fn test_tier1_empty_corpus() {
    let ws = Workspace::with_corpus(&[]);
    let analyzer = AnalyzerConfig::simple();
    assert_eq!(ws.build(&analyzer).indexed, 0);
    assert!(hit_ids(&ws.retriever(&analyzer, 10), "anything").is_empty());
}
