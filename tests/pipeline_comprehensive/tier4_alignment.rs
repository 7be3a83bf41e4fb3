//! Tier 4: Alignment
//!
//! The result set has one list per query, in query order, whatever happens
//! to individual queries.

use crate::test_utils::*;
use trecrun::{ensure_aligned, AnalyzerConfig, Query};

/// Failing and empty queries keep their slots
#[test]
fn test_tier4_failures_keep_slots() {
    let ws = Workspace::with_corpus(FRUIT);
    let analyzer = AnalyzerConfig::simple();
    ws.build(&analyzer);

    let queries = vec![
        Query::new(10, "banana"),
        Query::new(11, "nosuchfield:apple"),
        Query::new(12, "kiwi"),
        Query::new(13, "date"),
    ];
    let results = ws.retriever(&analyzer, 5).retrieve_all(&queries);

    assert_eq!(results.len(), queries.len());
    assert_eq!(results[0].len(), 2);
    assert!(results[1].is_empty());
    assert!(results[2].is_empty());
    assert_eq!(results[3].len(), 1);
    ensure_aligned(&queries, &results, 5).unwrap();
}

/// Every hit points back at the query in its slot
#[test]
fn test_tier4_hits_reference_their_query() {
    let ws = Workspace::with_corpus(FRUIT);
    let analyzer = AnalyzerConfig::simple();
    ws.build(&analyzer);

    let queries: Vec<Query> = ["apple", "banana", "cherry", "date"]
        .iter()
        .enumerate()
        .map(|(i, t)| Query::new(i as i64 + 100, *t))
        .collect();
    let results = ws.retriever(&analyzer, 10).retrieve_all(&queries);

    for (query, hits) in queries.iter().zip(&results) {
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.query_id() == query.id()));
    }
}

/// Duplicate query ids stay separate entries
#[test]
fn test_tier4_duplicate_query_ids() {
    let ws = Workspace::with_corpus(FRUIT);
    let analyzer = AnalyzerConfig::simple();
    ws.build(&analyzer);

    let queries = vec![Query::new(1, "apple"), Query::new(1, "date")];
    let results = ws.retriever(&analyzer, 10).retrieve_all(&queries);
    assert_eq!(results[0][0].external_doc_id(), 1);
    assert_eq!(results[1][0].external_doc_id(), 3);
}

/// K of one keeps only the best hit
#[test]
fn test_tier4_top_k_one() {
    let ws = Workspace::with_corpus(FRUIT);
    let analyzer = AnalyzerConfig::simple();
    ws.build(&analyzer);

    let queries = vec![Query::new(1, "banana cherry")];
    let results = ws.retriever(&analyzer, 1).retrieve_all(&queries);
    assert_eq!(results[0].len(), 1);
    assert_eq!(results[0][0].rank(), 1);
    ensure_aligned(&queries, &results, 1).unwrap();
}
