//! Tier 3: Query Files
//!
//! Simple `<id> <text>` files and legacy CACM `<DOC>` files.

use crate::test_utils::*;
use trecrun::{AnalyzerConfig, Error, Query, QueryLoader};

const CACM_QUERIES: &str = "<DOC>
<DOCNO> 1 </DOCNO>
What articles exist which deal with TSS (Time Sharing System), an
operating system for IBM computers?
</DOC>
<DOC>
<DOCNO> 2 </DOCNO>
I am interested in articles written either by Prieve or Udo Pooch
</DOC>
";

/// N lines give N queries in file order
#[test]
fn test_tier3_simple_order() {
    let ws = Workspace::with_corpus(&[]);
    let file = ws.path("queries.txt");
    std::fs::write(&file, "3 information retrieval\n1 sorting\n2 hashing\n").unwrap();

    let queries = QueryLoader::load_simple(&file).unwrap();
    assert_eq!(
        queries,
        vec![
            Query::new(3, "information retrieval"),
            Query::new(1, "sorting"),
            Query::new(2, "hashing"),
        ]
    );
}

/// One bad line rejects the whole simple file
#[test]
fn test_tier3_simple_bad_line_aborts() {
    let ws = Workspace::with_corpus(&[]);
    let file = ws.path("queries.txt");
    std::fs::write(&file, "1 fine\nQ2 not fine\n3 fine\n").unwrap();

    let err = QueryLoader::load_simple(&file).unwrap_err();
    assert!(matches!(err, Error::MalformedQueryFile(_)));
    assert_eq!(err.exit_code(), 2);
}

/// Legacy records join the text around DOCNO
#[test]
fn test_tier3_legacy_records() {
    let ws = Workspace::with_corpus(&[]);
    let file = ws.path("cacm.query.txt");
    std::fs::write(&file, CACM_QUERIES).unwrap();

    let queries = QueryLoader::load_legacy_xml(&file).unwrap();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].id(), 1);
    assert!(queries[0].text().contains("Time Sharing System"));
    assert!(queries[0].text().ends_with("IBM computers?"));
    assert_eq!(queries[1].id(), 2);
    assert_eq!(
        queries[1].text(),
        " I am interested in articles written either by Prieve or Udo Pooch"
    );
}

/// Legacy queries run against an index like simple ones
#[test]
fn test_tier3_legacy_queries_retrieve() {
    let ws = Workspace::with_corpus(&[
        ("cacm-1.html.txt", "time sharing system for ibm computers"),
        ("cacm-2.html.txt", "udo pooch simulation"),
    ]);
    let analyzer = AnalyzerConfig::simple();
    ws.build(&analyzer);

    let queries = QueryLoader::parse_legacy_xml(
        "<DOC>\n<DOCNO> 1 </DOCNO>\ntime sharing system\n</DOC>\n\
         <DOC>\n<DOCNO> 2 </DOCNO>\nUdo Pooch\n</DOC>\n",
    )
    .unwrap();
    let results = ws.retriever(&analyzer, 10).retrieve_all(&queries);
    assert_eq!(results[0][0].external_doc_id(), 1);
    assert_eq!(results[1][0].external_doc_id(), 2);
}
