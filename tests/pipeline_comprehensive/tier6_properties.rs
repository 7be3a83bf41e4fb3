//! Tier 6: Property-Based
//!
//! Id derivation over arbitrary numbers and rank invariants over random
//! corpora.

use crate::test_utils::*;
use proptest::prelude::*;
use std::collections::HashSet;
use trecrun::{external_doc_id, AnalyzerConfig, CorpusConvention, Query};

const VOCAB: &[&str] = &["alpha", "beta", "gamma", "delta", "omega", "sigma"];

fn words() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(VOCAB), 1..6)
}

proptest! {
    #[test]
    fn padded_names_round_to_their_number(n in any::<u32>(), width in 0usize..12) {
        let name = format!("cacm-{:0width$}.html.txt", n, width = width);
        prop_assert_eq!(external_doc_id(&name, &CorpusConvention::default()).unwrap(), n);
    }

    #[test]
    fn non_numeric_ids_are_rejected(id in "[a-z]{1,8}") {
        let name = format!("cacm-{}.html.txt", id);
        prop_assert!(external_doc_id(&name, &CorpusConvention::default()).is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn ranks_dense_and_scores_non_increasing(
        docs in prop::collection::vec(words(), 1..8),
        query in words(),
        k in 1usize..6,
    ) {
        let files: Vec<(String, String)> = docs
            .iter()
            .enumerate()
            .map(|(i, w)| (format!("cacm-{}.html.txt", i + 1), w.join(" ")))
            .collect();
        let refs: Vec<(&str, &str)> =
            files.iter().map(|(n, c)| (n.as_str(), c.as_str())).collect();
        let ws = Workspace::with_corpus(&refs);
        let analyzer = AnalyzerConfig::simple();
        ws.build(&analyzer);

        let q = Query::new(1, query.join(" "));
        let hits = ws.retriever(&analyzer, k).retrieve(&q).unwrap();

        prop_assert!(hits.len() <= k);
        for (i, hit) in hits.iter().enumerate() {
            prop_assert_eq!(hit.rank(), i + 1);
            prop_assert!(hit.external_doc_id() >= 1);
            prop_assert!(hit.external_doc_id() as usize <= docs.len());
        }
        prop_assert!(hits.windows(2).all(|w| w[0].score() >= w[1].score()));

        let distinct: HashSet<u32> = hits.iter().map(|h| h.external_doc_id()).collect();
        prop_assert_eq!(distinct.len(), hits.len());

        let matching = docs
            .iter()
            .filter(|d| d.iter().any(|w| query.contains(w)))
            .count();
        prop_assert_eq!(hits.len(), matching.min(k));
    }
}
