//! Property-based tests for the bookmark query engine.
//!
//! `query({})` returns every bookmark in document order, and widening the
//! selection never loses a match (OR semantics).

use std::collections::BTreeSet;

use labelmarks::document::{BookmarkDocument, NodeQuery};
use labelmarks::services::bookmark_query::{BookmarkQuery, BookmarkQueryTrait};
use proptest::prelude::*;

const POOL: &[&str] = &["A", "B", "C", "a", "dev", "read later", "x] or [y", "a\tb", "\n  dev\n"];

fn arb_labels() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(POOL).prop_map(str::to_string), 0..4)
}

fn arb_selection() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(prop::sample::select(POOL).prop_map(str::to_string), 1..4)
}

fn export(bookmarks: &[Vec<String>]) -> String {
    let mut xml = String::from("<bookmarks>");
    for (i, labels) in bookmarks.iter().enumerate() {
        xml.push_str(&format!(
            "<bookmark><title>b{i}</title><url>https://host{i}.test/p</url><id>{i}</id><labels>"
        ));
        for label in labels {
            xml.push_str(&format!("<label>{}</label>", label));
        }
        xml.push_str("</labels></bookmark>");
    }
    xml.push_str("</bookmarks>");
    xml
}

fn ids(outcome: &labelmarks::services::bookmark_query::QueryOutcome) -> Vec<String> {
    outcome.bookmarks.iter().map(|b| b.id.clone()).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn empty_selection_returns_every_bookmark_in_order(
        bookmarks in prop::collection::vec(arb_labels(), 0..15),
    ) {
        let doc = BookmarkDocument::build(&export(&bookmarks)).unwrap();
        let outcome = BookmarkQuery::new().query(&doc, &BTreeSet::new()).unwrap();

        let expected: Vec<String> = (0..bookmarks.len()).map(|i| i.to_string()).collect();
        prop_assert_eq!(ids(&outcome), expected);
        prop_assert_eq!(
            outcome.bookmarks.len(),
            doc.query_nodes(&NodeQuery::all_bookmarks()).len()
        );
    }

    #[test]
    fn selection_is_a_union_of_single_label_results(
        bookmarks in prop::collection::vec(arb_labels(), 0..15),
        selection in arb_selection(),
    ) {
        let doc = BookmarkDocument::build(&export(&bookmarks)).unwrap();
        let engine = BookmarkQuery::new();
        let combined = ids(&engine.query(&doc, &selection).unwrap());

        for label in &selection {
            let single: BTreeSet<String> = [label.clone()].into_iter().collect();
            for id in ids(&engine.query(&doc, &single).unwrap()) {
                prop_assert!(combined.contains(&id), "{} matched {:?} but not {:?}", id, label, selection);
            }
        }

        let expected: Vec<String> = bookmarks
            .iter()
            .enumerate()
            .filter(|(_, labels)| labels.iter().any(|l| selection.contains(l)))
            .map(|(i, _)| i.to_string())
            .collect();
        prop_assert_eq!(combined, expected);
    }
}
