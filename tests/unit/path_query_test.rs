//! Unit tests for structural path expressions and label literals.

use labelmarks::document::{BookmarkDocument, LabelLiteral, NodeQuery};
use labelmarks::types::errors::QueryError;
use rstest::rstest;

#[test]
fn test_display_renders_canonical_expressions() {
    assert_eq!(NodeQuery::all_bookmarks().to_string(), "//bookmark");
    assert_eq!(NodeQuery::all_label_text().to_string(), "//label/text()");
    let query = NodeQuery::bookmarks_with_any_label(["A", "B c"]).unwrap();
    assert_eq!(
        query.to_string(),
        "//bookmark/labels[label='A' or label='B c']/.."
    );
}

#[test]
fn test_parse_round_trips_display() {
    let query = NodeQuery::bookmarks_with_any_label(["rust", "a] or x", "日本語"]).unwrap();
    assert_eq!(NodeQuery::parse(&query.to_string()).unwrap(), query);
}

#[test]
fn test_parse_alternate_predicate_spelling() {
    let parsed = NodeQuery::parse("//bookmark[labels/label='A' or labels/label=\"B\"]").unwrap();
    assert_eq!(parsed, NodeQuery::bookmarks_with_any_label(["A", "B"]).unwrap());
}

#[rstest]
#[case("//bookmark", NodeQuery::AllBookmarks)]
#[case("  //bookmark  ", NodeQuery::AllBookmarks)]
#[case("//label/text()", NodeQuery::AllLabels)]
#[case("//label", NodeQuery::AllLabels)]
fn test_parse_fixed_expressions(#[case] text: &str, #[case] expected: NodeQuery) {
    assert_eq!(NodeQuery::parse(text).unwrap(), expected);
}

#[rstest]
#[case("")]
#[case("//title")]
#[case("//bookmark/labels[]/..")]
#[case("//bookmark/labels[label='A']")]
#[case("//bookmark/labels[label='A' and label='B']/..")]
#[case("//bookmark/labels[label='A' or]/..")]
#[case("//bookmark/labels[label=A]/..")]
#[case("//bookmark/labels[label='A]/..")]
#[case("//bookmark/labels[title='A']/..")]
fn test_parse_rejects_unsupported_expressions(#[case] text: &str) {
    assert!(
        matches!(NodeQuery::parse(text), Err(QueryError::InvalidExpression(_))),
        "expected InvalidExpression for {:?}",
        text
    );
}

#[rstest]
#[case("it's")]
#[case("say \"hi\"")]
#[case("x' or label='y")]
#[case("\"")]
fn test_label_literal_fails_closed(#[case] label: &str) {
    assert_eq!(
        LabelLiteral::new(label),
        Err(QueryError::UnsupportedLabel(label.to_string()))
    );
    assert!(matches!(
        NodeQuery::bookmarks_with_any_label(["ok", label]),
        Err(QueryError::UnsupportedLabel(_))
    ));
}

#[rstest]
#[case("tab\there")]
#[case("line\nbreak")]
#[case("\r\n  indented\n")]
fn test_label_literal_accepts_whitespace(#[case] label: &str) {
    let literal = LabelLiteral::new(label).unwrap();
    assert_eq!(literal.as_str(), label);
    let query = NodeQuery::bookmarks_with_any_label([label]).unwrap();
    assert_eq!(NodeQuery::parse(&query.to_string()).unwrap(), query);
}

#[test]
fn test_empty_label_set_is_not_a_predicate() {
    let labels: [&str; 0] = [];
    assert!(matches!(
        NodeQuery::bookmarks_with_any_label(labels),
        Err(QueryError::InvalidExpression(_))
    ));
}

/// Metacharacters that are not quotes stay inside the literal and match
/// only a label with exactly that text.
#[test]
fn test_metacharacters_inside_literal_match_literally() {
    let doc = BookmarkDocument::build(
        "<bookmarks>\
         <bookmark><id>1</id><labels><label>a] or [b</label></labels></bookmark>\
         <bookmark><id>2</id><labels><label>a</label></labels></bookmark>\
         <bookmark><id>3</id><labels><label>b</label></labels></bookmark>\
         </bookmarks>",
    )
    .unwrap();
    let query = NodeQuery::bookmarks_with_any_label(["a] or [b"]).unwrap();
    let nodes = doc.query_path(&query.to_string()).unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].first_child("id").unwrap().text(), "1");
}
