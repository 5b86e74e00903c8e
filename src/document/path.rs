//! Structural path expressions over a bookmark document.
//!
//! Queries are values, not strings: label values live in [`LabelLiteral`]s
//! and are only rendered into text by [`NodeQuery`]'s `Display`, so a label
//! can never change the shape of the expression it appears in. The textual
//! form exists for logging and for callers that hold expressions as strings;
//! [`NodeQuery::parse`] accepts exactly what `Display` produces plus the
//! `//bookmark[labels/label=...]` spelling.

use std::fmt;

use crate::types::errors::QueryError;

/// A label value that is safe to embed in a quoted path literal.
///
/// The expression language has no escape sequence inside literals, so any
/// value containing a quote character is rejected instead of being spliced
/// in. Whitespace of any kind, tabs and newlines included, is ordinary
/// literal content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelLiteral(String);

impl LabelLiteral {
    /// # Errors
    /// Returns [`QueryError::UnsupportedLabel`] if `value` contains `'` or
    /// `"`.
    pub fn new(value: &str) -> Result<Self, QueryError> {
        if value.contains(['\'', '"']) {
            return Err(QueryError::UnsupportedLabel(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

/// The structural queries the engine evaluates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeQuery {
    /// `//bookmark`
    AllBookmarks,
    /// `//label/text()`
    AllLabels,
    /// `//bookmark/labels[label='a' or label='b']/..`
    BookmarksWithAnyLabel(Vec<LabelLiteral>),
}

impl NodeQuery {
    pub fn all_bookmarks() -> Self {
        NodeQuery::AllBookmarks
    }

    pub fn all_label_text() -> Self {
        NodeQuery::AllLabels
    }

    /// Bookmarks carrying at least one of `labels`.
    ///
    /// # Errors
    /// [`QueryError::UnsupportedLabel`] for the first label that cannot be
    /// embedded, [`QueryError::InvalidExpression`] if `labels` is empty.
    pub fn bookmarks_with_any_label<I, S>(labels: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let literals = labels
            .into_iter()
            .map(|label| LabelLiteral::new(label.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if literals.is_empty() {
            return Err(QueryError::InvalidExpression(
                "label predicate needs at least one label".to_string(),
            ));
        }
        Ok(NodeQuery::BookmarksWithAnyLabel(literals))
    }

    /// Parses a textual path expression.
    ///
    /// # Errors
    /// [`QueryError::InvalidExpression`] for anything outside the grammar,
    /// [`QueryError::UnsupportedLabel`] for an unembeddable literal.
    pub fn parse(expression: &str) -> Result<Self, QueryError> {
        let expr = expression.trim();
        match expr {
            "//bookmark" => return Ok(NodeQuery::AllBookmarks),
            "//label/text()" | "//label" => return Ok(NodeQuery::AllLabels),
            _ => {}
        }

        if let Some(predicate) = expr
            .strip_prefix("//bookmark/labels[")
            .and_then(|rest| rest.strip_suffix("]/.."))
        {
            return parse_label_predicate(predicate, "label").map(NodeQuery::BookmarksWithAnyLabel);
        }
        if let Some(predicate) = expr
            .strip_prefix("//bookmark[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return parse_label_predicate(predicate, "labels/label").map(NodeQuery::BookmarksWithAnyLabel);
        }
        Err(QueryError::InvalidExpression(expression.to_string()))
    }
}

impl fmt::Display for NodeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeQuery::AllBookmarks => write!(f, "//bookmark"),
            NodeQuery::AllLabels => write!(f, "//label/text()"),
            NodeQuery::BookmarksWithAnyLabel(literals) => {
                write!(f, "//bookmark/labels[")?;
                for (i, literal) in literals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " or ")?;
                    }
                    write!(f, "label={}", literal)?;
                }
                write!(f, "]/..")
            }
        }
    }
}

/// Parses `lhs='a' or lhs="b" ...`.
fn parse_label_predicate(predicate: &str, lhs: &str) -> Result<Vec<LabelLiteral>, QueryError> {
    let invalid = || QueryError::InvalidExpression(format!("bad label predicate: [{}]", predicate));
    let mut rest = predicate.trim_start();
    let mut literals = Vec::new();

    loop {
        rest = rest.strip_prefix(lhs).ok_or_else(invalid)?.trim_start();
        rest = rest.strip_prefix('=').ok_or_else(invalid)?.trim_start();

        let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"').ok_or_else(invalid)?;
        let body = &rest[1..];
        let end = body.find(quote).ok_or_else(invalid)?;
        literals.push(LabelLiteral::new(&body[..end])?);
        rest = body[end + 1..].trim_start();

        if rest.is_empty() {
            return Ok(literals);
        }
        let after_or = rest.strip_prefix("or").ok_or_else(invalid)?;
        if !after_or.starts_with(char::is_whitespace) {
            return Err(invalid());
        }
        rest = after_or.trim_start();
    }
}
