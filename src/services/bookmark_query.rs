//! Bookmark Query Engine for Labelmarks.
//!
//! Selects bookmarks by label and reconstructs them as [`Bookmark`] records.
//!
//! Multiple selected labels widen the result: a bookmark matches when it
//! carries **any** of them. The engine is read-only over the document, so
//! re-running a query on every selection change is side-effect free.

use std::collections::BTreeSet;

use crate::document::{BookmarkDocument, Element, NodeQuery};
use crate::types::bookmark::{extract_domain, Bookmark};
use crate::types::errors::{BookmarkDefect, MalformedBookmarkError, NodeLocator, QueryError};

/// Result of a successful query.
///
/// Bookmarks that matched but could not be reconstructed are excluded from
/// `bookmarks` and reported in `malformed`, both in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    pub bookmarks: Vec<Bookmark>,
    pub malformed: Vec<MalformedBookmarkError>,
}

/// Trait defining bookmark queries.
pub trait BookmarkQueryTrait {
    fn query(
        &self,
        doc: &BookmarkDocument,
        selected_labels: &BTreeSet<String>,
    ) -> Result<QueryOutcome, QueryError>;
}

/// Stateless query engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct BookmarkQuery;

impl BookmarkQuery {
    pub fn new() -> Self {
        Self
    }

    /// Builds the structural query for a label selection.
    ///
    /// An empty selection selects every bookmark.
    ///
    /// # Errors
    /// [`QueryError::UnsupportedLabel`] if any selected label cannot be
    /// embedded in a path literal.
    pub fn node_query(selected_labels: &BTreeSet<String>) -> Result<NodeQuery, QueryError> {
        if selected_labels.is_empty() {
            Ok(NodeQuery::all_bookmarks())
        } else {
            NodeQuery::bookmarks_with_any_label(selected_labels)
        }
    }
}

impl BookmarkQueryTrait for BookmarkQuery {
    /// Returns matching bookmarks in document order.
    ///
    /// # Errors
    /// Fails the whole call with [`QueryError::UnsupportedLabel`] rather than
    /// risk evaluating a different expression than the one asked for.
    /// Per-record problems do not fail the call; see [`QueryOutcome`].
    fn query(
        &self,
        doc: &BookmarkDocument,
        selected_labels: &BTreeSet<String>,
    ) -> Result<QueryOutcome, QueryError> {
        let query = Self::node_query(selected_labels)?;
        tracing::debug!(expression = %query, "running bookmark query");

        let mut outcome = QueryOutcome::default();
        for (position, node) in doc.query_indexed(&query) {
            match reconstruct(node) {
                Ok(bookmark) => outcome.bookmarks.push(bookmark),
                Err(defect) => {
                    let err = MalformedBookmarkError {
                        locator: locate(node, position),
                        defect,
                    };
                    tracing::warn!(error = %err, "skipping malformed bookmark");
                    outcome.malformed.push(err);
                }
            }
        }
        Ok(outcome)
    }
}

fn reconstruct(node: &Element) -> Result<Bookmark, BookmarkDefect> {
    let id = non_empty_child(node, "id")?;
    let title = node
        .first_child("title")
        .ok_or(BookmarkDefect::MissingField("title"))?
        .text();
    let url = non_empty_child(node, "url")?;
    let domain = extract_domain(&url)
        .ok_or_else(|| BookmarkDefect::NoAuthority(url.clone()))?
        .to_string();
    let labels = node
        .child_elements()
        .filter(|el| el.local_name() == "labels")
        .flat_map(|block| block.child_elements())
        .filter(|el| el.local_name() == "label" && el.has_text())
        .map(|label| label.text())
        .collect();

    Ok(Bookmark {
        id,
        title,
        url,
        domain,
        labels,
    })
}

fn non_empty_child(node: &Element, name: &'static str) -> Result<String, BookmarkDefect> {
    node.first_child(name)
        .map(|el| el.text())
        .filter(|text| !text.is_empty())
        .ok_or(BookmarkDefect::MissingField(name))
}

/// Prefers the node's own id; otherwise `position`, its index among all
/// bookmarks.
fn locate(node: &Element, position: usize) -> NodeLocator {
    match non_empty_child(node, "id") {
        Ok(id) => NodeLocator::Id(id),
        Err(_) => NodeLocator::Position(position),
    }
}
