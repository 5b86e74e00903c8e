//! App Core for Labelmarks.
//!
//! The view-model the UI binds to: the current document, its label summary,
//! the UI-owned label selection and the bookmarks currently on display.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use crate::document::{BookmarkDocument, NodeQuery};
use crate::managers::label_selection::{LabelSelection, LabelSelectionTrait};
use crate::services::bookmark_query::{BookmarkQuery, BookmarkQueryTrait, QueryOutcome};
use crate::services::label_aggregator::{LabelAggregator, LabelAggregatorTrait};
use crate::services::settings_engine::SettingsEngine;
use crate::types::bookmark::{Bookmark, LabelSummary};
use crate::types::errors::{MalformedBookmarkError, QueryError};

/// Counts describing the installed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub bookmarks: usize,
    pub distinct_labels: usize,
    pub selected_labels: usize,
    pub visible: usize,
}

/// Central application state.
pub struct App {
    pub settings_engine: SettingsEngine,
    document: Option<Arc<BookmarkDocument>>,
    labels: Vec<LabelSummary>,
    selection: LabelSelection,
    visible: Vec<Bookmark>,
    malformed: Vec<MalformedBookmarkError>,
    aggregator: LabelAggregator,
    engine: BookmarkQuery,
}

impl App {
    pub fn new(settings_engine: SettingsEngine) -> Self {
        Self {
            settings_engine,
            document: None,
            labels: Vec::new(),
            selection: LabelSelection::new(),
            visible: Vec::new(),
            malformed: Vec::new(),
            aggregator: LabelAggregator::new(),
            engine: BookmarkQuery::new(),
        }
    }

    /// Replaces the current document wholesale.
    ///
    /// Labels are recomputed, selected labels that disappeared are dropped,
    /// and the visible list is re-queried against the new document.
    pub fn install_document(&mut self, document: BookmarkDocument) {
        let document = Arc::new(document);
        self.labels = self.aggregator.summarize(&document);
        self.selection.retain_known(&self.labels);
        self.document = Some(document);
        tracing::info!(labels = self.labels.len(), "installed bookmark document");

        // Every surviving label was already accepted by the query builder.
        if let Err(err) = self.requery() {
            tracing::warn!(error = %err, "selection no longer queryable; clearing it");
            self.selection.clear();
            self.visible.clear();
            self.malformed.clear();
        }
    }

    pub fn document(&self) -> Option<&Arc<BookmarkDocument>> {
        self.document.as_ref()
    }

    /// Label summaries with `selected` reflecting the current selection.
    pub fn labels(&self) -> Vec<LabelSummary> {
        let mut labels = self.labels.clone();
        self.selection.apply_to(&mut labels);
        labels
    }

    pub fn selection(&self) -> &LabelSelection {
        &self.selection
    }

    /// Flips `label` and refreshes the visible list.
    ///
    /// With nothing selected the visible list is empty; the view shows
    /// bookmarks only once a label is picked.
    ///
    /// # Errors
    /// [`QueryError::UnsupportedLabel`] if the label cannot be queried; the
    /// toggle is undone in that case.
    pub fn toggle_label(&mut self, label: &str) -> Result<&[Bookmark], QueryError> {
        self.selection.toggle(label);
        if let Err(err) = self.requery() {
            self.selection.toggle(label);
            return Err(err);
        }
        Ok(&self.visible)
    }

    pub fn visible_bookmarks(&self) -> &[Bookmark] {
        &self.visible
    }

    /// Malformed records skipped by the last visible-list query.
    pub fn malformed(&self) -> &[MalformedBookmarkError] {
        &self.malformed
    }

    /// Runs an ad-hoc query without touching the selection. Empty without a
    /// document.
    pub fn query(&self, labels: &BTreeSet<String>) -> Result<QueryOutcome, QueryError> {
        match &self.document {
            Some(document) => self.engine.query(document, labels),
            None => {
                BookmarkQuery::node_query(labels)?;
                Ok(QueryOutcome::default())
            }
        }
    }

    pub fn stats(&self) -> DocumentStats {
        let bookmarks = self
            .document
            .as_ref()
            .map(|doc| doc.query_nodes(&NodeQuery::all_bookmarks()).len())
            .unwrap_or(0);
        DocumentStats {
            bookmarks,
            distinct_labels: self.labels.len(),
            selected_labels: self.selection.selected_labels().len(),
            visible: self.visible.len(),
        }
    }

    fn requery(&mut self) -> Result<(), QueryError> {
        let selected = self.selection.selected_labels();
        if selected.is_empty() {
            self.visible.clear();
            self.malformed.clear();
            return Ok(());
        }
        let outcome = self.query(selected)?;
        self.visible = outcome.bookmarks;
        self.malformed = outcome.malformed;
        Ok(())
    }
}
