//! Label Aggregator for Labelmarks.
//!
//! Counts label occurrences across a document and returns them in display
//! order.

use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::document::{BookmarkDocument, NodeQuery};
use crate::types::bookmark::LabelSummary;

/// Trait defining label aggregation.
pub trait LabelAggregatorTrait {
    fn summarize(&self, doc: &BookmarkDocument) -> Vec<LabelSummary>;
}

/// Stateless aggregator over `//label/text()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LabelAggregator;

impl LabelAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl LabelAggregatorTrait for LabelAggregator {
    /// Counts every label text node by exact, case-sensitive value and sorts
    /// the distinct labels with [`compare_labels`]. Every summary starts
    /// unselected. Label elements without text are not counted; a label
    /// whose text is split by a comment counts once per text node.
    fn summarize(&self, doc: &BookmarkDocument) -> Vec<LabelSummary> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for label in doc.query_nodes(&NodeQuery::all_label_text()) {
            for text in label.text_nodes() {
                *counts.entry(text.to_string()).or_insert(0) += 1;
            }
        }

        let mut summaries: Vec<LabelSummary> = counts
            .into_iter()
            .map(|(label, frequency)| LabelSummary::new(label, frequency))
            .collect();
        summaries.sort_by(|a, b| compare_labels(&a.label, &b.label));
        tracing::debug!(distinct = summaries.len(), "summarized labels");
        summaries
    }
}

/// Display ordering for labels.
///
/// Case- and accent-insensitive first (so `apple`, `Äpfel`, `Banana` sort
/// the way a reader expects), then case-insensitive, then by the raw string
/// so distinct labels never compare equal.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

fn primary_key(label: &str) -> String {
    label
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}
