//! Label selection state owned by the view.
//!
//! Keyed by label string and handed to the query engine as an explicit set;
//! the engine's own records never hold selection.

use std::collections::BTreeSet;

use crate::types::bookmark::LabelSummary;

/// Trait defining label selection operations.
pub trait LabelSelectionTrait {
    /// Flips `label` and returns whether it is now selected.
    fn toggle(&mut self, label: &str) -> bool;
    fn select(&mut self, label: &str);
    fn deselect(&mut self, label: &str);
    fn is_selected(&self, label: &str) -> bool;
    fn selected_labels(&self) -> &BTreeSet<String>;
    fn clear(&mut self);
    /// Drops selected labels that no longer appear in `summaries`.
    fn retain_known(&mut self, summaries: &[LabelSummary]);
    /// Copies the selection into the `selected` flag of each summary.
    fn apply_to(&self, summaries: &mut [LabelSummary]);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelection {
    selected: BTreeSet<String>,
}

impl LabelSelection {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelSelectionTrait for LabelSelection {
    fn toggle(&mut self, label: &str) -> bool {
        if self.selected.remove(label) {
            false
        } else {
            self.selected.insert(label.to_string());
            true
        }
    }

    fn select(&mut self, label: &str) {
        self.selected.insert(label.to_string());
    }

    fn deselect(&mut self, label: &str) {
        self.selected.remove(label);
    }

    fn is_selected(&self, label: &str) -> bool {
        self.selected.contains(label)
    }

    fn selected_labels(&self) -> &BTreeSet<String> {
        &self.selected
    }

    fn clear(&mut self) {
        self.selected.clear();
    }

    fn retain_known(&mut self, summaries: &[LabelSummary]) {
        self.selected
            .retain(|label| summaries.iter().any(|s| &s.label == label));
    }

    fn apply_to(&self, summaries: &mut [LabelSummary]) {
        for summary in summaries {
            summary.selected = self.selected.contains(&summary.label);
        }
    }
}
