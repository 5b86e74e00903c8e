use serde::{Deserialize, Serialize};

/// A bookmark reconstructed from a `<bookmark>` element of the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Authority component of `url`.
    pub domain: String,
    pub labels: Vec<String>,
}

/// One distinct label and the number of bookmarks carrying it.
///
/// `selected` is view state; the aggregator always emits `false` and the
/// view-model fills it in from `LabelSelection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSummary {
    pub label: String,
    pub frequency: usize,
    pub selected: bool,
}

impl LabelSummary {
    pub fn new(label: impl Into<String>, frequency: usize) -> Self {
        Self {
            label: label.into(),
            frequency,
            selected: false,
        }
    }
}

/// Extracts the authority component (everything between `://` and the next
/// `/`, `?` or `#`) from a URL.
///
/// Returns `None` when there is no `://` separator or the authority is empty.
pub fn extract_domain(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    if authority.is_empty() {
        None
    } else {
        Some(authority)
    }
}
