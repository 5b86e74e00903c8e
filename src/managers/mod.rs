// Labelmarks state managers
// Managers hold state that outlives a single query: the cache store and the label selection.

pub mod cache_store;
pub mod label_selection;
