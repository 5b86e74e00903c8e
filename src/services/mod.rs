// Labelmarks services
// Services provide the engines and collaborators: aggregation, querying, refresh policy, fetching, loading, settings.

pub mod bookmark_loader;
pub mod bookmark_query;
pub mod fetcher;
pub mod label_aggregator;
pub mod refresh_policy;
pub mod settings_engine;
