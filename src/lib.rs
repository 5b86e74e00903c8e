//! Labelmarks: a label-indexed view over a bookmark XML export.
//!
//! The export is cached locally and turned into two queryable views: a
//! frequency-ranked label summary and the bookmarks matching a label
//! selection. This library crate exposes all modules for use by the binary
//! and integration tests.

pub mod app;
pub mod database;
pub mod document;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
