//! Labelmarks document store.
//!
//! Holds the parsed bookmark export and evaluates structural queries over it.
//!
//! # Usage
//!
//! ```
//! use labelmarks::document::{BookmarkDocument, NodeQuery};
//!
//! let doc = BookmarkDocument::build(
//!     "<xml_api_reply><bookmarks><bookmark><title>Rust</title>\
//!      <url>https://rust-lang.org</url><id>1</id>\
//!      <labels><label>lang</label></labels></bookmark></bookmarks></xml_api_reply>",
//! )
//! .expect("well-formed export");
//!
//! let query = NodeQuery::bookmarks_with_any_label(["lang"]).unwrap();
//! assert_eq!(doc.query_nodes(&query).len(), 1);
//! assert_eq!(query.to_string(), "//bookmark/labels[label='lang']/..");
//! ```

pub mod path;
pub mod store;

pub use path::{LabelLiteral, NodeQuery};
pub use store::{BookmarkDocument, Element, Node};
