//! HTML parsing
//!
//! - `dom`: turning bytes into a DOM and walking it
//! - `metadata`: charset and title extraction

pub mod dom;
pub mod metadata;

pub use dom::{find_nodes, get_node_attr, get_node_text, html_to_dom};
pub use metadata::{get_charset, get_document_title, get_title};
