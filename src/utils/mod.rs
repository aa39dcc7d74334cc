//! # Utilities module
//!
//! - `date` - `<lastmod>` parsing and feed date formatting

pub mod date;

// Re-export commonly used items for convenience
pub use date::{
    default_publication_date, format_rfc822, parse_last_modified, publication_date,
};
