//! # Sitemap RSS
//!
//! Turns a website's XML sitemap into an RSS 2.0 feed, optionally scraping
//! each page's `<title>` and remembering the results in a persistent cache.
//!
//! ## Modules
//!
//! - `core` - pipeline, options and error type
//! - `env` - environment-driven settings
//! - `parsers` - sitemap XML and HTML title extraction
//! - `network` - HTTP session and title caches
//! - `utils` - date handling
//! - `builders` - RSS serialization

pub mod builders;
pub mod core;
pub mod env;
pub mod network;
pub mod parsers;
pub mod utils;

// Re-export commonly used items for convenience
pub use builders::*;
pub use core::*;
pub use network::*;
pub use parsers::*;
pub use utils::*;
