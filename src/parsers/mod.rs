//! # Parsers module
//!
//! Readers for the two document types the pipeline consumes:
//!
//! - `html` - page DOM, charset detection, title extraction
//! - `sitemap` - sitemaps.org `<urlset>` and `<sitemapindex>` documents

pub mod html;
pub mod sitemap;

// Re-export commonly used items for convenience
pub use html::{get_charset, get_document_title, get_title, html_to_dom};
pub use sitemap::{parse_sitemap, SitemapDocument, SitemapError};
