//! # Network module
//!
//! Everything that talks to remote servers or persists what they returned:
//!
//! - `session` - HTTP session, page downloads, sitemap retrieval
//! - `cache` - title cache abstraction and its on-disk and in-memory stores

pub mod cache;
pub mod session;

// Re-export commonly used items for convenience
pub use cache::{Cache, MemoryCache, TitleCache};
pub use session::Session;
