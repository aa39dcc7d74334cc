//! # Builders module
//!
//! - `rss_builder` - assembles and serializes the RSS 2.0 channel

pub mod rss_builder;

pub use rss_builder::FeedBuilder;
