//! RSS builder module
//!
//! Collects feed items in sitemap order and serializes them into a single
//! RSS 2.0 channel.

use chrono::Utc;
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use crate::core::FeedItem;
use crate::utils::date::format_rfc822;

const RSS_DOCS_URL: &str = "https://validator.w3.org/feed/docs/rss2.html";

pub struct FeedBuilder {
    title: String,
    site: String,
    items: Vec<Item>,
}

impl FeedBuilder {
    pub fn new(title: &str, site: &str) -> Self {
        Self {
            title: title.to_string(),
            site: site.to_string(),
            items: Vec::new(),
        }
    }

    /// Appends an item after the ones already added
    pub fn add_item(&mut self, item: &FeedItem) -> &mut Self {
        self.items.push(
            ItemBuilder::default()
                .title(item.title.clone())
                .link(item.link.clone())
                .guid(
                    GuidBuilder::default()
                        .permalink(true)
                        .value(item.link.clone())
                        .build(),
                )
                .pub_date(format_rfc822(&item.date))
                .build(),
        );
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Serializes the channel
    ///
    /// Links are emitted as given, relative or not.
    pub fn build(self) -> String {
        let channel = ChannelBuilder::default()
            .title(self.title.clone())
            .link(self.site)
            .description(self.title)
            .last_build_date(format_rfc822(&Utc::now()))
            .docs(RSS_DOCS_URL.to_string())
            .generator(env!("CARGO_PKG_NAME").to_string())
            .items(self.items)
            .build();

        channel.to_string()
    }
}
