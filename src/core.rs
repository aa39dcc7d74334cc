use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::builders::FeedBuilder;
use crate::env::fetch;
use crate::network::cache::TitleCache;
use crate::network::session::Session;
use crate::parsers::html::get_document_title;
use crate::parsers::sitemap::SitemapError;
use crate::utils::date::publication_date;

pub const DEFAULT_SITEMAP_URL: &str = "https://sitemaps.org/sitemap.xml";
pub const DEFAULT_FEED_TITLE: &str = "Sitemaps";
pub const DEFAULT_SITE_URL: &str = "https://sitemaps.org/";

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";

/// Represents errors that can occur while turning a sitemap into a feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Malformed sitemap {url}: {source}")]
    Sitemap {
        url: String,
        #[source]
        source: SitemapError,
    },

    #[error("Sitemap index nesting at {url} exceeds {max_depth} levels")]
    SitemapTooDeep { url: String, max_depth: usize },

    #[error("Title cache error: {0}")]
    Cache(#[from] redb::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Configuration options for a single pipeline run
#[derive(Clone, Debug)]
pub struct FeedOptions {
    pub sitemap_url: String,
    pub title: String,
    pub site: String,
    pub output: Option<PathBuf>,
    pub scrape_titles: bool,
    pub cache_file: Option<PathBuf>,
    pub timeout: Duration,
    pub concurrency: usize,
    pub user_agent: String,
}

impl Default for FeedOptions {
    fn default() -> Self {
        FeedOptions {
            sitemap_url: DEFAULT_SITEMAP_URL.to_string(),
            title: DEFAULT_FEED_TITLE.to_string(),
            site: DEFAULT_SITE_URL.to_string(),
            output: None,
            scrape_titles: false,
            cache_file: None,
            timeout: Duration::from_secs(15),
            concurrency: 10,
            user_agent: fetch::default_user_agent(),
        }
    }
}

/// One `<url>` entry of a sitemap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRecord {
    pub location: String,
    pub last_modified: Option<String>,
}

/// One entry of the generated feed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub date: DateTime<Utc>,
}

/// Fetches a page and extracts the text of its `<title>` element
///
/// Failures are logged and reported as `None`; an empty title is a value.
pub async fn resolve_title(session: &Session, url: &str) -> Option<String> {
    let (data, charset) = match session.retrieve_document(url).await {
        Ok(document) => document,
        Err(e) => {
            error!(url, error = %e, "failed to retrieve page");
            return None;
        }
    };

    match get_document_title(&data, charset.as_deref()) {
        Some(title) => Some(title),
        None => {
            error!(url, "page has no <title> element");
            None
        }
    }
}

/// Resolves a title through the cache, populating it on a miss
///
/// A hit is returned verbatim without touching the network. Failed
/// resolutions are not stored, so the next run retries them.
pub async fn resolve_title_cached(
    session: &Session,
    url: &str,
    cache: Option<&mut dyn TitleCache>,
) -> Option<String> {
    let Some(cache) = cache else {
        return resolve_title(session, url).await;
    };

    match cache.get(url) {
        Ok(Some(title)) => {
            debug!(url, "title cache hit");
            return Some(title);
        }
        Ok(None) => debug!(url, "title cache miss"),
        Err(e) => warn!(url, error = %e, "title cache lookup failed"),
    }

    let title = resolve_title(session, url).await?;
    if let Err(e) = cache.set(url, &title) {
        warn!(url, error = %e, "failed to store title in cache");
    }
    Some(title)
}

/// Cache wrapper tallying lookups over one run
struct CountingCache<'a> {
    inner: &'a mut dyn TitleCache,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<'a> CountingCache<'a> {
    fn new(inner: &'a mut dyn TitleCache) -> Self {
        CountingCache {
            inner,
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }
}

impl TitleCache for CountingCache<'_> {
    fn get(&self, url: &str) -> Result<Option<String>, FeedError> {
        let result = self.inner.get(url);
        // Lookup errors are resolved like misses
        let counter = match result {
            Ok(Some(_)) => &self.hits,
            _ => &self.misses,
        };
        counter.set(counter.get() + 1);
        result
    }

    fn set(&mut self, url: &str, title: &str) -> Result<(), FeedError> {
        self.inner.set(url, title)
    }
}

/// Turns sitemap records into feed items, one page at a time
pub async fn create_feed_items(
    session: &Session,
    options: &FeedOptions,
    records: &[PageRecord],
    cache: Option<&mut dyn TitleCache>,
) -> Vec<FeedItem> {
    let mut items = Vec::with_capacity(records.len());
    let mut cache = cache.map(CountingCache::new);

    for record in records {
        let title = if options.scrape_titles {
            let cache = cache.as_mut().map(|cache| cache as &mut dyn TitleCache);
            resolve_title_cached(session, &record.location, cache)
                .await
                .unwrap_or_else(|| record.location.clone())
        } else {
            record.location.clone()
        };

        items.push(FeedItem {
            title,
            link: record.location.clone(),
            date: publication_date(record.last_modified.as_deref()),
        });
    }

    if let Some(cache) = cache.filter(|_| options.scrape_titles) {
        info!(
            hits = cache.hits.get(),
            misses = cache.misses.get(),
            "title cache totals"
        );
    }

    items
}

/// Runs the whole pipeline and returns the serialized RSS document
pub async fn create_feed(
    session: &Session,
    options: &FeedOptions,
    cache: Option<&mut dyn TitleCache>,
) -> Result<String, FeedError> {
    let records = session.fetch_sitemap(&options.sitemap_url).await?;
    info!(
        sitemap = %options.sitemap_url,
        pages = records.len(),
        "fetched sitemap"
    );

    let items = create_feed_items(session, options, &records, cache).await;

    let mut feed = FeedBuilder::new(&options.title, &options.site);
    for item in &items {
        feed.add_item(item);
    }
    Ok(feed.build())
}

/// Prints the feed to standard output and, if requested, writes it to a file
pub fn write_feed(feed: &str, output: Option<&Path>) -> Result<(), FeedError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", feed).map_err(|source| FeedError::Output {
        path: PathBuf::from("<stdout>"),
        source,
    })?;

    if let Some(path) = output {
        fs::write(path, feed).map_err(|source| FeedError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "wrote feed");
    }

    Ok(())
}

/// Prints an error message to stderr, in red when `colored` is set
pub fn print_error_message(msg: &str, colored: bool) {
    if colored {
        eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
    } else {
        eprintln!("{msg}");
    }
}

/// Parses Content-Type header value
pub fn parse_content_type(content_type: &str) -> (String, String) {
    let mut media_type = String::new();
    let mut charset = String::new();

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        if let Some((name, value)) = part.trim().split_once('=') {
            if name.trim().eq_ignore_ascii_case("charset") {
                charset = value.trim().trim_matches('"').to_string();
            }
        }
    }

    (media_type, charset)
}
