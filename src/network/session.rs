use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::core::{parse_content_type, FeedError, FeedOptions, PageRecord};
use crate::parsers::sitemap::{parse_sitemap, SitemapDocument};

/// How many sitemap indexes may be nested before giving up
pub const MAX_SITEMAP_DEPTH: usize = 3;

/// HTTP session shared by sitemap retrieval and title scraping
pub struct Session {
    client: Client,
    timeout: Duration,
    concurrency: usize,
}

impl Session {
    pub fn new(options: &FeedOptions) -> Result<Session, FeedError> {
        let client = Client::builder()
            .user_agent(options.user_agent.as_str())
            .build()
            .map_err(|source| FeedError::Network {
                url: options.sitemap_url.clone(),
                source,
            })?;

        Ok(Session {
            client,
            timeout: options.timeout,
            concurrency: options.concurrency.max(1),
        })
    }

    /// Downloads an HTML page, returning its body and declared charset
    ///
    /// Only the transport's own limits apply; no timeout is set here.
    pub async fn retrieve_document(
        &self,
        url: &str,
    ) -> Result<(Vec<u8>, Option<String>), FeedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FeedError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let charset = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| parse_content_type(value).1)
            .filter(|charset| !charset.is_empty());

        let data = response
            .bytes()
            .await
            .map_err(|source| FeedError::Network {
                url: url.to_string(),
                source,
            })?;

        Ok((data.to_vec(), charset))
    }

    /// Fetches a sitemap and lists its pages in document order
    ///
    /// Sitemap indexes are followed; their children are fetched with bounded
    /// concurrency and their pages concatenated in index order.
    pub async fn fetch_sitemap(&self, url: &str) -> Result<Vec<PageRecord>, FeedError> {
        Url::parse(url).map_err(|source| FeedError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        self.fetch_sitemap_at_depth(url.to_string(), 0).await
    }

    fn fetch_sitemap_at_depth(
        &self,
        url: String,
        depth: usize,
    ) -> BoxFuture<'_, Result<Vec<PageRecord>, FeedError>> {
        async move {
            let data = self.retrieve_sitemap(&url).await?;
            let document = parse_sitemap(&data).map_err(|source| FeedError::Sitemap {
                url: url.clone(),
                source,
            })?;

            match document {
                SitemapDocument::UrlSet(records) => {
                    debug!(sitemap = %url, pages = records.len(), "read url set");
                    Ok(records)
                }
                SitemapDocument::Index(children) => {
                    if depth >= MAX_SITEMAP_DEPTH {
                        return Err(FeedError::SitemapTooDeep {
                            url,
                            max_depth: MAX_SITEMAP_DEPTH,
                        });
                    }
                    info!(sitemap = %url, children = children.len(), "following sitemap index");

                    let nested: Vec<Vec<PageRecord>> = stream::iter(children)
                        .map(|child| self.fetch_sitemap_at_depth(child, depth + 1))
                        .buffered(self.concurrency)
                        .try_collect()
                        .await?;

                    Ok(nested.into_iter().flatten().collect())
                }
            }
        }
        .boxed()
    }

    async fn retrieve_sitemap(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| FeedError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let data = response
            .bytes()
            .await
            .map_err(|source| FeedError::Network {
                url: url.to_string(),
                source,
            })?;

        Ok(data.to_vec())
    }
}
