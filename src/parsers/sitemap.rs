//! Sitemap parsing
//!
//! Reads the two document kinds of the sitemaps.org protocol:
//!
//! ```xml
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!   </url>
//! </urlset>
//! ```
//!
//! and `<sitemapindex>`, whose `<sitemap><loc>` entries point at further
//! sitemaps. Namespace prefixes are ignored; elements nested deeper than an
//! entry's direct children (such as `<image:loc>`) are skipped.

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

use crate::core::PageRecord;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("unexpected root element <{0}>")]
    UnexpectedRoot(String),

    #[error("document has no root element")]
    Empty,
}

/// A parsed sitemap document
#[derive(Debug, PartialEq, Eq)]
pub enum SitemapDocument {
    /// Pages listed by a `<urlset>`
    UrlSet(Vec<PageRecord>),
    /// Child sitemap locations listed by a `<sitemapindex>`
    Index(Vec<String>),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RootKind {
    UrlSet,
    Index,
}

impl RootKind {
    fn from_name(name: &[u8]) -> Result<RootKind, SitemapError> {
        match name {
            b"urlset" => Ok(RootKind::UrlSet),
            b"sitemapindex" => Ok(RootKind::Index),
            other => Err(SitemapError::UnexpectedRoot(
                String::from_utf8_lossy(other).into_owned(),
            )),
        }
    }

    fn entry_name(self) -> &'static [u8] {
        match self {
            RootKind::UrlSet => b"url",
            RootKind::Index => b"sitemap",
        }
    }
}

#[derive(Default)]
struct Entry {
    loc: Option<String>,
    lastmod: Option<String>,
}

pub fn parse_sitemap(data: &[u8]) -> Result<SitemapDocument, SitemapError> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut root: Option<RootKind> = None;
    // Local names of the currently open elements, root first
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut entry: Option<Entry> = None;
    let mut text = String::new();

    let mut records: Vec<PageRecord> = Vec::new();
    let mut children: Vec<String> = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();

                match root {
                    None => root = Some(RootKind::from_name(&name)?),
                    Some(kind) if path.len() == 1 && name == kind.entry_name() => {
                        entry = Some(Entry::default());
                    }
                    Some(_) => {}
                }

                text.clear();
                path.push(name);
            }
            Event::Empty(e) => {
                if root.is_none() {
                    root = Some(RootKind::from_name(e.local_name().as_ref())?);
                    break;
                }
            }
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
            Event::End(_) => {
                let Some(name) = path.pop() else {
                    continue;
                };

                // Entry fields sit at depth 2: <urlset><url><loc>
                if path.len() == 2 {
                    if let Some(entry) = entry.as_mut() {
                        match name.as_slice() {
                            b"loc" => entry.loc = Some(text.trim().to_string()),
                            b"lastmod" => entry.lastmod = Some(text.trim().to_string()),
                            _ => {}
                        }
                    }
                } else if path.len() == 1 {
                    if let Some(finished) = entry.take() {
                        if let Some(location) = finished.loc.filter(|loc| !loc.is_empty()) {
                            if root == Some(RootKind::UrlSet) {
                                records.push(PageRecord {
                                    location,
                                    last_modified: finished.lastmod.filter(|l| !l.is_empty()),
                                });
                            } else {
                                children.push(location);
                            }
                        }
                    }
                }

                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    match root {
        Some(RootKind::UrlSet) => Ok(SitemapDocument::UrlSet(records)),
        Some(RootKind::Index) => Ok(SitemapDocument::Index(children)),
        None => Err(SitemapError::Empty),
    }
}
