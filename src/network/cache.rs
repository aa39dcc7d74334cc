use std::collections::HashMap;
use std::path::Path;

use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition, TableError};

use crate::core::FeedError;

/// Scraped titles, keyed by page URL
const TITLES_TABLE: TableDefinition<&str, &str> = TableDefinition::new("titles");

/// Key-value store memoizing page titles across runs
///
/// Entries never expire: once a URL has a title it is served from the cache
/// for every later lookup.
pub trait TitleCache {
    fn get(&self, url: &str) -> Result<Option<String>, FeedError>;
    fn set(&mut self, url: &str, title: &str) -> Result<(), FeedError>;
}

/// Persistent title cache backed by a redb database file
pub struct Cache {
    db: Database,
}

impl Cache {
    /// Opens the cache file, creating it if it does not exist yet
    pub fn open<P: AsRef<Path>>(db_file_path: P) -> Result<Cache, FeedError> {
        let db = Database::create(db_file_path).map_err(redb::Error::from)?;

        Ok(Cache { db })
    }

    /// Number of cached titles
    pub fn len(&self) -> Result<u64, FeedError> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        match read_txn.open_table(TITLES_TABLE) {
            Ok(table) => Ok(table.len().map_err(redb::Error::from)?),
            Err(TableError::TableDoesNotExist(_)) => Ok(0),
            Err(e) => Err(redb::Error::from(e).into()),
        }
    }

    pub fn is_empty(&self) -> Result<bool, FeedError> {
        Ok(self.len()? == 0)
    }
}

impl TitleCache for Cache {
    fn get(&self, url: &str) -> Result<Option<String>, FeedError> {
        let read_txn = self.db.begin_read().map_err(redb::Error::from)?;
        let table = match read_txn.open_table(TITLES_TABLE) {
            Ok(table) => table,
            // Nothing has been written to this file yet
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(redb::Error::from(e).into()),
        };

        let title = table
            .get(url)
            .map_err(redb::Error::from)?
            .map(|guard| guard.value().to_string());

        Ok(title)
    }

    fn set(&mut self, url: &str, title: &str) -> Result<(), FeedError> {
        let write_txn = self.db.begin_write().map_err(redb::Error::from)?;
        {
            let mut table = write_txn
                .open_table(TITLES_TABLE)
                .map_err(redb::Error::from)?;
            table.insert(url, title).map_err(redb::Error::from)?;
        }
        write_txn.commit().map_err(redb::Error::from)?;

        Ok(())
    }
}

/// In-memory title cache, lost when dropped
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    entries: HashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> MemoryCache {
        MemoryCache::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TitleCache for MemoryCache {
    fn get(&self, url: &str) -> Result<Option<String>, FeedError> {
        Ok(self.entries.get(url).cloned())
    }

    fn set(&mut self, url: &str, title: &str) -> Result<(), FeedError> {
        self.entries.insert(url.to_string(), title.to_string());
        Ok(())
    }
}
