//! Trellis Storage Layer
//!
//! Implements the domain store traits on SQLite.
//!
//! # Architecture
//!
//! - `relationships` holds one row per relationship
//! - `relationships_sections` holds the section set of each relationship
//! - `relationships_entries` holds undirected entry links
//! - `sections` is a local directory of host sections for display
//!
//! Multi-statement writes (add, edit, delete) run inside a single transaction,
//! so a failure part-way leaves the previous state intact.
//!
//! # Examples
//!
//! ```no_run
//! use trellis_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for relationship operations
//! ```

#![warn(missing_docs)]

mod error;
mod links;
mod relationships;
mod sections;

pub use error::StoreError;

use rusqlite::Connection;
use std::path::Path;
use trellis_domain::{NoCache, RelationshipCache};

/// SQLite-based implementation of the relationship, entry-link and section traits
///
/// Reads go through an optional [`RelationshipCache`]; every write invalidates
/// the ids it touches. The default cache stores nothing.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore<C: RelationshipCache = NoCache> {
    conn: Connection,
    cache: C,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use trellis_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("trellis.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::with_cache(path, NoCache)
    }
}

impl<C: RelationshipCache> SqliteStore<C> {
    /// Open a store that caches fetched relationships in `cache`
    ///
    /// The cache is cleared first.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use trellis_domain::IdentityCache;
    /// use trellis_store::SqliteStore;
    ///
    /// let store = SqliteStore::with_cache("trellis.db", IdentityCache::new()).unwrap();
    /// ```
    pub fn with_cache<P: AsRef<Path>>(path: P, cache: C) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;

        // Start from an empty cache
        cache.clear();

        let mut store = Self { conn, cache };
        store.initialize_schema()?;
        Ok(store)
    }

    /// The cache in front of relationship reads
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        // Foreign keys are off by default in SQLite and must be enabled per connection
        self.conn.pragma_update(None, "foreign_keys", true)?;

        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;

        tracing::debug!("Schema initialized");
        Ok(())
    }
}

/// Build `?, ?, ?` for an `IN (...)` clause
fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }

    #[test]
    fn test_schema_is_idempotent() {
        let mut store = SqliteStore::new(":memory:").unwrap();
        assert!(store.initialize_schema().is_ok());
    }
}
