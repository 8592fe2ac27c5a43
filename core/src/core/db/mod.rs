//! Document medium for recyclafy storage.
//!
//! The store keeps whole JSON documents under fixed string keys. This module
//! provides the medium those documents live in:
//! - `Database`: a redb file with a single `documents` table
//! - `MemoryMedium`: an in-process map, used when nothing needs to survive
//!   the process

use crate::core::db::error::DatabaseError;
use crate::types::Config;
use redb::{ReadableDatabase, TableDefinition};
use tracing::debug;

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum DatabaseError {
        #[error("Database error: {0}")]
        Redb(#[from] redb::DatabaseError),

        #[error("Table error: {0}")]
        TableError(#[from] redb::TableError),

        #[error("Storage error: {0}")]
        StorageError(#[from] redb::StorageError),

        #[error("Transaction error: {0}")]
        TransactionError(#[from] redb::TransactionError),

        #[error("Commit error: {0}")]
        CommitError(#[from] redb::CommitError),

        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Medium lock poisoned")]
        Poisoned,
    }
}

mod memory;
pub use memory::MemoryMedium;

/// Documents table: &str → JSON string
const DOCUMENTS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("documents");

/// A key-value medium holding whole serialized documents.
///
/// Every call completes before returning: a `store` that returned `Ok` is
/// visible to the next `load`.
pub trait DocumentMedium: Send + Sync {
    /// Returns the document under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<String>, DatabaseError>;

    /// Replaces the document under `key`.
    fn store(&self, key: &str, document: &str) -> Result<(), DatabaseError>;

    /// Removes the document under `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), DatabaseError>;
}

/// The main database struct wrapping redb.
pub struct Database {
    db: redb::Database,
}

impl Database {
    /// Creates or opens a database using paths from the config.
    pub fn new(config: &Config) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&config.base_path)?;

        let db = redb::Database::create(config.db_path())?;

        // Initialize tables
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(DOCUMENTS_TABLE)?;
        }
        write_txn.commit()?;

        debug!(path = %config.db_path().display(), "redb medium opened");
        Ok(Self { db })
    }
}

impl DocumentMedium for Database {
    fn load(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DOCUMENTS_TABLE)?;

        let document = table.get(key)?.map(|guard| guard.value().to_string());
        debug!(
            key,
            bytes = document.as_ref().map_or(0, String::len),
            "document loaded"
        );
        Ok(document)
    }

    fn store(&self, key: &str, document: &str) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DOCUMENTS_TABLE)?;
            table.insert(key, document)?;
        }
        write_txn.commit()?;

        debug!(key, bytes = document.len(), "document stored");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DatabaseError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(DOCUMENTS_TABLE)?;
            table.remove(key)?;
        }
        write_txn.commit()?;

        debug!(key, "document removed");
        Ok(())
    }
}
