//! Configuration store - keyed lookup of string lists.
//!
//! The endpoint list lives outside the process; [`ConfigStore`] is the
//! seam. A failed read is the one fatal condition of a health-check pass.

pub mod file;
pub mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Key {key:?} not found in table {table:?}")]
    MissingKey { table: String, key: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn missing(table: &str, key: &str) -> Self {
        Self::MissingKey { table: table.to_string(), key: key.to_string() }
    }
}

/// Read-only key/value lookup returning a list of strings.
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, table: &str, key: &str) -> Result<Vec<String>, StoreError>;
}
