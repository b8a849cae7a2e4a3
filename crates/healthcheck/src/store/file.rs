use std::path::PathBuf;

use toml::{Table, Value};
use tracing::debug;

use super::{ConfigStore, StoreError};

/// Store backed by a TOML file, one `[table]` per table:
///
/// ```toml
/// [health-check]
/// endpoints = ["https://example.com/health", "https://api.example.com/ping"]
/// ```
///
/// The file is re-read on every lookup so edits apply to the next pass.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_error(&self, reason: impl Into<String>) -> StoreError {
        StoreError::Parse { path: self.path.clone(), reason: reason.into() }
    }
}

#[async_trait::async_trait]
impl ConfigStore for FileStore {
    async fn get(&self, table: &str, key: &str) -> Result<Vec<String>, StoreError> {
        debug!(path = %self.path.display(), table, key, "Reading configuration store");

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StoreError::Read { path: self.path.clone(), source })?;

        let document = raw.parse::<Table>().map_err(|e| self.parse_error(e.message()))?;

        let value = document
            .get(table)
            .and_then(Value::as_table)
            .and_then(|entries| entries.get(key))
            .ok_or_else(|| StoreError::missing(table, key))?;

        let items = value
            .as_array()
            .ok_or_else(|| self.parse_error(format!("{table}.{key} must be an array of strings")))?;

        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    self.parse_error(format!("{table}.{key} contains a non-string value: {item}"))
                })
            })
            .collect()
    }
}
