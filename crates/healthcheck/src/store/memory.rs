use std::collections::HashMap;

use super::{ConfigStore, StoreError};

/// Store backed by a map, filled at construction.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<(String, String), Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(
        mut self,
        table: impl Into<String>,
        key: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.insert(table, key, values);
        self
    }

    pub fn insert(
        &mut self,
        table: impl Into<String>,
        key: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.entries
            .insert((table.into(), key.into()), values.into_iter().map(Into::into).collect());
    }
}

#[async_trait::async_trait]
impl ConfigStore for MemoryStore {
    async fn get(&self, table: &str, key: &str) -> Result<Vec<String>, StoreError> {
        self.entries
            .get(&(table.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::missing(table, key))
    }
}
