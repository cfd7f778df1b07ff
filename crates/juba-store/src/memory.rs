use async_trait::async_trait;
use juba_core::{DictionaryStore, StoreError, ValidEntry, ValidPatch};
use juba_types::{DictionaryEntry, Direction};
use tokio::sync::RwLock;

use crate::table::EntryTable;

/// Process-local store. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<EntryTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with already stored entries, keeping their ids and order
    pub fn with_entries(entries: Vec<DictionaryEntry>) -> Self {
        Self {
            table: RwLock::new(EntryTable::from_entries(entries)),
        }
    }
}

#[async_trait]
impl DictionaryStore for MemoryStore {
    async fn insert(&self, entry: ValidEntry) -> Result<DictionaryEntry, StoreError> {
        Ok(self.table.write().await.insert(entry))
    }

    async fn list_all(&self) -> Result<Vec<DictionaryEntry>, StoreError> {
        Ok(self.table.read().await.entries().cloned().collect())
    }

    async fn find_one_where(
        &self,
        side: Direction,
        value: &str,
    ) -> Result<Option<DictionaryEntry>, StoreError> {
        Ok(self.table.read().await.find(side, value).cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: ValidPatch,
    ) -> Result<DictionaryEntry, StoreError> {
        self.table.write().await.update(id, patch)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.table.write().await.delete(id)
    }

    async fn counterparts(
        &self,
        source: Direction,
        terms: &[&str],
    ) -> Result<Vec<Option<String>>, StoreError> {
        Ok(self.table.read().await.counterparts(source, terms))
    }
}
