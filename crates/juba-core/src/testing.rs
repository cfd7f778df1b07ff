//! Minimal store for unit tests. Relies on the default `counterparts`, so
//! every fallback lookup rebuilds the term index.

use async_trait::async_trait;
use juba_types::{Category, DictionaryEntry, Direction};
use tokio::sync::RwLock;

use crate::store::{DictionaryStore, StoreError};
use crate::validate::{ValidEntry, ValidPatch};

pub fn entry(id: &str, english: &str, arabi_juba: &str) -> DictionaryEntry {
    DictionaryEntry {
        id: id.to_string(),
        english_phrase: english.to_string(),
        arabi_juba_phrase: arabi_juba.to_string(),
        category: Category::General,
        notes: String::new(),
        english_audio: None,
        arabi_juba_audio: None,
    }
}

#[derive(Default)]
pub struct VecStore {
    entries: RwLock<Vec<DictionaryEntry>>,
    next_id: RwLock<u64>,
}

impl VecStore {
    pub fn with_entries(entries: Vec<DictionaryEntry>) -> Self {
        Self {
            next_id: RwLock::new(entries.len() as u64),
            entries: RwLock::new(entries),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl DictionaryStore for VecStore {
    async fn insert(&self, entry: ValidEntry) -> Result<DictionaryEntry, StoreError> {
        let mut next_id = self.next_id.write().await;
        *next_id += 1;
        let stored = entry.into_entry(next_id.to_string());
        self.entries.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<DictionaryEntry>, StoreError> {
        Ok(self.entries.read().await.clone())
    }

    async fn find_one_where(
        &self,
        side: Direction,
        value: &str,
    ) -> Result<Option<DictionaryEntry>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|e| e.phrase(side) == value)
            .cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: ValidPatch,
    ) -> Result<DictionaryEntry, StoreError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply_to(entry);
        Ok(entry.clone())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Store whose every call fails, as when the backing file is unreadable
pub struct BrokenStore;

#[async_trait]
impl DictionaryStore for BrokenStore {
    async fn insert(&self, _entry: ValidEntry) -> Result<DictionaryEntry, StoreError> {
        Err(StoreError::Corrupt("unreadable".into()))
    }

    async fn list_all(&self) -> Result<Vec<DictionaryEntry>, StoreError> {
        Err(StoreError::Corrupt("unreadable".into()))
    }

    async fn find_one_where(
        &self,
        _side: Direction,
        _value: &str,
    ) -> Result<Option<DictionaryEntry>, StoreError> {
        Err(StoreError::Corrupt("unreadable".into()))
    }

    async fn update_by_id(
        &self,
        _id: &str,
        _patch: ValidPatch,
    ) -> Result<DictionaryEntry, StoreError> {
        Err(StoreError::Corrupt("unreadable".into()))
    }

    async fn delete_by_id(&self, _id: &str) -> Result<(), StoreError> {
        Err(StoreError::Corrupt("unreadable".into()))
    }
}
