use std::sync::Arc;

use juba_types::{DictionaryEntry, Direction, EntryPatch, NewEntry, Translation};

use crate::error::DictionaryError;
use crate::resolver::Resolver;
use crate::store::DictionaryStore;
use crate::validate::{validate_new, validate_patch};

/// Entry point shared by the API and the CLI: validation in front of the
/// store, resolution on top of it.
#[derive(Clone)]
pub struct DictionaryService {
    store: Arc<dyn DictionaryStore>,
    resolver: Resolver,
}

impl DictionaryService {
    pub fn new(store: Arc<dyn DictionaryStore>) -> Self {
        Self {
            resolver: Resolver::new(store.clone()),
            store,
        }
    }

    pub async fn list(&self) -> Result<Vec<DictionaryEntry>, DictionaryError> {
        let entries = self.store.list_all().await?;
        tracing::debug!("Returning {} entries", entries.len());
        Ok(entries)
    }

    pub async fn create(&self, entry: NewEntry) -> Result<DictionaryEntry, DictionaryError> {
        let valid = validate_new(entry).inspect_err(|e| {
            tracing::warn!("Rejected new entry: {e}");
        })?;

        let stored = self.store.insert(valid).await?;
        tracing::info!(
            "Saved entry {}: '{}' <-> '{}'",
            stored.id,
            stored.english_phrase,
            stored.arabi_juba_phrase
        );
        Ok(stored)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: EntryPatch,
    ) -> Result<DictionaryEntry, DictionaryError> {
        let valid = validate_patch(patch).inspect_err(|e| {
            tracing::warn!("Rejected update for {id}: {e}");
        })?;

        let updated = self.store.update_by_id(id, valid).await?;
        tracing::info!("Updated entry {}", updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DictionaryError> {
        self.store.delete_by_id(id).await?;
        tracing::info!("Deleted entry {id}");
        Ok(())
    }

    pub async fn translate(
        &self,
        phrase: &str,
        source: Direction,
    ) -> Result<Translation, DictionaryError> {
        self.resolver.resolve(phrase, source).await
    }
}
