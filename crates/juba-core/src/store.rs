use async_trait::async_trait;
use juba_types::{DictionaryEntry, Direction};

use crate::index::TermIndex;
use crate::validate::{ValidEntry, ValidPatch};

/// Persistence operations the dictionary relies on.
///
/// `list_all` returns entries in store order, which is also the order used to
/// break ties between duplicate phrases.
#[async_trait]
pub trait DictionaryStore: Send + Sync {
    /// Persist a new entry and assign it a fresh id
    async fn insert(&self, entry: ValidEntry) -> Result<DictionaryEntry, StoreError>;

    /// All entries, in store order
    async fn list_all(&self) -> Result<Vec<DictionaryEntry>, StoreError>;

    /// First entry (in store order) whose `side` phrase equals `value`
    async fn find_one_where(
        &self,
        side: Direction,
        value: &str,
    ) -> Result<Option<DictionaryEntry>, StoreError>;

    async fn update_by_id(
        &self,
        id: &str,
        patch: ValidPatch,
    ) -> Result<DictionaryEntry, StoreError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    /// Term index lookup for each of `terms`, read from the `source` side.
    ///
    /// The default rebuilds the index from `list_all` on every call. Stores
    /// that maintain a [`TermIndex`] across writes should override it.
    async fn counterparts(
        &self,
        source: Direction,
        terms: &[&str],
    ) -> Result<Vec<Option<String>>, StoreError> {
        let entries = self.list_all().await?;
        let index = TermIndex::from_entries(&entries);
        Ok(terms
            .iter()
            .map(|term| index.lookup(source, term).map(str::to_owned))
            .collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store data: {0}")]
    Corrupt(String),

    #[error("Store timed out after {0} ms")]
    Timeout(u64),
}
