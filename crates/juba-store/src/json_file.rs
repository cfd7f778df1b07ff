use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use juba_core::normalize::normalize_phrase;
use juba_core::{DictionaryStore, StoreError, ValidEntry, ValidPatch};
use juba_types::{DictionaryEntry, Direction};
use tokio::fs;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::table::EntryTable;

/// Store backed by a single JSON array on disk.
///
/// The whole collection is loaded on open and rewritten after every write.
/// A write only becomes visible once the file has been replaced.
#[derive(Debug)]
pub struct JsonFileStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    table: RwLock<EntryTable>,
}

impl JsonFileStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let data = match fs::read_to_string(&path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No dictionary at {}, starting empty", path.display());
                return Ok(Self::from_table(path, EntryTable::default()));
            }
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<DictionaryEntry> = serde_json::from_str(&data)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?;

        let (entries, migrated) = repair(entries);
        let table = EntryTable::from_entries(entries);
        tracing::info!("Loaded {} entries from {}", table.len(), path.display());

        if migrated {
            persist(&path, &table).await?;
            tracing::info!("Rewrote {} after repairing entries", path.display());
        }

        Ok(Self::from_table(path, table))
    }

    fn from_table(path: PathBuf, table: EntryTable) -> Self {
        Self {
            inner: Arc::new(Inner {
                path,
                table: RwLock::new(table),
            }),
        }
    }

    /// Applies `op` to a copy of the table and swaps it in once persisted.
    ///
    /// Runs as its own task: a caller that stops waiting does not stop the
    /// write, so the file and the in-memory table never disagree.
    async fn write_with<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut EntryTable) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let mut table = inner.table.write().await;
            let mut next = table.clone();
            let out = op(&mut next)?;
            persist(&inner.path, &next).await?;
            *table = next;
            Ok(out)
        });

        task.await.map_err(|e| StoreError::Io(std::io::Error::other(e)))?
    }
}

#[async_trait]
impl DictionaryStore for JsonFileStore {
    async fn insert(&self, entry: ValidEntry) -> Result<DictionaryEntry, StoreError> {
        self.write_with(move |table| Ok(table.insert(entry))).await
    }

    async fn list_all(&self) -> Result<Vec<DictionaryEntry>, StoreError> {
        Ok(self.inner.table.read().await.entries().cloned().collect())
    }

    async fn find_one_where(
        &self,
        side: Direction,
        value: &str,
    ) -> Result<Option<DictionaryEntry>, StoreError> {
        Ok(self.inner.table.read().await.find(side, value).cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        patch: ValidPatch,
    ) -> Result<DictionaryEntry, StoreError> {
        let id = id.to_string();
        self.write_with(move |table| table.update(&id, patch)).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let id = id.to_string();
        self.write_with(move |table| table.delete(&id)).await
    }

    async fn counterparts(
        &self,
        source: Direction,
        terms: &[&str],
    ) -> Result<Vec<Option<String>>, StoreError> {
        Ok(self.inner.table.read().await.counterparts(source, terms))
    }
}

/// Brings hand-edited files back in line with the entry invariants.
/// Returns the kept entries and whether anything changed.
fn repair(entries: Vec<DictionaryEntry>) -> (Vec<DictionaryEntry>, bool) {
    let mut seen_ids = HashSet::new();
    let mut kept = Vec::with_capacity(entries.len());
    let mut migrated = false;

    for mut e in entries {
        let english = normalize_phrase(&e.english_phrase);
        let arabi_juba = normalize_phrase(&e.arabi_juba_phrase);
        if english.is_empty() || arabi_juba.is_empty() {
            tracing::warn!("Dropping entry '{}' with an empty phrase", e.id);
            migrated = true;
            continue;
        }
        if english != e.english_phrase || arabi_juba != e.arabi_juba_phrase {
            e.english_phrase = english;
            e.arabi_juba_phrase = arabi_juba;
            migrated = true;
        }

        if e.id.trim().is_empty() || seen_ids.contains(&e.id) {
            let id = Uuid::new_v4().to_string();
            tracing::warn!("Assigning new id {} to entry with id '{}'", id, e.id);
            e.id = id;
            migrated = true;
        }
        seen_ids.insert(e.id.clone());

        kept.push(e);
    }

    (kept, migrated)
}

async fn persist(path: &Path, table: &EntryTable) -> Result<(), StoreError> {
    let entries: Vec<&DictionaryEntry> = table.entries().collect();
    let json = serde_json::to_string_pretty(&entries)
        .map_err(|e| StoreError::Corrupt(e.to_string()))?;

    write_atomic(path, json.as_bytes()).await
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).await?;
    }

    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "dictionary".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
