use juba_core::index::Seq;
use juba_core::{StoreError, TermIndex, ValidEntry, ValidPatch};
use juba_types::{DictionaryEntry, Direction};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Row {
    seq: Seq,
    entry: DictionaryEntry,
}

/// Entries in store order plus the term index kept in step with them.
#[derive(Debug, Clone, Default)]
pub(crate) struct EntryTable {
    rows: Vec<Row>,
    next_seq: Seq,
    index: TermIndex,
}

impl EntryTable {
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Self {
        let mut table = Self::default();
        for entry in entries {
            table.push(entry);
        }
        table
    }

    fn push(&mut self, entry: DictionaryEntry) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(seq, &entry);
        self.rows.push(Row { seq, entry });
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn insert(&mut self, entry: ValidEntry) -> DictionaryEntry {
        let stored = entry.into_entry(Uuid::new_v4().to_string());
        self.push(stored.clone());
        stored
    }

    pub fn entries(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.rows.iter().map(|r| &r.entry)
    }

    pub fn find(&self, side: Direction, value: &str) -> Option<&DictionaryEntry> {
        self.entries().find(|e| e.phrase(side) == value)
    }

    pub fn update(&mut self, id: &str, patch: ValidPatch) -> Result<DictionaryEntry, StoreError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.entry.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let old = row.entry.clone();
        patch.apply_to(&mut row.entry);
        self.index.replace(row.seq, &old, &row.entry);

        Ok(row.entry.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), StoreError> {
        let pos = self
            .rows
            .iter()
            .position(|r| r.entry.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let row = self.rows.remove(pos);
        self.index.remove(row.seq, &row.entry);
        Ok(())
    }

    pub fn counterparts(&self, source: Direction, terms: &[&str]) -> Vec<Option<String>> {
        terms
            .iter()
            .map(|term| self.index.lookup(source, term).map(str::to_owned))
            .collect()
    }

    #[cfg(test)]
    pub fn index(&self) -> &TermIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use juba_core::validate::{validate_new, validate_patch};
    use juba_types::{EntryPatch, NewEntry};

    use super::*;

    fn insert(table: &mut EntryTable, english: &str, arabi_juba: &str) -> DictionaryEntry {
        table.insert(validate_new(NewEntry::new(english, arabi_juba)).unwrap())
    }

    fn assert_index_matches_rebuild(table: &EntryTable) {
        let entries: Vec<DictionaryEntry> = table.entries().cloned().collect();
        let rebuilt = TermIndex::from_entries(&entries);
        for side in [Direction::English, Direction::ArabiJuba] {
            assert_eq!(table.index().resolved(side), rebuilt.resolved(side));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut table = EntryTable::default();
        let a = insert(&mut table, "hello", "salam");
        let b = insert(&mut table, "hello", "salam");
        assert_ne!(a.id, b.id);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_index_follows_writes() {
        let mut table = EntryTable::default();
        insert(&mut table, "hello", "salam");
        let dup = insert(&mut table, "hello", "marhaba");
        let friend = insert(&mut table, "friend", "sadiq");
        assert_index_matches_rebuild(&table);
        assert_eq!(
            table.counterparts(Direction::English, &["hello"]),
            vec![Some("marhaba".to_string())]
        );

        table.delete(&dup.id).unwrap();
        assert_index_matches_rebuild(&table);
        assert_eq!(
            table.counterparts(Direction::English, &["hello"]),
            vec![Some("salam".to_string())]
        );

        let patch = validate_patch(EntryPatch {
            english_phrase: Some("Buddy".into()),
            ..Default::default()
        })
        .unwrap();
        table.update(&friend.id, patch).unwrap();
        assert_index_matches_rebuild(&table);
        assert_eq!(
            table.counterparts(Direction::English, &["friend", "buddy"]),
            vec![None, Some("sadiq".to_string())]
        );
    }

    #[test]
    fn test_unknown_id() {
        let mut table = EntryTable::default();
        assert!(matches!(table.delete("nope"), Err(StoreError::NotFound(_))));
        assert!(matches!(
            table.update("nope", ValidPatch::default()),
            Err(StoreError::NotFound(_))
        ));
    }
}
