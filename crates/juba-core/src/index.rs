use std::collections::{BTreeMap, HashMap};

use juba_types::{DictionaryEntry, Direction};

/// Store-order position of an entry. Assigned once on insert, never reused.
pub type Seq = u64;

/// Bidirectional term index, maintained incrementally by the store.
///
/// Every key keeps all entries currently carrying it, ordered by store
/// position. A lookup answers with the counterpart of the latest one, so the
/// index always equals [`TermIndex::from_entries`] over the store's
/// `list_all()` sequence: a later entry overrides earlier ones for the same
/// key, and removing it hands the key back to the next-latest.
#[derive(Debug, Default, Clone)]
pub struct TermIndex {
    english_to_arabi_juba: HashMap<String, BTreeMap<Seq, String>>,
    arabi_juba_to_english: HashMap<String, BTreeMap<Seq, String>>,
}

impl TermIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index built from scratch; positions follow iteration order.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a DictionaryEntry>) -> Self {
        let mut index = Self::new();
        for (seq, entry) in entries.into_iter().enumerate() {
            index.insert(seq as Seq, entry);
        }
        index
    }

    pub fn insert(&mut self, seq: Seq, entry: &DictionaryEntry) {
        self.english_to_arabi_juba
            .entry(entry.english_phrase.clone())
            .or_default()
            .insert(seq, entry.arabi_juba_phrase.clone());
        self.arabi_juba_to_english
            .entry(entry.arabi_juba_phrase.clone())
            .or_default()
            .insert(seq, entry.english_phrase.clone());
    }

    /// Drops the mappings `entry` contributed at `seq`.
    pub fn remove(&mut self, seq: Seq, entry: &DictionaryEntry) {
        remove_mapping(&mut self.english_to_arabi_juba, &entry.english_phrase, seq);
        remove_mapping(&mut self.arabi_juba_to_english, &entry.arabi_juba_phrase, seq);
    }

    /// Re-index an entry in place, keeping its store position
    pub fn replace(&mut self, seq: Seq, old: &DictionaryEntry, new: &DictionaryEntry) {
        self.remove(seq, old);
        self.insert(seq, new);
    }

    /// Counterpart of `term`, read from the index for the `source` side.
    pub fn lookup(&self, source: Direction, term: &str) -> Option<&str> {
        self.side(source)
            .get(term)
            .and_then(|by_seq| by_seq.last_key_value())
            .map(|(_, counterpart)| counterpart.as_str())
    }

    /// Winning mapping for every key on one side.
    ///
    /// Diagnostic accessor, used to compare an incrementally kept index
    /// against one rebuilt from scratch. Lookups go through [`Self::lookup`].
    pub fn resolved(&self, source: Direction) -> HashMap<&str, &str> {
        self.side(source)
            .iter()
            .filter_map(|(key, by_seq)| {
                by_seq
                    .last_key_value()
                    .map(|(_, counterpart)| (key.as_str(), counterpart.as_str()))
            })
            .collect()
    }

    fn side(&self, source: Direction) -> &HashMap<String, BTreeMap<Seq, String>> {
        match source {
            Direction::English => &self.english_to_arabi_juba,
            Direction::ArabiJuba => &self.arabi_juba_to_english,
        }
    }
}

fn remove_mapping(map: &mut HashMap<String, BTreeMap<Seq, String>>, key: &str, seq: Seq) {
    if let Some(by_seq) = map.get_mut(key) {
        by_seq.remove(&seq);
        if by_seq.is_empty() {
            map.remove(key);
        }
    }
}
