use juba_types::{DictionaryEntry, EntryPatch, NewEntry};

use crate::error::DictionaryError;
use crate::normalize::normalize_phrase;

/// A create payload that passed validation. Phrases are normalized and
/// defaults are filled in; stores only accept this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEntry(NewEntry);

impl ValidEntry {
    pub fn into_entry(self, id: String) -> DictionaryEntry {
        let NewEntry {
            english_phrase,
            arabi_juba_phrase,
            category,
            notes,
            english_audio,
            arabi_juba_audio,
        } = self.0;

        DictionaryEntry {
            id,
            english_phrase,
            arabi_juba_phrase,
            category: category.unwrap_or_default(),
            notes: notes.unwrap_or_default(),
            english_audio,
            arabi_juba_audio,
        }
    }
}

/// An update payload whose supplied phrases are non-empty and normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidPatch(EntryPatch);

impl ValidPatch {
    pub fn apply_to(self, entry: &mut DictionaryEntry) {
        self.0.apply_to(entry);
    }

    pub fn as_patch(&self) -> &EntryPatch {
        &self.0
    }
}

fn required_phrase(field: &'static str, raw: &str) -> Result<String, DictionaryError> {
    let phrase = normalize_phrase(raw);
    if phrase.is_empty() {
        return Err(DictionaryError::invalid(field, "must not be empty"));
    }
    Ok(phrase)
}

pub fn validate_new(entry: NewEntry) -> Result<ValidEntry, DictionaryError> {
    let NewEntry {
        english_phrase,
        arabi_juba_phrase,
        category,
        notes,
        english_audio,
        arabi_juba_audio,
    } = entry;

    Ok(ValidEntry(NewEntry {
        english_phrase: required_phrase("englishPhrase", &english_phrase)?,
        arabi_juba_phrase: required_phrase("arabiJubaPhrase", &arabi_juba_phrase)?,
        category: Some(category.unwrap_or_default()),
        notes: Some(notes.unwrap_or_default()),
        english_audio,
        arabi_juba_audio,
    }))
}

pub fn validate_patch(patch: EntryPatch) -> Result<ValidPatch, DictionaryError> {
    let english_phrase = patch
        .english_phrase
        .as_deref()
        .map(|p| required_phrase("englishPhrase", p))
        .transpose()?;
    let arabi_juba_phrase = patch
        .arabi_juba_phrase
        .as_deref()
        .map(|p| required_phrase("arabiJubaPhrase", p))
        .transpose()?;

    Ok(ValidPatch(EntryPatch {
        english_phrase,
        arabi_juba_phrase,
        category: patch.category,
        notes: patch.notes,
        english_audio: patch.english_audio,
        arabi_juba_audio: patch.arabi_juba_audio,
    }))
}
