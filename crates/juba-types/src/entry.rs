use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Greetings,
    Food,
    Travel,
    Emergency,
    Conversation,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::General,
        Category::Greetings,
        Category::Food,
        Category::Travel,
        Category::Emergency,
        Category::Conversation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Greetings => "greetings",
            Category::Food => "food",
            Category::Travel => "travel",
            Category::Emergency => "emergency",
            Category::Conversation => "conversation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// A stored bilingual dictionary record.
///
/// Both phrase fields are kept pre-normalized (trimmed, lower-cased).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub id: String,
    pub english_phrase: String,
    pub arabi_juba_phrase: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub english_audio: Option<String>,
    #[serde(default)]
    pub arabi_juba_audio: Option<String>,
}

impl DictionaryEntry {
    /// Phrase on the given language side
    pub fn phrase(&self, side: Direction) -> &str {
        match side {
            Direction::English => &self.english_phrase,
            Direction::ArabiJuba => &self.arabi_juba_phrase,
        }
    }
}

/// Create payload. Missing phrases deserialize as empty and fail validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    #[serde(default)]
    pub english_phrase: String,
    #[serde(default)]
    pub arabi_juba_phrase: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub english_audio: Option<String>,
    #[serde(default)]
    pub arabi_juba_audio: Option<String>,
}

impl NewEntry {
    pub fn new(english: impl Into<String>, arabi_juba: impl Into<String>) -> Self {
        Self {
            english_phrase: english.into(),
            arabi_juba_phrase: arabi_juba.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default)]
    pub english_phrase: Option<String>,
    #[serde(default)]
    pub arabi_juba_phrase: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub english_audio: Option<String>,
    #[serde(default)]
    pub arabi_juba_audio: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self == &EntryPatch::default()
    }

    /// Overwrites the supplied fields of `entry`.
    pub fn apply_to(self, entry: &mut DictionaryEntry) {
        if let Some(v) = self.english_phrase {
            entry.english_phrase = v;
        }
        if let Some(v) = self.arabi_juba_phrase {
            entry.arabi_juba_phrase = v;
        }
        if let Some(v) = self.category {
            entry.category = v;
        }
        if let Some(v) = self.notes {
            entry.notes = v;
        }
        if let Some(v) = self.english_audio {
            entry.english_audio = Some(v);
        }
        if let Some(v) = self.arabi_juba_audio {
            entry.arabi_juba_audio = Some(v);
        }
    }
}
