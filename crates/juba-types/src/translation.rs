use serde::{Deserialize, Serialize};

use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Whole phrase matched a stored entry
    Exact,
    /// Built token by token from the term index
    Composed,
}

/// Result of resolving one phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub english_phrase: String,
    pub arabi_juba_phrase: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "match")]
    pub match_kind: MatchKind,
}

impl Translation {
    /// Phrase on the given language side
    pub fn phrase(&self, side: Direction) -> &str {
        match side {
            Direction::English => &self.english_phrase,
            Direction::ArabiJuba => &self.arabi_juba_phrase,
        }
    }
}
