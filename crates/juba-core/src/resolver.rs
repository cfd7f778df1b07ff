use std::sync::Arc;

use juba_types::{Direction, MatchKind, Translation};

use crate::error::DictionaryError;
use crate::normalize::{normalize_phrase, tokenize};
use crate::store::DictionaryStore;

/// Checks raw query parameters before resolution.
///
/// An absent or blank phrase, an absent source, and a source outside the two
/// known literals are all reported as `MissingParameter`.
pub fn parse_query(
    phrase: Option<&str>,
    source: Option<&str>,
) -> Result<(String, Direction), DictionaryError> {
    let phrase = phrase
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| DictionaryError::missing("phrase"))?;
    let source = source.ok_or_else(|| DictionaryError::missing("source"))?;
    let direction = source
        .parse::<Direction>()
        .map_err(|e| DictionaryError::MissingParameter {
            name: "source",
            message: e.to_string(),
        })?;

    Ok((phrase.to_string(), direction))
}

/// Resolves phrases against the current store contents.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn DictionaryStore>,
}

impl Resolver {
    pub fn new(store: Arc<dyn DictionaryStore>) -> Self {
        Self { store }
    }

    /// Exact phrase match first, then token-by-token composition.
    ///
    /// Untranslatable tokens are passed through unchanged, so the composed
    /// phrase always has as many tokens as the input.
    pub async fn resolve(
        &self,
        phrase: &str,
        source: Direction,
    ) -> Result<Translation, DictionaryError> {
        let normalized = normalize_phrase(phrase);
        if normalized.is_empty() {
            return Err(DictionaryError::missing("phrase"));
        }

        if let Some(entry) = self.store.find_one_where(source, &normalized).await? {
            tracing::debug!("Exact match for '{}': entry {}", normalized, entry.id);
            return Ok(Translation {
                english_phrase: entry.english_phrase,
                arabi_juba_phrase: entry.arabi_juba_phrase,
                notes: Some(entry.notes),
                match_kind: MatchKind::Exact,
            });
        }

        let tokens = tokenize(&normalized);
        let counterparts = self.store.counterparts(source, &tokens).await?;

        let translated = tokens
            .iter()
            .zip(counterparts)
            .map(|(token, counterpart)| counterpart.unwrap_or_else(|| token.to_string()))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!("Composed '{}' -> '{}'", normalized, translated);

        let (english_phrase, arabi_juba_phrase) = match source {
            Direction::English => (normalized, translated),
            Direction::ArabiJuba => (translated, normalized),
        };

        Ok(Translation {
            english_phrase,
            arabi_juba_phrase,
            notes: None,
            match_kind: MatchKind::Composed,
        })
    }
}
