/// Canonical form shared by stored phrases and lookups: trimmed, lower-cased.
pub fn normalize_phrase(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whitespace-separated tokens of an already normalized phrase
pub fn tokenize(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}
