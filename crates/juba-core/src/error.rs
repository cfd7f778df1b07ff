use crate::store::StoreError;

/// Failures surfaced to API and CLI callers.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Missing parameter '{name}': {message}")]
    MissingParameter { name: &'static str, message: String },

    #[error("Validation failed for '{field}': {reason}")]
    ValidationFailed { field: &'static str, reason: String },

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl DictionaryError {
    pub fn missing(name: &'static str) -> Self {
        DictionaryError::MissingParameter {
            name,
            message: "required".to_string(),
        }
    }

    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DictionaryError::ValidationFailed {
            field,
            reason: reason.into(),
        }
    }

    /// Stable snake_case tag used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            DictionaryError::MissingParameter { .. } => "missing_parameter",
            DictionaryError::ValidationFailed { .. } => "validation_failed",
            DictionaryError::NotFound(_) => "not_found",
            DictionaryError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl From<StoreError> for DictionaryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => DictionaryError::NotFound(id),
            other => DictionaryError::StoreUnavailable(other.to_string()),
        }
    }
}
