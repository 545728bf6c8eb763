use thiserror::Error;

/// Errors raised while validating input, building drafts, or persisting documents.
///
/// The calculation functions never produce one of these: they are total over
/// validated input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FacturierError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Document number generation or parsing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// A tenant or document does not exist (or belongs to another tenant).
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation conflicts with existing state (duplicate number, quote already converted).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The storage backend failed; no counter was advanced.
    #[error("storage error: {0}")]
    Storage(String),

    /// A request body or settings document could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl FacturierError {
    /// Collapse a list of field errors into a single `Validation` error.
    pub fn from_validation_errors(errors: &[ValidationError]) -> Self {
        let msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(msg)
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the invalid field (e.g. "lines[2].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
