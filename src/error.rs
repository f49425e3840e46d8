//! Error types for the redirect console.

use std::fmt;
use thiserror::Error;

/// A single field-level validation failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Which input field failed ("key" or "url").
    pub field: &'static str,
    /// Human-readable message for the field.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field-level failures from one validation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    /// Look up the message for a field, if that field failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

/// Main error type for console operations.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("mapping already exists: {0}")]
    DuplicateKey(String),

    #[error("mapping not found: {0}")]
    NotFound(String),

    #[error("page size not allowed: {0}")]
    InvalidPageSize(usize),

    #[error("audit consistency violation: {0}")]
    Consistency(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for ConsoleError {
    fn from(e: serde_json::Error) -> Self {
        ConsoleError::Serialization(e.to_string())
    }
}

/// Result type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_display() {
        let errors = FieldErrors(vec![
            FieldError::new("key", "Key is required"),
            FieldError::new("url", "Invalid URL format"),
        ]);
        assert_eq!(
            errors.to_string(),
            "key: Key is required; url: Invalid URL format"
        );
        assert_eq!(errors.get("key"), Some("Key is required"));
        assert_eq!(errors.get("actor"), None);
    }
}
