//! Shape validation for mapping fields.
//!
//! Shape checks always run before uniqueness/existence checks, so a
//! malformed key can never surface as a duplicate-key error.

use crate::error::{ConsoleError, FieldError, FieldErrors, Result};
use url::Url;

/// Maximum key length in characters.
pub const MAX_KEY_CHARS: usize = 50;

/// Maximum URL length in characters.
pub const MAX_URL_CHARS: usize = 1024;

/// Check the key field. Returns the field error if malformed.
pub fn validate_key(key: &str) -> Option<FieldError> {
    if key.is_empty() {
        return Some(FieldError::new("key", "Key is required"));
    }
    if key.chars().count() > MAX_KEY_CHARS {
        return Some(FieldError::new(
            "key",
            format!("Key must be at most {} characters", MAX_KEY_CHARS),
        ));
    }
    None
}

/// Check the url field. Returns the field error if malformed.
///
/// The URL must parse as an absolute URL; relative references are rejected.
pub fn validate_url(url: &str) -> Option<FieldError> {
    if Url::parse(url).is_err() {
        return Some(FieldError::new("url", "Invalid URL format"));
    }
    if url.chars().count() > MAX_URL_CHARS {
        return Some(FieldError::new(
            "url",
            format!("URL must be at most {} characters", MAX_URL_CHARS),
        ));
    }
    None
}

/// Check the url field alone, as a `Result` (used by update).
pub fn validate_url_field(url: &str) -> Result<()> {
    match validate_url(url) {
        Some(e) => Err(ConsoleError::Validation(FieldErrors(vec![e]))),
        None => Ok(()),
    }
}

/// Check both fields, collecting every failure.
pub fn validate_mapping(key: &str, url: &str) -> Result<()> {
    let mut errors = Vec::new();
    if let Some(e) = validate_key(key) {
        errors.push(e);
    }
    if let Some(e) = validate_url(url) {
        errors.push(e);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConsoleError::Validation(FieldErrors(errors)))
    }
}
