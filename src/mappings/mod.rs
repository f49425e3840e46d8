//! Mapping store: the key-unique redirect table.

pub mod store;
pub mod validate;

pub use store::MappingStore;
pub use validate::{
    validate_key, validate_mapping, validate_url, validate_url_field, MAX_KEY_CHARS, MAX_URL_CHARS,
};
