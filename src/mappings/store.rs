//! In-memory mapping store with key uniqueness.

use crate::error::{ConsoleError, Result};
use crate::mappings::validate::{validate_mapping, validate_url_field};
use crate::types::{Mapping, UrlChange};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Interior state: entries in insertion order plus a key index into them.
#[derive(Default)]
struct StoreInner {
    entries: Vec<Mapping>,
    index: HashMap<String, usize>,
}

/// The key-unique mapping collection.
///
/// Every operation validates before touching state, so a failed call
/// leaves the store exactly as it was. `list` returns a snapshot copy;
/// iteration over it cannot observe later mutations.
pub struct MappingStore {
    inner: RwLock<StoreInner>,
}

impl MappingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Insert a new mapping.
    ///
    /// Shape checks run first (field-level messages), then uniqueness.
    pub fn create(&self, key: &str, url: &str) -> Result<Mapping> {
        validate_mapping(key, url)?;

        let mut inner = self.inner.write();
        if inner.index.contains_key(key) {
            return Err(ConsoleError::DuplicateKey(key.to_string()));
        }

        let mapping = Mapping::new(key, url);
        let pos = inner.entries.len();
        inner.entries.push(mapping.clone());
        inner.index.insert(key.to_string(), pos);

        Ok(mapping)
    }

    /// Replace the URL of an existing mapping. The key cannot change.
    ///
    /// Returns the URL transition so the caller can build an audit record.
    pub fn update(&self, key: &str, new_url: &str) -> Result<UrlChange> {
        validate_url_field(new_url)?;

        let mut inner = self.inner.write();
        let pos = *inner
            .index
            .get(key)
            .ok_or_else(|| ConsoleError::NotFound(key.to_string()))?;

        let previous_url = std::mem::replace(&mut inner.entries[pos].url, new_url.to_string());

        Ok(UrlChange {
            previous_url,
            new_url: new_url.to_string(),
        })
    }

    /// Remove a mapping, returning it for audit detail.
    pub fn delete(&self, key: &str) -> Result<Mapping> {
        let mut inner = self.inner.write();
        let pos = inner
            .index
            .remove(key)
            .ok_or_else(|| ConsoleError::NotFound(key.to_string()))?;

        let removed = inner.entries.remove(pos);

        // Entries after the removed one shifted left by one.
        for idx in inner.index.values_mut() {
            if *idx > pos {
                *idx -= 1;
            }
        }

        Ok(removed)
    }

    /// Look up a single mapping.
    pub fn get(&self, key: &str) -> Option<Mapping> {
        let inner = self.inner.read();
        inner.index.get(key).map(|&pos| inner.entries[pos].clone())
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().index.contains_key(key)
    }

    /// Snapshot of all mappings in insertion order (copy-on-read).
    pub fn list(&self) -> Vec<Mapping> {
        self.inner.read().entries.clone()
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }

    /// Replace the whole collection, e.g. when restoring a snapshot.
    ///
    /// Entries are not re-validated (they were validated when first
    /// accepted), but duplicate keys in the input are rejected.
    pub(crate) fn replace_all(&self, entries: Vec<Mapping>) -> Result<()> {
        let mut index = HashMap::with_capacity(entries.len());
        for (pos, mapping) in entries.iter().enumerate() {
            if index.insert(mapping.key.clone(), pos).is_some() {
                return Err(ConsoleError::DuplicateKey(mapping.key.clone()));
            }
        }

        let mut inner = self.inner.write();
        inner.entries = entries;
        inner.index = index;
        Ok(())
    }
}

impl Default for MappingStore {
    fn default() -> Self {
        Self::new()
    }
}
