//! Snapshot format and the storage backend trait.

use crate::error::{ConsoleError, Result};
use crate::types::{ActivityRecord, Mapping};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// One serialized capture of both collections.
///
/// Mappings and activity records are stored in insertion order (activity
/// oldest first), so a restore reproduces presentation order exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mappings: Vec<Mapping>,
    pub activity: Vec<ActivityRecord>,
}

impl Snapshot {
    /// Encode as JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| ConsoleError::Serialization(e.to_string()))
    }

    /// Decode from JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| ConsoleError::Deserialization(e.to_string()))
    }
}

/// Where snapshots live.
///
/// The console core has no durability of its own; a backend is an
/// external collaborator that holds opaque snapshot bytes.
pub trait StorageBackend: Send + Sync {
    /// Load the last saved snapshot, if any.
    fn load(&self) -> Result<Option<Vec<u8>>>;

    /// Save a snapshot, replacing any previous one.
    fn save(&self, bytes: &[u8]) -> Result<()>;
}

/// Backend that keeps the snapshot in process memory.
///
/// Used in tests and wherever no durability is wanted.
#[derive(Default)]
pub struct MemoryBackend {
    slot: Mutex<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        *self.slot.lock() = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityDetails, ActivityId, Operation, Timestamp};

    #[test]
    fn test_snapshot_roundtrip() {
        let snapshot = Snapshot {
            mappings: vec![Mapping::new("swe", "https://a.example")],
            activity: vec![ActivityRecord {
                id: ActivityId(1),
                operation: Operation::Create,
                timestamp: Timestamp(1_700_000_000_000_000),
                user: "Admin".to_string(),
                details: ActivityDetails::created("swe", "https://a.example"),
            }],
        };

        let bytes = snapshot.to_bytes().unwrap();
        let restored = Snapshot::from_bytes(&bytes).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = Snapshot::from_bytes(b"not json");
        assert!(matches!(result, Err(ConsoleError::Deserialization(_))));
    }

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert!(backend.load().unwrap().is_none());

        backend.save(b"abc").unwrap();
        assert_eq!(backend.load().unwrap().unwrap(), b"abc");

        backend.save(b"xyz").unwrap();
        assert_eq!(backend.load().unwrap().unwrap(), b"xyz");
    }
}
