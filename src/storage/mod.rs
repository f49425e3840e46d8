//! Storage collaborator: load/save of serialized console snapshots.

pub mod backend;

pub use backend::{MemoryBackend, Snapshot, StorageBackend};
