//! Console orchestrator tying the store, audit log, views, and events
//! together.

use crate::audit::AuditLog;
use crate::error::{ConsoleError, Result};
use crate::events::{EventBus, EventFilter, EventSubscription};
use crate::mappings::MappingStore;
use crate::storage::{Snapshot, StorageBackend};
use crate::types::{
    ActivityDetails, ActivityRecord, ConsoleStats, Mapping, Operation, UrlChange,
};
use crate::views::{filter_mappings, paginate, Page, ViewState};
use parking_lot::Mutex;
use tracing::{debug, info};

/// Console configuration.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    /// Actor identity recorded on every mutation.
    pub actor: String,

    /// Buffered events per event-bus subscriber.
    pub event_buffer: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            actor: "Admin".to_string(),
            event_buffer: 1000,
        }
    }
}

/// The management console core.
///
/// Owns the mapping store and the audit log and sequences every mutation
/// as "validate, apply, append audit record" under one write lock, so no
/// reader can observe a mapping changed without its activity record once
/// both are in flight. Reads and view derivation take no write lock.
pub struct Console {
    config: ConsoleConfig,

    /// The key-unique redirect table.
    mappings: MappingStore,

    /// Append-only activity trail.
    audit: AuditLog,

    /// Live-update broadcast.
    events: EventBus,

    /// Serializes mutate+log pairs.
    write_lock: Mutex<()>,
}

impl Console {
    /// Create an empty console.
    pub fn new(config: ConsoleConfig) -> Self {
        let events = EventBus::with_buffer_size(config.event_buffer);
        Self {
            config,
            mappings: MappingStore::new(),
            audit: AuditLog::new(),
            events,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a console restored from a storage backend.
    ///
    /// An empty backend yields an empty console.
    pub fn open(config: ConsoleConfig, backend: &dyn StorageBackend) -> Result<Self> {
        let console = Self::new(config);
        if let Some(bytes) = backend.load()? {
            let snapshot = Snapshot::from_bytes(&bytes)?;
            console.mappings.replace_all(snapshot.mappings)?;
            // Snapshot stores activity oldest first.
            console.audit.replace_all(snapshot.activity);
            info!(
                mappings = console.mappings.len(),
                activity = console.audit.len(),
                "console restored from snapshot"
            );
        }
        Ok(console)
    }

    // --- Mutations ---

    /// Create a mapping and record the create in the audit trail.
    pub fn create_mapping(&self, key: &str, url: &str) -> Result<Mapping> {
        let _lock = self.write_lock.lock();

        let mapping = self.mappings.create(key, url)?;
        let record = self.log_mutation(Operation::Create, ActivityDetails::created(key, url))?;

        debug!(key, "mapping created");
        self.events.broadcast(&record);
        Ok(mapping)
    }

    /// Replace a mapping's URL and record the update.
    ///
    /// The key is immutable; a rename is a delete followed by a create
    /// and produces two audit records.
    pub fn update_mapping(&self, key: &str, new_url: &str) -> Result<UrlChange> {
        let _lock = self.write_lock.lock();

        let change = self.mappings.update(key, new_url)?;
        let record = self.log_mutation(
            Operation::Update,
            ActivityDetails::updated(key, change.previous_url.clone(), change.new_url.clone()),
        )?;

        debug!(key, "mapping updated");
        self.events.broadcast(&record);
        Ok(change)
    }

    /// Delete a mapping and record the delete.
    pub fn delete_mapping(&self, key: &str) -> Result<Mapping> {
        let _lock = self.write_lock.lock();

        let removed = self.mappings.delete(key)?;
        let record = self.log_mutation(
            Operation::Delete,
            ActivityDetails::deleted(key, removed.url.clone()),
        )?;

        debug!(key, "mapping deleted");
        self.events.broadcast(&record);
        Ok(removed)
    }

    /// Append the audit record for an already-applied mutation.
    ///
    /// If the append itself fails the mutation stands; the failure is a
    /// consistency violation and must reach the caller, never be
    /// swallowed.
    fn log_mutation(&self, operation: Operation, details: ActivityDetails) -> Result<ActivityRecord> {
        self.audit
            .append(operation, details, &self.config.actor)
            .map_err(|e| ConsoleError::Consistency(e.to_string()))
    }

    // --- Reads ---

    /// Look up a single mapping.
    pub fn get_mapping(&self, key: &str) -> Option<Mapping> {
        self.mappings.get(key)
    }

    /// Snapshot of all mappings, insertion order.
    pub fn mappings(&self) -> Vec<Mapping> {
        self.mappings.list()
    }

    /// Snapshot of all activity records, newest first.
    pub fn activity(&self) -> Vec<ActivityRecord> {
        self.audit.list()
    }

    /// Most recent activity record.
    pub fn activity_head(&self) -> Option<ActivityRecord> {
        self.audit.head()
    }

    /// Counts of both collections.
    pub fn stats(&self) -> ConsoleStats {
        ConsoleStats {
            mapping_count: self.mappings.len() as u64,
            activity_count: self.audit.len() as u64,
        }
    }

    // --- Views ---

    /// Filtered + paginated slice of the mapping table.
    pub fn mappings_view(&self, view: &ViewState) -> Page<Mapping> {
        let all = self.mappings.list();
        let filtered = filter_mappings(&all, view.query());
        paginate(&filtered, view.page(), view.page_size())
    }

    /// Paginated slice of the activity trail, newest first.
    pub fn activity_view(&self, view: &ViewState) -> Page<ActivityRecord> {
        let all = self.audit.list();
        paginate(&all, view.page(), view.page_size())
    }

    // --- Events ---

    /// Subscribe to mutation events.
    pub fn subscribe(&self, filter: EventFilter) -> EventSubscription {
        self.events.subscribe(filter)
    }

    // --- Storage ---

    /// Capture both collections and save them to a backend.
    pub fn save_to(&self, backend: &dyn StorageBackend) -> Result<()> {
        // Hold the write lock so the two collections are captured as a
        // consistent pair.
        let _lock = self.write_lock.lock();

        let mut activity = self.audit.list();
        activity.reverse(); // snapshot stores oldest first

        let snapshot = Snapshot {
            mappings: self.mappings.list(),
            activity,
        };
        backend.save(&snapshot.to_bytes()?)?;

        info!(
            mappings = snapshot.mappings.len(),
            activity = snapshot.activity.len(),
            "console snapshot saved"
        );
        Ok(())
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ConsoleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_appends_exactly_one_record() {
        let console = Console::default();

        console.create_mapping("swe", "https://a.example").unwrap();
        assert_eq!(console.stats().activity_count, 1);

        console
            .update_mapping("swe", "https://b.example")
            .unwrap();
        assert_eq!(console.stats().activity_count, 2);

        console.delete_mapping("swe").unwrap();
        assert_eq!(console.stats().activity_count, 3);
    }

    #[test]
    fn test_rejected_mutation_appends_nothing() {
        let console = Console::default();
        console.create_mapping("swe", "https://a.example").unwrap();

        assert!(console.create_mapping("swe", "https://c.example").is_err());
        assert!(console.update_mapping("absent", "https://b.example").is_err());
        assert!(console.delete_mapping("absent").is_err());

        assert_eq!(console.stats().activity_count, 1);
    }

    #[test]
    fn test_actor_from_config() {
        let console = Console::new(ConsoleConfig {
            actor: "Sarah".to_string(),
            ..Default::default()
        });

        console.create_mapping("swe", "https://a.example").unwrap();
        assert_eq!(console.activity_head().unwrap().user, "Sarah");
    }
}
