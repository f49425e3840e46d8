//! Append-only activity log.

use crate::error::{ConsoleError, Result};
use crate::types::{ActivityDetails, ActivityId, ActivityRecord, Operation, Timestamp};
use parking_lot::RwLock;

/// Interior state: records in insertion order plus the next id to assign.
struct LogInner {
    records: Vec<ActivityRecord>,
    next_id: u64,
}

/// Insertion-ordered activity log.
///
/// Records are immutable once appended and are never deleted or
/// reordered. `list` presents them newest-first by insertion, so clock
/// resolution cannot reorder same-instant entries.
pub struct AuditLog {
    inner: RwLock<LogInner>,
}

impl AuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(LogInner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Append a record with a fresh id and the current instant.
    ///
    /// The only failure mode is id-counter exhaustion, surfaced as a
    /// consistency error; the caller's paired mutation stands regardless.
    pub fn append(
        &self,
        operation: Operation,
        details: ActivityDetails,
        actor: &str,
    ) -> Result<ActivityRecord> {
        let mut inner = self.inner.write();

        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or_else(|| ConsoleError::Consistency("activity id space exhausted".to_string()))?;

        let record = ActivityRecord {
            id: ActivityId(id),
            operation,
            timestamp: Timestamp::now(),
            user: actor.to_string(),
            details,
        };

        inner.records.push(record.clone());
        Ok(record)
    }

    /// Snapshot of all records, newest-first by insertion.
    pub fn list(&self) -> Vec<ActivityRecord> {
        let inner = self.inner.read();
        inner.records.iter().rev().cloned().collect()
    }

    /// The most recent record, if any.
    pub fn head(&self) -> Option<ActivityRecord> {
        self.inner.read().records.last().cloned()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }

    /// Replace the whole log, e.g. when restoring a snapshot.
    ///
    /// `records` is expected in insertion order (oldest first). The id
    /// counter resumes above the highest restored id.
    pub(crate) fn replace_all(&self, records: Vec<ActivityRecord>) {
        let next_id = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
        let mut inner = self.inner.write();
        inner.records = records;
        inner.next_id = next_id;
    }
}

impl Default for AuditLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_assigns_fresh_ids() {
        let log = AuditLog::new();
        let a = log
            .append(
                Operation::Create,
                ActivityDetails::created("swe", "https://a.example"),
                "Admin",
            )
            .unwrap();
        let b = log
            .append(
                Operation::Delete,
                ActivityDetails::deleted("swe", "https://a.example"),
                "Admin",
            )
            .unwrap();

        assert_ne!(a.id, b.id);
        assert!(b.id > a.id);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_list_is_newest_first_by_insertion() {
        let log = AuditLog::new();
        for i in 0..5 {
            log.append(
                Operation::Create,
                ActivityDetails::created(format!("k{}", i), "https://a.example"),
                "Admin",
            )
            .unwrap();
        }

        let listed = log.list();
        let keys: Vec<_> = listed.iter().map(|r| r.details.key.as_str()).collect();
        // Insertion order decides, not timestamp values: appends within the
        // same microsecond still come out newest-first.
        assert_eq!(keys, vec!["k4", "k3", "k2", "k1", "k0"]);
    }

    #[test]
    fn test_head_matches_last_append() {
        let log = AuditLog::new();
        assert!(log.head().is_none());

        log.append(
            Operation::Create,
            ActivityDetails::created("swe", "https://a.example"),
            "Admin",
        )
        .unwrap();
        let head = log.head().unwrap();
        assert_eq!(head.operation, Operation::Create);
        assert_eq!(head.details.key, "swe");
        assert_eq!(head.user, "Admin");
    }

    #[test]
    fn test_replace_all_resumes_id_counter() {
        let log = AuditLog::new();
        let record = ActivityRecord {
            id: ActivityId(7),
            operation: Operation::Create,
            timestamp: Timestamp::now(),
            user: "Admin".to_string(),
            details: ActivityDetails::created("swe", "https://a.example"),
        };
        log.replace_all(vec![record]);

        let next = log
            .append(
                Operation::Update,
                ActivityDetails::updated("swe", "https://a.example", "https://b.example"),
                "Admin",
            )
            .unwrap();
        assert_eq!(next.id, ActivityId(8));
    }
}
