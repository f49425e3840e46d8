//! Core types for the redirect console.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A keyed redirect: a short, unique key pointing at a target URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Unique key (1-50 chars). Immutable after creation.
    pub key: String,

    /// Absolute target URL (max 1024 chars).
    pub url: String,
}

impl Mapping {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
        }
    }
}

/// Which mutation an activity record describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// Unique identifier for an activity record (assigned by the log).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivityId(pub u64);

impl fmt::Debug for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActivityId({})", self.0)
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Microseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards");
        Timestamp(duration.as_micros() as i64)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// URL detail carried by an activity record.
///
/// Which optional fields are set depends on the operation: create sets
/// `new_url` only, update sets both, delete sets `previous_url` only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDetails {
    /// Key of the affected mapping.
    pub key: String,

    /// URL before the mutation (update, delete).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_url: Option<String>,

    /// URL after the mutation (create, update).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_url: Option<String>,
}

impl ActivityDetails {
    /// Details for a create.
    pub fn created(key: impl Into<String>, new_url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            previous_url: None,
            new_url: Some(new_url.into()),
        }
    }

    /// Details for an update.
    pub fn updated(
        key: impl Into<String>,
        previous_url: impl Into<String>,
        new_url: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            previous_url: Some(previous_url.into()),
            new_url: Some(new_url.into()),
        }
    }

    /// Details for a delete.
    pub fn deleted(key: impl Into<String>, previous_url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            previous_url: Some(previous_url.into()),
            new_url: None,
        }
    }
}

/// One immutable audit entry describing an accepted mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Unique identifier (assigned by the log).
    pub id: ActivityId,

    /// Which mutation happened.
    pub operation: Operation,

    /// Instant of acceptance.
    pub timestamp: Timestamp,

    /// Who performed the mutation.
    pub user: String,

    /// Affected key and URL transition.
    pub details: ActivityDetails,
}

/// URL transition returned by an update, for building the audit record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlChange {
    pub previous_url: String,
    pub new_url: String,
}

/// Console statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsoleStats {
    pub mapping_count: u64,
    pub activity_count: u64,
}
