//! Event types for live console updates.

use crate::types::{ActivityRecord, Operation};
use serde::{Deserialize, Serialize};

/// Events delivered to subscribers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleEvent {
    /// A mutation was accepted. The activity record fully describes it.
    Mutation { record: ActivityRecord },

    /// Subscription was dropped.
    Dropped { reason: DropReason },
}

/// Why a subscription was dropped.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// Send buffer overflowed (slow consumer).
    BufferOverflow,
    /// Explicitly unsubscribed.
    Unsubscribed,
}

/// Filter criteria for a subscription.
#[derive(Clone, Debug, Default)]
pub struct EventFilter {
    /// Only these operations (None = all).
    pub operations: Option<Vec<Operation>>,

    /// Only mutations whose key starts with this prefix (None = all).
    pub key_prefix: Option<String>,
}

impl EventFilter {
    /// Everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to specific operations.
    pub fn operations(operations: Vec<Operation>) -> Self {
        Self {
            operations: Some(operations),
            ..Default::default()
        }
    }

    /// Restrict to keys under a prefix.
    pub fn key_prefix(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: Some(prefix.into()),
            ..Default::default()
        }
    }

    /// Whether a record passes this filter.
    pub fn matches(&self, record: &ActivityRecord) -> bool {
        if let Some(ref ops) = self.operations {
            if !ops.contains(&record.operation) {
                return false;
            }
        }
        if let Some(ref prefix) = self.key_prefix {
            if !record.details.key.starts_with(prefix.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Unique identifier for a subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Handle to a subscription.
pub struct EventSubscription {
    pub id: SubscriberId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<ConsoleEvent>,
}

impl EventSubscription {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<ConsoleEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<ConsoleEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<ConsoleEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
