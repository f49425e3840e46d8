//! Event bus broadcasting mutation events to subscribers.

use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{ConsoleEvent, DropReason, EventFilter, EventSubscription, SubscriberId};
use crate::types::ActivityRecord;

/// Default buffered events per subscriber.
const DEFAULT_BUFFER_SIZE: usize = 1000;

/// Internal subscriber state.
struct Subscriber {
    filter: EventFilter,
    sender: Sender<ConsoleEvent>,
}

impl Subscriber {
    /// Try to send an event. Returns false if the buffer is full or the
    /// receiver is gone (subscriber will be dropped).
    fn try_send(&self, event: ConsoleEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(crossbeam_channel::TrySendError::Full(_)) => false,
            Err(crossbeam_channel::TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Manages subscribers and broadcasts mutation events.
pub struct EventBus {
    /// Active subscribers by ID.
    subscribers: RwLock<HashMap<SubscriberId, Subscriber>>,
    /// Counter for generating subscriber IDs.
    next_id: AtomicU64,
    /// Buffered events per subscriber.
    buffer_size: usize,
}

impl EventBus {
    /// Create a bus with the default per-subscriber buffer.
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Create a bus with a custom per-subscriber buffer.
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Register a subscriber and return a handle for receiving events.
    pub fn subscribe(&self, filter: EventFilter) -> EventSubscription {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(self.buffer_size);

        self.subscribers
            .write()
            .insert(id, Subscriber { filter, sender });

        EventSubscription { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut subs = self.subscribers.write();
        if let Some(sub) = subs.remove(&id) {
            // Drop notice is best effort.
            let _ = sub.sender.try_send(ConsoleEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Broadcast an accepted mutation to matching subscribers.
    ///
    /// Subscribers whose buffer is full are dropped rather than blocking
    /// the mutating caller.
    pub fn broadcast(&self, record: &ActivityRecord) {
        let event = ConsoleEvent::Mutation {
            record: record.clone(),
        };

        let mut to_remove = Vec::new();

        {
            let subs = self.subscribers.read();
            for (id, sub) in subs.iter() {
                if sub.filter.matches(record) && !sub.try_send(event.clone()) {
                    to_remove.push(*id);
                }
            }
        }

        if !to_remove.is_empty() {
            let mut subs = self.subscribers.write();
            for id in to_remove {
                if let Some(sub) = subs.remove(&id) {
                    let _ = sub.sender.try_send(ConsoleEvent::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                }
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityDetails, ActivityId, Operation, Timestamp};
    use std::time::Duration;

    fn record(operation: Operation, key: &str) -> ActivityRecord {
        ActivityRecord {
            id: ActivityId(1),
            operation,
            timestamp: Timestamp::now(),
            user: "Admin".to_string(),
            details: ActivityDetails::created(key, "https://a.example"),
        }
    }

    #[test]
    fn test_subscribe_unsubscribe() {
        let bus = EventBus::new();

        let handle = bus.subscribe(EventFilter::all());
        assert_eq!(bus.subscriber_count(), 1);

        bus.unsubscribe(handle.id);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_broadcast_to_matching_filter() {
        let bus = EventBus::new();
        let handle = bus.subscribe(EventFilter::operations(vec![Operation::Delete]));

        bus.broadcast(&record(Operation::Create, "swe"));
        bus.broadcast(&record(Operation::Delete, "swe"));

        let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        match event {
            ConsoleEvent::Mutation { record } => {
                assert_eq!(record.operation, Operation::Delete);
            }
            other => panic!("expected Mutation event, got {:?}", other),
        }

        // The create was filtered out; nothing else queued.
        assert!(handle.try_recv().is_err());
    }

    #[test]
    fn test_key_prefix_filter() {
        let bus = EventBus::new();
        let handle = bus.subscribe(EventFilter::key_prefix("team-"));

        bus.broadcast(&record(Operation::Create, "other"));
        bus.broadcast(&record(Operation::Create, "team-swe"));

        let event = handle.recv_timeout(Duration::from_millis(100)).unwrap();
        match event {
            ConsoleEvent::Mutation { record } => {
                assert_eq!(record.details.key, "team-swe");
            }
            other => panic!("expected Mutation event, got {:?}", other),
        }
    }

    #[test]
    fn test_drop_slow_subscriber() {
        let bus = EventBus::with_buffer_size(2);
        let _handle = bus.subscribe(EventFilter::all());

        for _ in 0..10 {
            bus.broadcast(&record(Operation::Create, "swe"));
        }

        assert_eq!(bus.subscriber_count(), 0);
    }
}
