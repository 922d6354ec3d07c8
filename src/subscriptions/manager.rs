//! Subscription manager for broadcasting tracker events.

use crossbeam_channel::{bounded, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{SubscriptionConfig, SubscriptionHandle, SubscriptionId, TrackerEvent};

/// Internal subscription state.
struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<TrackerEvent>,
}

impl Subscription {
    /// Try to send an event. Returns false if the buffer is full or the
    /// receiver is gone (the subscriber will be dropped).
    fn try_send(&self, event: TrackerEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }

    fn matches(&self, event: &TrackerEvent) -> bool {
        match event {
            TrackerEvent::TotalsChanged { .. } => self.config.filter.include_totals,
            _ => self.config.filter.include_items,
        }
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    /// Active subscriptions by ID.
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl SubscriptionManager {
    /// Create a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new subscription.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size);

        self.subscriptions
            .write()
            .insert(id, Subscription { config, sender });

        SubscriptionHandle { id, receiver }
    }

    /// Remove a subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.write().remove(&id);
    }

    /// Number of active subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Broadcast an event to matching subscribers.
    ///
    /// Subscribers whose buffer has overflowed (or whose receiver was
    /// dropped) are removed.
    pub fn publish(&self, event: &TrackerEvent) {
        let mut dead = Vec::new();
        {
            let subscriptions = self.subscriptions.read();
            for (id, subscription) in subscriptions.iter() {
                if subscription.matches(event) && !subscription.try_send(event.clone()) {
                    dead.push(*id);
                }
            }
        }

        if !dead.is_empty() {
            let mut subscriptions = self.subscriptions.write();
            for id in dead {
                subscriptions.remove(&id);
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::SubscriptionFilter;
    use crate::types::ItemId;

    #[test]
    fn test_filtered_delivery() {
        let manager = SubscriptionManager::new();
        let totals_only = manager.subscribe(SubscriptionConfig {
            filter: SubscriptionFilter::totals(),
            ..Default::default()
        });

        manager.publish(&TrackerEvent::ItemDeleted { id: ItemId(1) });
        manager.publish(&TrackerEvent::TotalsChanged { total_stock: 5 });

        assert!(matches!(
            totals_only.try_recv(),
            Ok(TrackerEvent::TotalsChanged { total_stock: 5 })
        ));
        assert!(totals_only.try_recv().is_err());
    }

    #[test]
    fn test_overflowed_subscriber_is_dropped() {
        let manager = SubscriptionManager::new();
        let _handle = manager.subscribe(SubscriptionConfig {
            buffer_size: 1,
            filter: SubscriptionFilter::all(),
        });

        manager.publish(&TrackerEvent::ItemDeleted { id: ItemId(1) });
        assert_eq!(manager.subscriber_count(), 1);

        // Second event overflows the buffer of one.
        manager.publish(&TrackerEvent::ItemDeleted { id: ItemId(2) });
        assert_eq!(manager.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let manager = SubscriptionManager::new();
        let handle = manager.subscribe(SubscriptionConfig::default());
        manager.unsubscribe(handle.id);
        assert_eq!(manager.subscriber_count(), 0);
    }
}
