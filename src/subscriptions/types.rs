//! Subscription types for live tracker updates.

use crate::types::{Item, ItemId};
use serde::{Deserialize, Serialize};

/// Configuration for a subscription.
#[derive(Clone, Debug)]
pub struct SubscriptionConfig {
    /// Max buffered events before the subscriber is dropped.
    /// Default: 256
    pub buffer_size: usize,

    /// Filter criteria.
    pub filter: SubscriptionFilter,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 256,
            filter: SubscriptionFilter::all(),
        }
    }
}

/// Filter criteria for subscriptions.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubscriptionFilter {
    /// Include per-item mutation events.
    pub include_items: bool,

    /// Include recomputed-totals events.
    pub include_totals: bool,
}

impl SubscriptionFilter {
    /// Subscribe to item mutations only.
    pub fn items() -> Self {
        Self {
            include_items: true,
            ..Default::default()
        }
    }

    /// Subscribe to totals changes only.
    pub fn totals() -> Self {
        Self {
            include_totals: true,
            ..Default::default()
        }
    }

    /// Subscribe to everything.
    pub fn all() -> Self {
        Self {
            include_items: true,
            include_totals: true,
        }
    }
}

/// Events emitted after each mutation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// A new item was appended.
    ItemAdded { item: Item },

    /// An existing item's editable fields changed.
    ItemUpdated { item: Item },

    /// An item's nutrition facts changed.
    NutritionUpdated { item: Item },

    /// An item was removed.
    ItemDeleted { id: ItemId },

    /// A batch of imported items was appended.
    ItemsImported { count: usize },

    /// Derived totals were recomputed.
    TotalsChanged { total_stock: u64 },
}

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Handle to manage a subscription.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    /// Channel to receive events.
    pub receiver: crossbeam_channel::Receiver<TrackerEvent>,
}

impl SubscriptionHandle {
    /// Receive the next event (blocking).
    pub fn recv(&self) -> Result<TrackerEvent, crossbeam_channel::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event (non-blocking).
    pub fn try_recv(&self) -> Result<TrackerEvent, crossbeam_channel::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Receive with timeout.
    pub fn recv_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<TrackerEvent, crossbeam_channel::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
