//! Subscription system for live tracker updates.
//!
//! This module provides in-process subscriptions to tracker events:
//! - Item mutations (add, update, delete, nutrition edits, imports)
//! - Recomputed totals
//!
//! Subscriptions use bounded buffers; a subscriber that stops draining
//! its channel is dropped rather than blocking the tracker.
//!
//! # Example
//!
//! ```ignore
//! let handle = tracker.subscribe(SubscriptionConfig {
//!     filter: SubscriptionFilter::items(),
//!     ..Default::default()
//! });
//!
//! while let Ok(event) = handle.recv() {
//!     match event {
//!         TrackerEvent::ItemAdded { item } => println!("added {}", item.name),
//!         TrackerEvent::ItemDeleted { id } => println!("removed {id}"),
//!         _ => {}
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId, TrackerEvent,
};
