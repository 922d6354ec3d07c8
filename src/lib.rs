//! # Pantry
//!
//! A file-backed grocery inventory tracker: one JSON slot of items, a
//! read-modify-write mutation API, and derived spend/stock totals.
//!
//! ## Core Concepts
//!
//! - **Items**: grocery records with identity, cost, quantity, dates, and
//!   optional nutrition facts
//! - **Slot**: the whole sequence persists as a single JSON array,
//!   replaced wholesale on every mutation
//! - **Totals**: monthly spend and total stock, recomputed from scratch
//!   after each mutation
//! - **Exchange**: delimited import/export with synthesized ids and dates
//!
//! ## Example
//!
//! ```ignore
//! use pantry::{ItemDraft, StoreConfig, Tracker};
//!
//! let mut tracker = Tracker::open(StoreConfig {
//!     path: "./pantry".into(),
//!     ..Default::default()
//! })?;
//!
//! // Add an item; the id and dateAdded are assigned on the way in.
//! let milk = tracker.add(&ItemDraft::new("Milk", "3.50", "2", "2024-06-01"))?;
//!
//! assert_eq!(tracker.total_stock(), 2);
//! let csv = tracker.export_csv()?;
//! ```

pub mod aggregate;
pub mod error;
pub mod exchange;
pub mod store;
pub mod subscriptions;
pub mod tracker;
pub mod types;

// Re-exports
pub use aggregate::{compute_monthly_totals, compute_stock, Totals};
pub use error::{PantryError, Result};
pub use exchange::{export_csv, parse_csv, ParsedBatch, RawRecord, SkippedRow};
pub use store::{ItemStore, StoreConfig};
pub use subscriptions::{
    SubscriptionConfig, SubscriptionFilter, SubscriptionHandle, SubscriptionId,
    SubscriptionManager, TrackerEvent,
};
pub use tracker::{ImportOutcome, Tracker};
pub use types::{today, DraftFields, Item, ItemDraft, ItemId, NutritionUpdate};
