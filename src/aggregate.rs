//! Derived totals over the item sequence.
//!
//! Totals are recomputed from scratch after every mutation, never
//! incrementally, so they are always consistent with the slot contents.

use crate::types::Item;
use indexmap::IndexMap;

/// Sum of on-hand quantity across all items.
pub fn compute_stock(items: &[Item]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Cost grouped by the calendar month each item was added.
///
/// Keys are `YYYY-MM` (the first seven characters of `dateAdded`), in
/// first-occurrence order. Display layers may re-sort.
pub fn compute_monthly_totals(items: &[Item]) -> IndexMap<String, f64> {
    let mut totals = IndexMap::new();
    for item in items {
        *totals.entry(item.month_key().to_string()).or_insert(0.0) += item.cost;
    }
    totals
}

/// Snapshot of every derived value the tracker exposes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Totals {
    pub stock: u64,
    pub monthly: IndexMap<String, f64>,
}

impl Totals {
    /// Recompute both totals from the current sequence.
    pub fn compute(items: &[Item]) -> Self {
        Self {
            stock: compute_stock(items),
            monthly: compute_monthly_totals(items),
        }
    }
}
