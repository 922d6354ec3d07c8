//! The tracker: application state plus the mutation API.
//!
//! A `Tracker` owns the loaded item sequence, the derived totals, and the
//! persistence slot. Every mutation follows the same discipline: validate,
//! compute the new sequence, persist the whole slot, recompute totals,
//! notify subscribers. Unknown-id updates and deletes are no-ops that
//! leave the slot untouched.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::aggregate::Totals;
use crate::error::{PantryError, Result};
use crate::exchange::{self, RawRecord, SkippedRow};
use crate::store::{ItemStore, StoreConfig};
use crate::subscriptions::{
    SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager, TrackerEvent,
};
use crate::types::{today, Item, ItemDraft, ItemId, NutritionUpdate};

/// Result of importing a delimited batch.
#[derive(Clone, Debug)]
pub struct ImportOutcome {
    /// Items appended to the sequence, in input order.
    pub imported: Vec<Item>,

    /// Rows that failed to parse and were skipped.
    pub skipped: Vec<SkippedRow>,
}

/// The top-level tracker state.
///
/// Owns the store exclusively; there are no ambient globals, and all
/// mutation goes through this value.
pub struct Tracker {
    store: ItemStore,
    items: Vec<Item>,
    totals: Totals,
    subscriptions: SubscriptionManager,

    /// Highest id issued or observed so far. Ids are clock-derived but
    /// forced strictly monotonic, even within one millisecond.
    last_id: u64,
}

impl Tracker {
    /// Open a tracker over the given store, loading any persisted items.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let store = ItemStore::open_or_create(config)?;
        let items = store.load()?;
        let totals = Totals::compute(&items);
        let last_id = items.iter().map(|item| item.id.0).max().unwrap_or(0);
        debug!(count = items.len(), "tracker opened");
        Ok(Self {
            store,
            items,
            totals,
            subscriptions: SubscriptionManager::new(),
            last_id,
        })
    }

    // --- Read side ---

    /// Current item sequence, in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Look up one item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Look up one item by id, surfacing the failure.
    ///
    /// The detail view uses this form: it has an id in hand, so a missing
    /// item is a real error rather than a no-op.
    pub fn require(&self, id: ItemId) -> Result<&Item> {
        self.get(id).ok_or(PantryError::ItemNotFound(id))
    }

    /// Sum of quantity over all items.
    pub fn total_stock(&self) -> u64 {
        self.totals.stock
    }

    /// Cost per calendar month of `dateAdded`, in first-occurrence order.
    pub fn monthly_totals(&self) -> &IndexMap<String, f64> {
        &self.totals.monthly
    }

    // --- Mutation API ---

    /// Validate and append a new item.
    ///
    /// Assigns a fresh id and today's `dateAdded`. A validation failure
    /// returns before anything is persisted.
    pub fn add(&mut self, draft: &ItemDraft) -> Result<Item> {
        let fields = draft.validate()?;
        let item = Item::from_draft(self.next_id(), fields, today());

        let mut next = self.items.clone();
        next.push(item.clone());
        self.commit(next)?;

        debug!(id = %item.id, name = %item.name, "item added");
        self.subscriptions.publish(&TrackerEvent::ItemAdded {
            item: item.clone(),
        });
        self.publish_totals();
        Ok(item)
    }

    /// Overlay the editable fields onto the item with the given id,
    /// preserving `id` and `dateAdded`.
    ///
    /// An unknown id returns `Ok(None)` and persists nothing.
    pub fn update(&mut self, id: ItemId, draft: &ItemDraft) -> Result<Option<Item>> {
        let fields = draft.validate()?;
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            debug!(%id, "update for unknown id ignored");
            return Ok(None);
        };

        let mut next = self.items.clone();
        {
            let item = &mut next[pos];
            item.name = fields.name;
            item.cost = fields.cost;
            item.quantity = fields.quantity;
            item.expiry = fields.expiry;
        }
        let updated = next[pos].clone();
        self.commit(next)?;

        debug!(%id, "item updated");
        self.subscriptions.publish(&TrackerEvent::ItemUpdated {
            item: updated.clone(),
        });
        self.publish_totals();
        Ok(Some(updated))
    }

    /// Remove the item with the given id.
    ///
    /// Returns whether an item was removed; an unknown id is a no-op.
    pub fn delete(&mut self, id: ItemId) -> Result<bool> {
        if !self.items.iter().any(|item| item.id == id) {
            debug!(%id, "delete for unknown id ignored");
            return Ok(false);
        }

        let next: Vec<Item> = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        debug!(%id, "item deleted");
        self.subscriptions.publish(&TrackerEvent::ItemDeleted { id });
        self.publish_totals();
        Ok(true)
    }

    /// Replace the nutrition fields of the item with the given id; every
    /// other field is untouched.
    ///
    /// An unknown id returns `Ok(None)` and persists nothing.
    pub fn update_nutrition(
        &mut self,
        id: ItemId,
        update: &NutritionUpdate,
    ) -> Result<Option<Item>> {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            debug!(%id, "nutrition update for unknown id ignored");
            return Ok(None);
        };

        let mut next = self.items.clone();
        next[pos].set_nutrition(update.clone());
        let updated = next[pos].clone();
        self.commit(next)?;

        debug!(%id, "nutrition updated");
        self.subscriptions.publish(&TrackerEvent::NutritionUpdated {
            item: updated.clone(),
        });
        Ok(Some(updated))
    }

    /// Append a batch of raw records.
    ///
    /// Missing ids and dates are synthesized; an id that collides with an
    /// existing item (or an earlier row) is reassigned so ids stay unique.
    /// The whole batch persists once and totals recompute once.
    pub fn import_merge(&mut self, records: Vec<RawRecord>) -> Result<Vec<Item>> {
        let mut seen: HashSet<u64> = self.items.iter().map(|item| item.id.0).collect();
        let mut appended = Vec::with_capacity(records.len());

        for record in records {
            let id = match record.id {
                Some(id) if !seen.contains(&id.0) => id,
                Some(id) => {
                    let fresh = self.next_id();
                    warn!(incoming = %id, assigned = %fresh, "import id collision, reassigning");
                    fresh
                }
                None => self.next_id(),
            };
            seen.insert(id.0);

            appended.push(Item {
                id,
                name: record.name,
                cost: record.cost,
                quantity: record.quantity,
                expiry: record.expiry,
                date_added: record.date_added.unwrap_or_else(today),
                serving_size: record.serving_size,
                calories: record.calories,
                fat: record.fat,
                carbohydrates: record.carbohydrates,
                protein: record.protein,
                sodium: record.sodium,
            });
        }

        let mut next = self.items.clone();
        next.extend(appended.iter().cloned());
        self.commit(next)?;

        debug!(count = appended.len(), "import merged");
        self.subscriptions.publish(&TrackerEvent::ItemsImported {
            count: appended.len(),
        });
        self.publish_totals();
        Ok(appended)
    }

    /// Parse delimited text and merge the surviving rows.
    ///
    /// Malformed rows are skipped and reported in the outcome.
    pub fn import_csv_text(&mut self, text: &str) -> Result<ImportOutcome> {
        let batch = exchange::parse_csv(text);
        let imported = self.import_merge(batch.records)?;
        Ok(ImportOutcome {
            imported,
            skipped: batch.skipped,
        })
    }

    /// Read a delimited file to completion, then merge it.
    ///
    /// The read is single-shot: the full text is in hand before the merge
    /// starts, so a partially read file can never be imported.
    pub fn import_csv_file(&mut self, path: impl AsRef<Path>) -> Result<ImportOutcome> {
        let text = exchange::read_import_file(path)?;
        self.import_csv_text(&text)
    }

    /// Render the current sequence as delimited text.
    pub fn export_csv(&self) -> Result<String> {
        exchange::export_csv(&self.items)
    }

    /// Export the current sequence to a file.
    pub fn export_csv_file(&self, path: impl AsRef<Path>) -> Result<()> {
        exchange::write_csv_file(&self.items, path)
    }

    // --- Subscriptions ---

    /// Subscribe to mutation and totals events.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    /// Remove a subscription.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id)
    }

    // --- Internals ---

    /// Persist the new sequence, then adopt it and recompute totals.
    ///
    /// On a persistence failure the in-memory state is unchanged, so the
    /// tracker and the slot never diverge.
    fn commit(&mut self, next: Vec<Item>) -> Result<()> {
        self.store.save_all(&next)?;
        self.items = next;
        self.totals = Totals::compute(&self.items);
        Ok(())
    }

    fn publish_totals(&self) {
        self.subscriptions.publish(&TrackerEvent::TotalsChanged {
            total_stock: self.totals.stock,
        });
    }

    fn next_id(&mut self) -> ItemId {
        self.last_id = ItemId::from_clock().0.max(self.last_id + 1);
        ItemId(self.last_id)
    }
}
