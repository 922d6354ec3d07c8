//! Core types for the grocery tracker.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PantryError, Result};

/// Unique identifier for an item.
///
/// Ids are derived from the wall clock in milliseconds; the tracker forces
/// them strictly monotonic so rapid additions never collide.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl ItemId {
    /// Milliseconds since the Unix epoch, the raw clock value ids start from.
    pub fn from_clock() -> Self {
        ItemId(Local::now().timestamp_millis() as u64)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Today's date in the `YYYY-MM-DD` form used throughout the store.
pub fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// One grocery inventory record.
///
/// Serialized field names match the persisted slot layout exactly
/// (`dateAdded`, `servingSize`, ...); absent nutrition fields are omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier (assigned by the tracker).
    pub id: ItemId,

    /// Item name.
    pub name: String,

    /// Purchase cost.
    pub cost: f64,

    /// On-hand quantity.
    pub quantity: u32,

    /// Expiry date (`YYYY-MM-DD`).
    pub expiry: String,

    /// Date the item entered the store (`YYYY-MM-DD`). Immutable after
    /// creation.
    pub date_added: String,

    // Nutrition facts, edited independently through the detail view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
}

impl Item {
    /// Build an item from a validated draft.
    pub fn from_draft(id: ItemId, fields: DraftFields, date_added: String) -> Self {
        Self {
            id,
            name: fields.name,
            cost: fields.cost,
            quantity: fields.quantity,
            expiry: fields.expiry,
            date_added,
            serving_size: None,
            calories: None,
            fat: None,
            carbohydrates: None,
            protein: None,
            sodium: None,
        }
    }

    /// The `YYYY-MM` grouping key, the first seven characters of `dateAdded`.
    pub fn month_key(&self) -> &str {
        self.date_added.get(..7).unwrap_or(&self.date_added)
    }

    /// Replace the nutrition fields from a detail-view submission.
    ///
    /// The detail view posts its complete form state, so a `None` clears
    /// the corresponding field.
    pub fn set_nutrition(&mut self, update: NutritionUpdate) {
        self.serving_size = update.serving_size;
        self.calories = update.calories;
        self.fat = update.fat;
        self.carbohydrates = update.carbohydrates;
        self.protein = update.protein;
        self.sodium = update.sodium;
    }
}

/// Raw form input for creating or editing an item, before validation.
#[derive(Clone, Debug, Default)]
pub struct ItemDraft {
    pub name: String,
    pub cost: String,
    pub quantity: String,
    pub expiry: String,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        cost: impl Into<String>,
        quantity: impl Into<String>,
        expiry: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            cost: cost.into(),
            quantity: quantity.into(),
            expiry: expiry.into(),
        }
    }

    /// Validate the draft into typed fields.
    ///
    /// All four fields must be present, cost and quantity must parse as
    /// non-negative numbers, and expiry must be a `YYYY-MM-DD` date.
    /// Validation never touches the store.
    pub fn validate(&self) -> Result<DraftFields> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PantryError::MissingField("name"));
        }
        if self.cost.trim().is_empty() {
            return Err(PantryError::MissingField("cost"));
        }
        if self.quantity.trim().is_empty() {
            return Err(PantryError::MissingField("quantity"));
        }
        if self.expiry.trim().is_empty() {
            return Err(PantryError::MissingField("expiry"));
        }

        let cost: f64 = self.cost.trim().parse().map_err(|_| PantryError::InvalidNumber {
            field: "cost",
            value: self.cost.clone(),
        })?;
        if !cost.is_finite() || cost < 0.0 {
            return Err(PantryError::InvalidNumber {
                field: "cost",
                value: self.cost.clone(),
            });
        }

        let quantity: u32 =
            self.quantity.trim().parse().map_err(|_| PantryError::InvalidNumber {
                field: "quantity",
                value: self.quantity.clone(),
            })?;

        let expiry = self.expiry.trim();
        if NaiveDate::parse_from_str(expiry, "%Y-%m-%d").is_err() {
            return Err(PantryError::InvalidDate {
                field: "expiry",
                value: self.expiry.clone(),
            });
        }

        Ok(DraftFields {
            name: name.to_string(),
            cost,
            quantity,
            expiry: expiry.to_string(),
        })
    }
}

/// A draft that passed validation.
#[derive(Clone, Debug)]
pub struct DraftFields {
    pub name: String,
    pub cost: f64,
    pub quantity: u32,
    pub expiry: String,
}

/// Nutrition fields submitted by the detail view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionUpdate {
    pub serving_size: Option<String>,
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub protein: Option<f64>,
    pub sodium: Option<f64>,
}
