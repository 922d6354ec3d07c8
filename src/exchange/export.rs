//! Export of the item sequence to delimited text.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{PantryError, Result};
use crate::types::{Item, ItemId};

/// Header row, written even for an empty sequence.
const HEADER: [&str; 12] = [
    "id",
    "name",
    "cost",
    "quantity",
    "expiry",
    "dateAdded",
    "servingSize",
    "calories",
    "fat",
    "carbohydrates",
    "protein",
    "sodium",
];

/// Row shape for export: the full field set, absent optionals as empty.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    id: ItemId,
    name: &'a str,
    cost: f64,
    quantity: u32,
    expiry: &'a str,
    date_added: &'a str,
    serving_size: Option<&'a str>,
    calories: Option<f64>,
    fat: Option<f64>,
    carbohydrates: Option<f64>,
    protein: Option<f64>,
    sodium: Option<f64>,
}

impl<'a> From<&'a Item> for CsvRow<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: item.id,
            name: &item.name,
            cost: item.cost,
            quantity: item.quantity,
            expiry: &item.expiry,
            date_added: &item.date_added,
            serving_size: item.serving_size.as_deref(),
            calories: item.calories,
            fat: item.fat,
            carbohydrates: item.carbohydrates,
            protein: item.protein,
            sodium: item.sodium,
        }
    }
}

/// Render the full sequence as delimited text with a header row.
pub fn export_csv(items: &[Item]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(HEADER)
        .map_err(|e| PantryError::Serialization(e.to_string()))?;
    for item in items {
        writer
            .serialize(CsvRow::from(item))
            .map_err(|e| PantryError::Serialization(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PantryError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PantryError::Serialization(e.to_string()))
}

/// Write the exported text to a file.
pub fn write_csv_file(items: &[Item], path: impl AsRef<Path>) -> Result<()> {
    fs::write(path, export_csv(items)?)?;
    Ok(())
}
