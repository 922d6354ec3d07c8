//! Parsing of delimited import batches.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::error::{PantryError, Result};
use crate::types::ItemId;

/// One parsed import row, before ids and dates are synthesized.
///
/// `name`, `cost`, `quantity`, and `expiry` are required and typed; a row
/// where they are missing or malformed fails to parse. `id` and
/// `dateAdded` are optional and filled in by the tracker during the merge.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<ItemId>,
    pub name: String,
    pub cost: f64,
    pub quantity: u32,
    pub expiry: String,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub carbohydrates: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub sodium: Option<f64>,
}

/// A row that failed to parse and was left out of the batch.
#[derive(Clone, Debug)]
pub struct SkippedRow {
    /// 1-based data row number (the header is row 0).
    pub line: usize,
    pub reason: String,
}

impl From<SkippedRow> for PantryError {
    fn from(row: SkippedRow) -> Self {
        PantryError::ImportParse {
            line: row.line,
            message: row.reason,
        }
    }
}

/// Result of parsing an import batch.
#[derive(Clone, Debug, Default)]
pub struct ParsedBatch {
    /// Rows that parsed, in input order.
    pub records: Vec<RawRecord>,
    /// Rows that were skipped, with the reason.
    pub skipped: Vec<SkippedRow>,
}

/// Parse delimited text into an import batch.
///
/// Row failures never abort the batch: the malformed row is skipped and
/// reported, and parsing continues (numbers are decoded strictly, not
/// coerced).
pub fn parse_csv(text: &str) -> ParsedBatch {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut batch = ParsedBatch::default();
    for (idx, row) in reader.deserialize::<RawRecord>().enumerate() {
        let line = idx + 1;
        match row {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                warn!(line, error = %e, "skipping malformed import row");
                batch.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
            }
        }
    }
    batch
}

/// Read an import file to completion.
///
/// Single-shot: the caller gets the full text (or a read error) before
/// any merge starts, so a partially read file can never be imported.
pub fn read_import_file(path: impl AsRef<Path>) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_rows() {
        let text = "id,name,cost,quantity,expiry,dateAdded,servingSize,calories,fat,carbohydrates,protein,sodium\n\
                    42,Milk,3.5,2,2024-06-01,2024-05-10,1 cup,120,4.8,12,8,105\n";
        let batch = parse_csv(text);
        assert!(batch.skipped.is_empty());
        assert_eq!(batch.records.len(), 1);

        let record = &batch.records[0];
        assert_eq!(record.id, Some(ItemId(42)));
        assert_eq!(record.name, "Milk");
        assert_eq!(record.cost, 3.5);
        assert_eq!(record.quantity, 2);
        assert_eq!(record.date_added.as_deref(), Some("2024-05-10"));
        assert_eq!(record.calories, Some(120.0));
    }

    #[test]
    fn test_parse_empty_optionals() {
        let text = "id,name,cost,quantity,expiry,dateAdded,servingSize,calories,fat,carbohydrates,protein,sodium\n\
                    ,Bread,2.0,1,2024-06-15,,,,,,,\n";
        let batch = parse_csv(text);
        assert_eq!(batch.records.len(), 1);

        let record = &batch.records[0];
        assert_eq!(record.id, None);
        assert_eq!(record.date_added, None);
        assert_eq!(record.serving_size, None);
        assert_eq!(record.sodium, None);
    }

    #[test]
    fn test_parse_short_header() {
        // The nutrition columns may be absent entirely.
        let text = "name,cost,quantity,expiry\nEggs,4.25,12,2024-07-01\n";
        let batch = parse_csv(text);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].name, "Eggs");
        assert_eq!(batch.records[0].id, None);
    }

    #[test]
    fn test_malformed_row_is_skipped() {
        let text = "name,cost,quantity,expiry\n\
                    Eggs,4.25,12,2024-07-01\n\
                    Butter,abc,1,2024-07-01\n\
                    Jam,3.10,2,2024-08-01\n";
        let batch = parse_csv(text);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].line, 2);
    }

    #[test]
    fn test_skipped_row_converts_to_error() {
        let row = SkippedRow {
            line: 3,
            reason: "bad".into(),
        };
        let err: PantryError = row.into();
        assert!(matches!(err, PantryError::ImportParse { line: 3, .. }));
    }
}
