//! Delimited import/export for the item sequence.
//!
//! The exchange format is comma-separated text with a header row naming
//! the item fields:
//!
//! ```text
//! id,name,cost,quantity,expiry,dateAdded,servingSize,calories,fat,carbohydrates,protein,sodium
//! ```
//!
//! Export always writes the full field set, rendering absent nutrition
//! fields as empty. Import accepts rows without `id`/`dateAdded` (the
//! tracker synthesizes them) and skips rows that fail to parse.

mod export;
mod import;

pub use export::{export_csv, write_csv_file};
pub use import::{parse_csv, read_import_file, ParsedBatch, RawRecord, SkippedRow};
