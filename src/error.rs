//! Error types for the tracker.

use crate::types::ItemId;
use thiserror::Error;

/// Main error type for tracker operations.
#[derive(Debug, Error)]
pub enum PantryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required field missing: {0}")]
    MissingField(&'static str),

    #[error("Field {field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Field {field} is not a valid date: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("Import row {line} failed to parse: {message}")]
    ImportParse { line: usize, message: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Store is locked by another process")]
    Locked,

    #[error("Store not initialized")]
    NotInitialized,
}

impl From<serde_json::Error> for PantryError {
    fn from(e: serde_json::Error) -> Self {
        PantryError::Serialization(e.to_string())
    }
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, PantryError>;
