//! Store error types

use thiserror::Error;

/// Errors that can occur during storage operations
///
/// Missing rows are not errors: lookups return `Option` and deletes return
/// whether anything was removed.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error (constraint violation, I/O, corruption)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A relationship was edited before it had an id
    #[error("Relationship has no id; add it before editing")]
    MissingId,

    /// Record holds data that cannot be written
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
