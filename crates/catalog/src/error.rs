//! Error types for the catalog crate.
//!
//! Loading a snapshot can fail on I/O, on malformed JSON, or on data that
//! breaks the catalog invariants. Lookups never fail: a missing anime is an
//! `Option::None`, not an error.

use crate::types::AnimeId;
use thiserror::Error;

/// Errors that can occur while loading or validating a catalog snapshot
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Snapshot file could not be found or opened
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the snapshot
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Snapshot is not valid JSON or does not match the anime schema
    ///
    /// `line` and `column` come straight from serde_json and point at the
    /// offending token.
    #[error("Parse error at line {line}, column {column} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        column: usize,
        reason: String,
    },

    /// A field holds a value outside its documented range
    #[error("Invalid value for {field} on anime {id}: {value}")]
    InvalidValue {
        id: AnimeId,
        field: String,
        value: String,
    },

    /// Two records share the same catalog id
    #[error("Duplicate anime id {0} in catalog")]
    DuplicateId(AnimeId),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
