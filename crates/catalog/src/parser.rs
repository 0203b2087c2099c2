//! Parser for catalog snapshot files.
//!
//! The ingestion jobs export the catalog as a single JSON array:
//!
//! ```text
//! [
//!   { "id": 1, "mal_id": 5114, "title": "Fullmetal Alchemist: Brotherhood",
//!     "type": "TV", "score": 9.1, "rank": 1, "popularity": 3,
//!     "members": 3400000, "favorites": 230000, "year": 2009,
//!     "demographic": "Shounen",
//!     "genres": [{ "id": 1, "name": "Action" }],
//!     "studios": [{ "id": 4, "name": "Bones" }] },
//!   ...
//! ]
//! ```
//!
//! Optional fields may be omitted or `null`. Range checks are not done
//! here; see `CatalogIndex::validate`.

use crate::error::{CatalogError, Result};
use crate::types::Anime;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Parse a snapshot file into anime records, in file order
pub fn parse_catalog(path: &Path) -> Result<Vec<Anime>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;

    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_catalog_str(&content, &file)
}

/// Parse snapshot content that is already in memory.
///
/// `file` is only used to label parse errors.
pub fn parse_catalog_str(content: &str, file: &str) -> Result<Vec<Anime>> {
    serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
        file: file.to_string(),
        line: e.line(),
        column: e.column(),
        reason: e.to_string(),
    })
}
