//! CatalogIndex loading, validation and lookup helpers.
//!
//! Loading is the only place the catalog is mutated. Once
//! `load_from_file` returns, the index is shared read-only (usually behind
//! an `Arc`) for the lifetime of the process.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Earliest and latest release year accepted as plausible
const YEAR_RANGE: std::ops::RangeInclusive<u16> = 1900..=2100;

impl CatalogIndex {
    /// Load a catalog snapshot from a JSON file.
    ///
    /// Steps:
    /// 1. Parse the file
    /// 2. Insert every record, rejecting duplicate ids
    /// 3. Validate field ranges
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let start = Instant::now();
        let records = parser::parse_catalog(path)?;

        let mut index = CatalogIndex::new();
        for anime in records {
            let id = anime.id;
            if index.insert_anime(anime).is_some() {
                return Err(CatalogError::DuplicateId(id));
            }
        }

        index.validate()?;

        let (anime, genres, studios) = index.counts();
        info!(
            "Loaded catalog from {}: {} anime, {} genres, {} studios in {:.2?}",
            path.display(),
            anime,
            genres,
            studios,
            start.elapsed()
        );
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Check that every entry has:
    /// - a finite score within 0.0 - 10.0 (when present)
    /// - a plausible release year (when present)
    ///
    /// Entries are checked in parallel; the reported error is the one with
    /// the lowest id, so repeated loads of the same bad file agree.
    pub fn validate(&self) -> Result<()> {
        match self
            .anime
            .par_iter()
            .find_map_first(|(_, anime)| validate_anime(anime).err())
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Case-insensitive substring search over `title` and `title_english`.
    ///
    /// Exact title matches come first, then substring matches; each group
    /// stays in id order.
    pub fn search_by_title(&self, query: &str) -> Vec<&Anime> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &Anime)> = self
            .anime
            .values()
            .filter_map(|anime| {
                let titles = std::iter::once(anime.title.as_str())
                    .chain(anime.title_english.as_deref())
                    .map(str::to_lowercase)
                    .collect::<Vec<_>>();

                if titles.iter().any(|t| *t == needle) {
                    Some((0, anime))
                } else if titles.iter().any(|t| t.contains(&needle)) {
                    Some((1, anime))
                } else {
                    None
                }
            })
            .collect();

        // Stable sort keeps id order inside each relevance group
        matches.sort_by_key(|(relevance, _)| *relevance);
        matches.into_iter().map(|(_, anime)| anime).collect()
    }
}

fn validate_anime(anime: &Anime) -> Result<()> {
    if let Some(score) = anime.score {
        if !score.is_finite() || !(0.0..=10.0).contains(&score) {
            return Err(CatalogError::InvalidValue {
                id: anime.id,
                field: "score".to_string(),
                value: score.to_string(),
            });
        }
    }

    if let Some(year) = anime.year {
        if !YEAR_RANGE.contains(&year) {
            return Err(CatalogError::InvalidValue {
                id: anime.id,
                field: "year".to_string(),
                value: year.to_string(),
            });
        }
    }

    Ok(())
}
