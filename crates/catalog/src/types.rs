//! Core domain types for the anime catalog.
//!
//! Field names match the JSON snapshot written by the ingestion jobs, so
//! every type here derives serde both ways. Popularity signals are unsigned:
//! a negative count cannot be represented, which is one invariant the
//! loader never has to check.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================

/// Catalog-local identifier for an anime
pub type AnimeId = u32;

/// MyAnimeList identifier, unique per anime
pub type MalId = u32;

// =============================================================================
// Associated Entities
// =============================================================================

/// A genre attached to an anime.
///
/// Matching between anime is done by `name`, case-sensitive as stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl Genre {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A production studio attached to an anime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Studio {
    pub id: u32,
    pub name: String,
}

impl Studio {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// =============================================================================
// Categorical Fields
// =============================================================================

/// Media type, using the MyAnimeList vocabulary.
///
/// Values the catalog does not know about load as `Unknown` rather than
/// failing the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimeType {
    #[serde(rename = "TV")]
    Tv,
    Movie,
    #[serde(rename = "OVA")]
    Ova,
    #[serde(rename = "ONA")]
    Ona,
    Special,
    #[serde(rename = "TV Special")]
    TvSpecial,
    Music,
    #[serde(rename = "CM")]
    Cm,
    #[serde(rename = "PV")]
    Pv,
    #[serde(other)]
    Unknown,
}

impl AnimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimeType::Tv => "TV",
            AnimeType::Movie => "Movie",
            AnimeType::Ova => "OVA",
            AnimeType::Ona => "ONA",
            AnimeType::Special => "Special",
            AnimeType::TvSpecial => "TV Special",
            AnimeType::Music => "Music",
            AnimeType::Cm => "CM",
            AnimeType::Pv => "PV",
            AnimeType::Unknown => "Unknown",
        }
    }
}

/// Broadcast season of the premiere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

// =============================================================================
// Anime
// =============================================================================

/// One catalog entry.
///
/// Every popularity signal is optional: new releases usually have no `rank`
/// yet, and older ingestion runs did not always record `favorites`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Anime {
    pub id: AnimeId,
    pub mal_id: MalId,
    pub title: String,
    pub title_english: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AnimeType>,
    pub episodes: Option<u32>,
    /// Community score, 0.0 to 10.0
    pub score: Option<f64>,
    /// Score rank, lower is better
    pub rank: Option<u32>,
    /// Popularity rank by member count, lower is better
    pub popularity: Option<u32>,
    pub members: Option<u32>,
    pub favorites: Option<u32>,
    pub year: Option<u16>,
    pub season: Option<Season>,
    /// Target demographic (e.g. "Shounen", "Seinen")
    pub demographic: Option<String>,
    pub image_url: Option<String>,
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub studios: Vec<Studio>,
}

impl Anime {
    /// Set of genre names, the identity used for matching
    pub fn genre_names(&self) -> HashSet<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }

    /// Set of studio names, the identity used for matching
    pub fn studio_names(&self) -> HashSet<&str> {
        self.studios.iter().map(|s| s.name.as_str()).collect()
    }

    /// English title when one was recorded, otherwise the romanized title
    pub fn display_title(&self) -> &str {
        self.title_english.as_deref().unwrap_or(&self.title)
    }
}

// =============================================================================
// CatalogIndex - The In-Memory Snapshot
// =============================================================================

/// Holds one immutable snapshot of the catalog.
///
/// Entries are kept in a `BTreeMap` so full scans come back in ascending id
/// order, which keeps every ranking request reproducible.
#[derive(Debug)]
pub struct CatalogIndex {
    pub(crate) anime: BTreeMap<AnimeId, Anime>,
}

impl CatalogIndex {
    /// Creates a new, empty CatalogIndex
    pub fn new() -> Self {
        Self {
            anime: BTreeMap::new(),
        }
    }

    /// Get an anime by catalog id
    pub fn get_anime(&self, id: AnimeId) -> Option<&Anime> {
        self.anime.get(&id)
    }

    /// All catalog ids in ascending order
    pub fn get_all_anime_ids(&self) -> Vec<AnimeId> {
        self.anime.keys().copied().collect()
    }

    /// Iterate over every entry in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Anime> {
        self.anime.values()
    }

    /// Insert an anime, replacing any entry with the same id.
    ///
    /// Returns the replaced entry, if there was one.
    pub fn insert_anime(&mut self, anime: Anime) -> Option<Anime> {
        self.anime.insert(anime.id, anime)
    }

    /// Get counts for debugging/validation: (anime, distinct genres, distinct studios)
    pub fn counts(&self) -> (usize, usize, usize) {
        let genres: HashSet<&str> = self
            .anime
            .values()
            .flat_map(|a| a.genres.iter().map(|g| g.name.as_str()))
            .collect();
        let studios: HashSet<&str> = self
            .anime
            .values()
            .flat_map(|a| a.studios.iter().map(|s| s.name.as_str()))
            .collect();
        (self.anime.len(), genres.len(), studios.len())
    }
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}
