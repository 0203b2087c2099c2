//! Errors surfaced by the recommender.

use catalog::AnimeId;
use thiserror::Error;

/// Why a recommendation request produced no result.
///
/// Per-candidate problems (missing fields, no genres, failing the quality
/// gate) never show up here; those candidates are just left out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecommendError {
    /// The target id does not resolve in the catalog
    #[error("Anime {0} not found")]
    NotFound(AnimeId),
}
