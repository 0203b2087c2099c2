//! # Catalog Crate
//!
//! This crate holds the anime catalog snapshot the recommender reads from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Anime, Genre, Studio, CatalogIndex)
//! - **parser**: Parse the JSON snapshot exported by the ingestion jobs
//! - **index**: Load, validate and search the snapshot
//! - **store**: The `CatalogStore` trait the recommender depends on
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogIndex, CatalogStore};
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_file(Path::new("data/anime.json"))?;
//!
//! let target = index.get_by_id(1).unwrap();
//! let candidates = index.all_except(target.id);
//! println!("{} has {} candidates", target.title, candidates.len());
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use store::CatalogStore;
pub use types::{
    // Type aliases
    AnimeId,
    MalId,
    // Core types
    Anime,
    Genre,
    Studio,
    CatalogIndex,
    // Enums
    AnimeType,
    Season,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_index_creation() {
        let index = CatalogIndex::new();
        assert_eq!(index.counts(), (0, 0, 0));
    }

    #[test]
    fn test_insert_anime() {
        let mut index = CatalogIndex::new();

        let anime = Anime {
            id: 1,
            mal_id: 1,
            title: "Cowboy Bebop".to_string(),
            kind: Some(AnimeType::Tv),
            year: Some(1998),
            genres: vec![Genre::new(1, "Action"), Genre::new(24, "Sci-Fi")],
            studios: vec![Studio::new(14, "Sunrise")],
            ..Default::default()
        };

        assert!(index.insert_anime(anime.clone()).is_none());

        let retrieved = index.get_anime(1).unwrap();
        assert_eq!(retrieved.id, 1);
        assert_eq!(retrieved.year, Some(1998));
        assert_eq!(retrieved.genres.len(), 2);
        assert_eq!(index.counts(), (1, 2, 1));

        // Re-inserting the same id hands back the old entry
        let replaced = index.insert_anime(anime).unwrap();
        assert_eq!(replaced.title, "Cowboy Bebop");
    }

    #[test]
    fn test_name_sets() {
        let anime = Anime {
            genres: vec![Genre::new(1, "Action"), Genre::new(1, "Action"), Genre::new(8, "Drama")],
            studios: vec![Studio::new(1, "Madhouse")],
            ..Default::default()
        };

        assert_eq!(anime.genre_names().len(), 2);
        assert!(anime.studio_names().contains("Madhouse"));
    }

    #[test]
    fn test_empty_queries() {
        let index = CatalogIndex::new();

        assert!(index.get_anime(999).is_none());
        assert!(index.all_except(999).is_empty());
        assert!(index.search_by_title("bebop").is_empty());
    }
}
