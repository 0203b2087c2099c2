//! Read-only access to a catalog snapshot.
//!
//! The recommender never talks to `CatalogIndex` directly; it receives an
//! `Arc<dyn CatalogStore>` from its caller. Whoever constructs the store
//! owns its lifecycle.

use crate::types::{Anime, AnimeId, CatalogIndex};

/// The two queries a ranking request needs from the catalog.
///
/// `Send + Sync` lets one store back many concurrent requests.
pub trait CatalogStore: Send + Sync {
    /// Look up one anime by catalog id
    fn get_by_id(&self, id: AnimeId) -> Option<&Anime>;

    /// Every entry except `id`, in ascending id order
    fn all_except(&self, id: AnimeId) -> Vec<&Anime>;
}

impl CatalogStore for CatalogIndex {
    fn get_by_id(&self, id: AnimeId) -> Option<&Anime> {
        self.get_anime(id)
    }

    fn all_except(&self, id: AnimeId) -> Vec<&Anime> {
        self.iter().filter(|anime| anime.id != id).collect()
    }
}
