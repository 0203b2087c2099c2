//! # Recommendation Ranker
//!
//! This module runs one recommendation request end to end:
//! 1. Look up the target anime
//! 2. Enumerate every other catalog entry
//! 3. Apply the filter pipeline (quality gate)
//! 4. Score the survivors against the target
//! 5. Sort by total similarity, highest first
//! 6. Return the top N
//!
//! The ranker holds no per-request state. The catalog store is injected by
//! the caller and only read, so one ranker can serve concurrent requests.

use std::cmp::Ordering;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument};

use catalog::{Anime, AnimeId, AnimeType, CatalogStore, MalId};
use pipeline::filters::QualityGateFilter;
use pipeline::{FilterPipeline, Similarity, SimilarityScorer};

use crate::error::RecommendError;

/// The fields of an anime shown alongside a recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimeSummary {
    pub id: AnimeId,
    pub mal_id: MalId,
    pub title: String,
    pub title_english: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AnimeType>,
    pub score: Option<f64>,
    pub year: Option<u16>,
    pub image_url: Option<String>,
    pub genres: Vec<String>,
}

impl From<&Anime> for AnimeSummary {
    fn from(anime: &Anime) -> Self {
        Self {
            id: anime.id,
            mal_id: anime.mal_id,
            title: anime.title.clone(),
            title_english: anime.title_english.clone(),
            kind: anime.kind,
            score: anime.score,
            year: anime.year,
            image_url: anime.image_url.clone(),
            genres: anime.genres.iter().map(|g| g.name.clone()).collect(),
        }
    }
}

/// One ranked candidate with its similarity breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationItem {
    pub anime: AnimeSummary,
    #[serde(flatten)]
    pub similarity: Similarity,
}

/// Result of a recommendation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub target: AnimeSummary,
    /// Best match first
    pub items: Vec<RecommendationItem>,
}

/// Ranks the catalog against a target anime
#[derive(Clone)]
pub struct RecommendationRanker {
    store: Arc<dyn CatalogStore>,
    filter_pipeline: Arc<FilterPipeline>,
    scorer: SimilarityScorer,
}

impl RecommendationRanker {
    /// Create a ranker over `store` with the default quality gate
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        let filter_pipeline = FilterPipeline::new().add_filter(QualityGateFilter::new());
        Self {
            store,
            filter_pipeline: Arc::new(filter_pipeline),
            scorer: SimilarityScorer::new(),
        }
    }

    /// Replace the candidate filters (builder pattern)
    pub fn with_filter_pipeline(mut self, filter_pipeline: FilterPipeline) -> Self {
        self.filter_pipeline = Arc::new(filter_pipeline);
        self
    }

    /// Main entry point: recommend up to `limit` anime similar to `target_id`
    ///
    /// # Returns
    /// The target and its ranked candidates, or `RecommendError::NotFound`
    /// when `target_id` is not in the catalog.
    ///
    /// Candidates with equal total similarity are ordered by id ascending,
    /// so identical inputs always produce identical output.
    #[instrument(skip(self))]
    pub fn get_recommendations(
        &self,
        target_id: AnimeId,
        limit: NonZeroUsize,
    ) -> Result<Recommendations, RecommendError> {
        let start_time = Instant::now();

        let target = self
            .store
            .get_by_id(target_id)
            .ok_or(RecommendError::NotFound(target_id))?;

        let candidates = self.store.all_except(target_id);
        debug!("Enumerated {} candidates", candidates.len());

        let eligible = self.filter_pipeline.apply(candidates, target);
        debug!("{} candidates passed the filters", eligible.len());

        let scored = self.score_candidates(target, eligible);
        debug!("Scored {} candidates", scored.len());

        let items = self.rank_and_select(scored, limit);

        info!(
            "Selected {} recommendations for anime {} in {:.2?}",
            items.len(),
            target_id,
            start_time.elapsed()
        );

        Ok(Recommendations {
            target: AnimeSummary::from(target),
            items,
        })
    }

    /// Score every candidate, dropping the ones the scorer skips
    fn score_candidates<'a>(
        &self,
        target: &Anime,
        candidates: Vec<&'a Anime>,
    ) -> Vec<(&'a Anime, Similarity)> {
        candidates
            .into_iter()
            .filter_map(|candidate| {
                self.scorer
                    .score(target, candidate)
                    .scored()
                    .map(|similarity| (candidate, similarity))
            })
            .collect()
    }

    /// Sort by total similarity DESC, then id ASC, and keep the top `limit`
    fn rank_and_select(
        &self,
        mut scored: Vec<(&Anime, Similarity)>,
        limit: NonZeroUsize,
    ) -> Vec<RecommendationItem> {
        scored.sort_by(|a, b| compare_ranked(a, b));
        scored.truncate(limit.get());

        scored
            .into_iter()
            .map(|(anime, similarity)| RecommendationItem {
                anime: AnimeSummary::from(anime),
                similarity,
            })
            .collect()
    }
}

fn compare_ranked(a: &(&Anime, Similarity), b: &(&Anime, Similarity)) -> Ordering {
    b.1.total_similarity
        .total_cmp(&a.1.total_similarity)
        .then_with(|| a.0.id.cmp(&b.0.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogIndex, Genre, Studio};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn genres(names: &[&str]) -> Vec<Genre> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Genre::new(i as u32 + 1, *name))
            .collect()
    }

    /// A well-known candidate that passes the quality gate
    fn popular(id: AnimeId, genre_names: &[&str], score: f64, year: u16) -> Anime {
        Anime {
            id,
            mal_id: id + 10_000,
            title: format!("Anime {}", id),
            kind: Some(AnimeType::Tv),
            score: Some(score),
            rank: Some(id * 10),
            popularity: Some(id * 100),
            members: Some(250_000),
            favorites: Some(1500),
            year: Some(year),
            genres: genres(genre_names),
            ..Default::default()
        }
    }

    fn build_test_store() -> Arc<dyn CatalogStore> {
        let mut index = CatalogIndex::new();

        // Target
        index.insert_anime(Anime {
            studios: vec![Studio::new(1, "Madhouse")],
            demographic: Some("Seinen".to_string()),
            ..popular(1, &["Mystery", "Psychological", "Suspense"], 8.8, 2004)
        });

        // Close match: same genres, studio and demographic
        index.insert_anime(Anime {
            studios: vec![Studio::new(1, "Madhouse")],
            demographic: Some("Seinen".to_string()),
            ..popular(2, &["Mystery", "Psychological", "Suspense"], 8.6, 2006)
        });
        // Partial genre overlap
        index.insert_anime(popular(3, &["Mystery", "Comedy"], 7.9, 2012));
        // No genre overlap
        index.insert_anime(popular(4, &["Sports"], 8.0, 2004));
        // Would match perfectly but fails the quality gate
        index.insert_anime(Anime {
            rank: None,
            popularity: Some(15_000),
            members: Some(1200),
            favorites: Some(3),
            ..popular(5, &["Mystery", "Psychological", "Suspense"], 8.8, 2004)
        });
        // Popular but without genres
        index.insert_anime(Anime {
            genres: Vec::new(),
            ..popular(6, &[], 8.8, 2004)
        });

        Arc::new(index)
    }

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn ids(recommendations: &Recommendations) -> Vec<AnimeId> {
        recommendations.items.iter().map(|item| item.anime.id).collect()
    }

    // ============================================================================
    // get_recommendations
    // ============================================================================

    #[test]
    fn test_unknown_target_is_not_found() {
        let ranker = RecommendationRanker::new(build_test_store());
        let result = ranker.get_recommendations(999, limit(10));
        assert_eq!(result, Err(RecommendError::NotFound(999)));
    }

    #[test]
    fn test_ranks_by_similarity() {
        let ranker = RecommendationRanker::new(build_test_store());
        let recommendations = ranker.get_recommendations(1, limit(10)).unwrap();

        assert_eq!(recommendations.target.id, 1);
        // 5 fails the gate, 6 has no genres, 1 is the target
        assert_eq!(ids(&recommendations), vec![2, 3, 4]);

        let totals: Vec<f64> = recommendations
            .items
            .iter()
            .map(|item| item.similarity.total_similarity)
            .collect();
        assert!(totals.windows(2).all(|w| w[0] >= w[1]), "{:?}", totals);
    }

    #[test]
    fn test_limit_truncates() {
        let ranker = RecommendationRanker::new(build_test_store());

        let recommendations = ranker.get_recommendations(1, limit(2)).unwrap();
        assert_eq!(ids(&recommendations), vec![2, 3]);

        let recommendations = ranker.get_recommendations(1, limit(1)).unwrap();
        assert_eq!(recommendations.items.len(), 1);
    }

    #[test]
    fn test_ties_break_by_id() {
        let mut index = CatalogIndex::new();
        index.insert_anime(popular(1, &["Romance"], 7.0, 2015));
        // Identical apart from id; inserted out of order on purpose
        index.insert_anime(Anime {
            popularity: Some(400),
            ..popular(9, &["Romance"], 7.0, 2015)
        });
        index.insert_anime(Anime {
            popularity: Some(400),
            ..popular(4, &["Romance"], 7.0, 2015)
        });

        let ranker = RecommendationRanker::new(Arc::new(index));
        let recommendations = ranker.get_recommendations(1, limit(5)).unwrap();

        assert_eq!(ids(&recommendations), vec![4, 9]);
        assert_eq!(
            recommendations.items[0].similarity.total_similarity,
            recommendations.items[1].similarity.total_similarity
        );
    }

    #[test]
    fn test_repeated_requests_are_identical() {
        let ranker = RecommendationRanker::new(build_test_store());
        let first = ranker.get_recommendations(1, limit(10)).unwrap();
        let second = ranker.clone().get_recommendations(1, limit(10)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_filter_pipeline() {
        // Without the gate the obscure perfect match comes back
        let ranker = RecommendationRanker::new(build_test_store())
            .with_filter_pipeline(FilterPipeline::new());
        let recommendations = ranker.get_recommendations(1, limit(10)).unwrap();

        assert!(ids(&recommendations).contains(&5));
        // Genre-less anime is still skipped by the scorer
        assert!(!ids(&recommendations).contains(&6));
    }

    #[test]
    fn test_target_without_candidates() {
        let mut index = CatalogIndex::new();
        index.insert_anime(popular(1, &["Action"], 7.0, 2000));

        let ranker = RecommendationRanker::new(Arc::new(index));
        let recommendations = ranker.get_recommendations(1, limit(10)).unwrap();
        assert!(recommendations.items.is_empty());
    }
}
