//! Filter to keep only candidates with enough community signal.
//!
//! Obscure entries can score well on content similarity while being
//! mostly noise (placeholder records, unaired shorts). The gate drops them
//! before any scoring happens.

use crate::traits::Filter;
use catalog::Anime;

/// Popularity bars one side of the gate checks.
///
/// All comparisons are strict, and a missing signal never satisfies its
/// comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalThresholds {
    /// Passes when `popularity < popularity_below`
    pub popularity_below: u32,
    /// Passes when `members > members_above`
    pub members_above: u32,
    /// Passes when `favorites > favorites_above`
    pub favorites_above: u32,
}

/// Eligibility thresholds for recommendation candidates.
///
/// Ranked anime pass when any of `rank`, `popularity`, `members` or
/// `favorites` clears its bar. Unranked anime have no rank to lean on and
/// must clear one of the stricter `unranked` bars instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityThresholds {
    /// Ranked anime pass when `rank < rank_below`
    pub rank_below: u32,
    pub ranked: SignalThresholds,
    pub unranked: SignalThresholds,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            rank_below: 6000,
            ranked: SignalThresholds {
                popularity_below: 3000,
                members_above: 20_000,
                favorites_above: 100,
            },
            unranked: SignalThresholds {
                popularity_below: 2000,
                members_above: 50_000,
                favorites_above: 200,
            },
        }
    }
}

impl QualityThresholds {
    /// Decide whether `anime` is known enough to be recommended
    pub fn admits(&self, anime: &Anime) -> bool {
        match anime.rank {
            Some(rank) => rank < self.rank_below || self.ranked.any_met(anime),
            None => self.unranked.any_met(anime),
        }
    }
}

impl SignalThresholds {
    fn any_met(&self, anime: &Anime) -> bool {
        anime.popularity.is_some_and(|p| p < self.popularity_below)
            || anime.members.is_some_and(|m| m > self.members_above)
            || anime.favorites.is_some_and(|f| f > self.favorites_above)
    }
}

/// Quality check with the default thresholds
pub fn is_quality_candidate(anime: &Anime) -> bool {
    QualityThresholds::default().admits(anime)
}

/// Removes candidates that fail the quality gate.
///
/// ## Algorithm
/// The target plays no part: eligibility depends only on the candidate's
/// own `rank`, `popularity`, `members` and `favorites`.
#[derive(Debug, Clone, Default)]
pub struct QualityGateFilter {
    thresholds: QualityThresholds,
}

impl QualityGateFilter {
    /// Create a gate with the default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the thresholds (builder pattern)
    pub fn with_thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }
}

impl Filter for QualityGateFilter {
    fn name(&self) -> &str {
        "QualityGateFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a Anime>, _target: &Anime) -> Vec<&'a Anime> {
        candidates
            .into_iter()
            .filter(|anime| self.thresholds.admits(anime))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::AnimeId;

    fn signals(
        rank: Option<u32>,
        popularity: Option<u32>,
        members: Option<u32>,
        favorites: Option<u32>,
    ) -> Anime {
        Anime {
            rank,
            popularity,
            members,
            favorites,
            ..Default::default()
        }
    }

    #[test]
    fn test_unranked_popular_enough() {
        assert!(is_quality_candidate(&signals(None, Some(1500), Some(100), Some(5))));
    }

    #[test]
    fn test_unranked_too_obscure() {
        assert!(!is_quality_candidate(&signals(None, Some(5000), Some(100), Some(5))));
    }

    #[test]
    fn test_unranked_uses_stricter_bars() {
        // Each of these would pass if the anime had a rank
        assert!(!is_quality_candidate(&signals(None, Some(2500), None, None)));
        assert!(!is_quality_candidate(&signals(None, None, Some(30_000), None)));
        assert!(!is_quality_candidate(&signals(None, None, None, Some(150))));

        assert!(is_quality_candidate(&signals(None, None, Some(50_001), None)));
        assert!(is_quality_candidate(&signals(None, None, None, Some(201))));
    }

    #[test]
    fn test_ranked_any_condition_suffices() {
        assert!(is_quality_candidate(&signals(Some(5999), None, None, None)));
        assert!(is_quality_candidate(&signals(Some(9000), Some(2999), None, None)));
        assert!(is_quality_candidate(&signals(Some(9000), None, Some(20_001), None)));
        assert!(is_quality_candidate(&signals(Some(9000), None, None, Some(101))));
    }

    #[test]
    fn test_comparisons_are_strict() {
        assert!(!is_quality_candidate(&signals(
            Some(6000),
            Some(3000),
            Some(20_000),
            Some(100)
        )));
        assert!(!is_quality_candidate(&signals(
            None,
            Some(2000),
            Some(50_000),
            Some(200)
        )));
    }

    #[test]
    fn test_missing_signals_never_pass() {
        assert!(!is_quality_candidate(&signals(Some(8000), None, None, None)));
        assert!(!is_quality_candidate(&signals(None, None, None, None)));
    }

    #[test]
    fn test_quality_gate_filter() {
        let target = Anime::default();
        let mut candidates = Vec::new();
        for (id, rank, popularity) in [(1, Some(10), Some(5)), (2, None, Some(9000)), (3, None, Some(100))] {
            candidates.push(Anime {
                id,
                ..signals(rank, popularity, None, None)
            });
        }

        let filter = QualityGateFilter::new();
        let filtered = filter.apply(candidates.iter().collect(), &target);

        let ids: Vec<AnimeId> = filtered.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = QualityThresholds {
            rank_below: 100,
            ..QualityThresholds::default()
        };
        let filter = QualityGateFilter::new().with_thresholds(strict);
        assert_eq!(filter.thresholds().rank_below, 100);

        let target = Anime::default();
        let mid_ranked = signals(Some(500), None, None, None);
        assert!(filter.apply(vec![&mid_ranked], &target).is_empty());
        assert!(is_quality_candidate(&mid_ranked));
    }
}
