//! Content-based similarity between a target anime and one candidate.
//!
//! Eight components, each in `[0, 1]`, are combined with fixed weights
//! that sum to 1.0:
//!
//! | component   | weight | signal                                         |
//! |-------------|--------|------------------------------------------------|
//! | genre       | 0.40   | Jaccard overlap of genre names                 |
//! | score       | 0.20   | closeness of community scores (2-point window) |
//! | studio      | 0.10   | at least one shared studio                     |
//! | demographic | 0.05   | same target demographic                        |
//! | year        | 0.05   | closeness of release years (10-year window)    |
//! | popularity  | 0.10   | candidate popularity tier                      |
//! | members     | 0.05   | candidate member-count tier                    |
//! | favorites   | 0.05   | candidate favorites tier                       |
//!
//! A component whose inputs are missing contributes 0. The weights are
//! NOT renormalised over the components that had data, so an anime with
//! sparse metadata simply scores lower.

use catalog::Anime;
use serde::Serialize;
use std::collections::HashSet;

/// One dimension of the similarity breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Genre,
    Score,
    Studio,
    Demographic,
    Year,
    Popularity,
    Members,
    Favorites,
}

impl Component {
    /// All components, in the order they are summed
    pub const ALL: [Component; 8] = [
        Component::Genre,
        Component::Score,
        Component::Studio,
        Component::Demographic,
        Component::Year,
        Component::Popularity,
        Component::Members,
        Component::Favorites,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Component::Genre => "genre",
            Component::Score => "score",
            Component::Studio => "studio",
            Component::Demographic => "demographic",
            Component::Year => "year",
            Component::Popularity => "popularity",
            Component::Members => "members",
            Component::Favorites => "favorites",
        }
    }
}

/// A value per component.
///
/// Used both for a candidate's breakdown and for the weight table;
/// serializes as a flat `component -> value` map.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ComponentScores {
    pub genre: f64,
    pub score: f64,
    pub studio: f64,
    pub demographic: f64,
    pub year: f64,
    pub popularity: f64,
    pub members: f64,
    pub favorites: f64,
}

/// Fixed component weights
pub const WEIGHTS: ComponentScores = ComponentScores {
    genre: 0.40,
    score: 0.20,
    studio: 0.10,
    demographic: 0.05,
    year: 0.05,
    popularity: 0.10,
    members: 0.05,
    favorites: 0.05,
};

impl ComponentScores {
    pub fn get(&self, component: Component) -> f64 {
        match component {
            Component::Genre => self.genre,
            Component::Score => self.score,
            Component::Studio => self.studio,
            Component::Demographic => self.demographic,
            Component::Year => self.year,
            Component::Popularity => self.popularity,
            Component::Members => self.members,
            Component::Favorites => self.favorites,
        }
    }

    /// `(component, value)` pairs in summation order
    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        Component::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    fn weighted_sum(&self, weights: &ComponentScores) -> f64 {
        self.iter().map(|(c, value)| value * weights.get(c)).sum()
    }

    fn rounded(&self) -> Self {
        Self {
            genre: round4(self.genre),
            score: round4(self.score),
            studio: round4(self.studio),
            demographic: round4(self.demographic),
            year: round4(self.year),
            popularity: round4(self.popularity),
            members: round4(self.members),
            favorites: round4(self.favorites),
        }
    }
}

/// Similarity of one candidate to the target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Similarity {
    /// Weighted total, rounded to 4 decimals
    pub total_similarity: f64,
    /// Per-component values, each rounded to 4 decimals
    pub breakdown: ComponentScores,
    /// Weights the total was computed with
    pub weights: ComponentScores,
}

/// Why a candidate was not scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The candidate has no genres at all
    NoGenres,
}

/// Result of scoring one candidate.
///
/// `Skipped` means the candidate must be left out of the results entirely,
/// which is different from scoring 0.
#[derive(Debug, Clone, PartialEq)]
pub enum SimilarityOutcome {
    Scored(Similarity),
    Skipped(SkipReason),
}

impl SimilarityOutcome {
    /// The similarity, if the candidate was scored
    pub fn scored(self) -> Option<Similarity> {
        match self {
            SimilarityOutcome::Scored(similarity) => Some(similarity),
            SimilarityOutcome::Skipped(_) => None,
        }
    }
}

/// Scores candidates against a target with the fixed weight table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer;

impl SimilarityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn weights(&self) -> &'static ComponentScores {
        &WEIGHTS
    }

    /// Score `candidate` against `target`.
    ///
    /// Pure function of the two records. A candidate without genres is
    /// skipped; every other missing field degrades its component to 0.
    pub fn score(&self, target: &Anime, candidate: &Anime) -> SimilarityOutcome {
        if candidate.genres.is_empty() {
            return SimilarityOutcome::Skipped(SkipReason::NoGenres);
        }

        let components = ComponentScores {
            genre: genre_similarity(&target.genre_names(), &candidate.genre_names()),
            score: score_similarity(target.score, candidate.score),
            studio: studio_overlap(&target.studio_names(), &candidate.studio_names()),
            demographic: demographic_match(
                target.demographic.as_deref(),
                candidate.demographic.as_deref(),
            ),
            year: year_similarity(target.year, candidate.year),
            popularity: popularity_score(candidate.popularity),
            members: members_score(candidate.members),
            favorites: favorites_score(candidate.favorites),
        };

        SimilarityOutcome::Scored(Similarity {
            total_similarity: round4(components.weighted_sum(&WEIGHTS)),
            breakdown: components.rounded(),
            weights: WEIGHTS,
        })
    }
}

// =============================================================================
// Components
// =============================================================================

/// Jaccard similarity of two name sets; 0 if either is empty
pub fn genre_similarity(target: &HashSet<&str>, candidate: &HashSet<&str>) -> f64 {
    if target.is_empty() || candidate.is_empty() {
        return 0.0;
    }
    let intersection = target.intersection(candidate).count() as f64;
    let union = target.union(candidate).count() as f64;
    intersection / union
}

/// `1 - |diff| / 2`, floored at 0; 0 if either score is missing
pub fn score_similarity(target: Option<f64>, candidate: Option<f64>) -> f64 {
    const MAX_SCORE_GAP: f64 = 2.0;

    match (target, candidate) {
        (Some(t), Some(c)) => (1.0 - (t - c).abs() / MAX_SCORE_GAP).max(0.0),
        _ => 0.0,
    }
}

/// 1.0 when the studio sets share a name, otherwise 0.0
pub fn studio_overlap(target: &HashSet<&str>, candidate: &HashSet<&str>) -> f64 {
    if target.is_disjoint(candidate) { 0.0 } else { 1.0 }
}

/// 1.0 when both demographics are present and equal
pub fn demographic_match(target: Option<&str>, candidate: Option<&str>) -> f64 {
    match (target, candidate) {
        (Some(t), Some(c)) if t == c => 1.0,
        _ => 0.0,
    }
}

/// `1 - |diff| / 10`, floored at 0; 0 if either year is missing
pub fn year_similarity(target: Option<u16>, candidate: Option<u16>) -> f64 {
    const MAX_YEAR_GAP: f64 = 10.0;

    match (target, candidate) {
        (Some(t), Some(c)) => {
            let gap = (f64::from(t) - f64::from(c)).abs();
            (1.0 - gap / MAX_YEAR_GAP).max(0.0)
        }
        _ => 0.0,
    }
}

/// Score for tiers where a value at or below the bound earns the tier score
const POPULARITY_TIERS: [(u32, f64); 6] = [
    (500, 1.0),
    (1000, 0.9),
    (2000, 0.8),
    (3000, 0.7),
    (5000, 0.6),
    (10_000, 0.4),
];

/// Score for tiers where a value at or above the bound earns the tier score
const MEMBERS_TIERS: [(u32, f64); 6] = [
    (500_000, 1.0),
    (100_000, 0.9),
    (50_000, 0.8),
    (20_000, 0.7),
    (10_000, 0.6),
    (5000, 0.4),
];

const FAVORITES_TIERS: [(u32, f64); 6] = [
    (10_000, 1.0),
    (1000, 0.9),
    (500, 0.8),
    (200, 0.7),
    (100, 0.6),
    (50, 0.4),
];

/// Score given to a present value that falls below every tier
const TIER_FLOOR: f64 = 0.2;

/// Tier score of the candidate's popularity rank (lower rank, higher score)
pub fn popularity_score(popularity: Option<u32>) -> f64 {
    popularity.map_or(0.0, |p| {
        POPULARITY_TIERS
            .iter()
            .find(|(bound, _)| p <= *bound)
            .map_or(TIER_FLOOR, |(_, score)| *score)
    })
}

/// Tier score of the candidate's member count
pub fn members_score(members: Option<u32>) -> f64 {
    members.map_or(0.0, |m| at_least_tier(m, &MEMBERS_TIERS))
}

/// Tier score of the candidate's favorites count
pub fn favorites_score(favorites: Option<u32>) -> f64 {
    favorites.map_or(0.0, |f| at_least_tier(f, &FAVORITES_TIERS))
}

fn at_least_tier(value: u32, tiers: &[(u32, f64)]) -> f64 {
    tiers
        .iter()
        .find(|(bound, _)| value >= *bound)
        .map_or(TIER_FLOOR, |(_, score)| *score)
}

/// Round half away from zero to 4 decimal places
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
