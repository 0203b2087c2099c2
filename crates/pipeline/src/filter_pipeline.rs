//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use catalog::Anime;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(QualityGateFilter::default());
///
/// let eligible = pipeline.apply(candidates, target);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Each filter sees only what the previous one let through. Input and
    /// output counts are logged per filter at debug level.
    pub fn apply<'a>(&self, candidates: Vec<&'a Anime>, target: &Anime) -> Vec<&'a Anime> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, target);
            debug!(
                "Filter {} kept {} of {} candidates",
                filter.name(),
                current.len(),
                before
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::QualityGateFilter;
    use catalog::AnimeId;

    /// Drops every candidate whose id is odd
    struct EvenIdFilter;

    impl Filter for EvenIdFilter {
        fn name(&self) -> &str {
            "EvenIdFilter"
        }

        fn apply<'a>(&self, candidates: Vec<&'a Anime>, _target: &Anime) -> Vec<&'a Anime> {
            candidates.into_iter().filter(|a| a.id % 2 == 0).collect()
        }
    }

    fn ranked(id: AnimeId, rank: u32) -> Anime {
        Anime {
            id,
            rank: Some(rank),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let target = Anime::default();
        let a = ranked(1, 100);
        let b = ranked(2, 9000);

        let filtered = pipeline.apply(vec![&a, &b], &target);
        assert_eq!(filtered.len(), 2);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_filters_run_in_sequence() {
        let target = Anime::default();
        let pipeline = FilterPipeline::new()
            .add_filter(QualityGateFilter::default())
            .add_filter(EvenIdFilter);
        assert_eq!(pipeline.len(), 2);

        let a = ranked(1, 100); // passes gate, odd id
        let b = ranked(2, 100); // passes both
        let c = ranked(4, 9000); // fails gate

        let filtered = pipeline.apply(vec![&a, &b, &c], &target);
        let ids: Vec<AnimeId> = filtered.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2]);
    }
}
