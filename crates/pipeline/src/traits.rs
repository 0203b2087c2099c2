//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use catalog::Anime;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across concurrent requests
/// - Candidates are borrowed from the catalog snapshot; filters only decide
///   which references survive, they never copy or change an entry
/// - Filtering cannot fail: an ineligible candidate is dropped, not reported
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership of the Vec)
    /// * `target` - The anime recommendations are being computed for
    ///
    /// # Returns
    /// The candidates that passed, in their original order
    fn apply<'a>(&self, candidates: Vec<&'a Anime>, target: &Anime) -> Vec<&'a Anime>;
}
