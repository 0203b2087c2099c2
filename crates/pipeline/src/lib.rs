//! Candidate filtering and similarity scoring for anime recommendations.
//!
//! This crate provides:
//! - Filter trait and the quality gate for candidate filtering
//! - FilterPipeline for composing filters
//! - SimilarityScorer for the weighted content-based similarity
//!
//! ## Architecture
//! Candidates are processed in two stages:
//! 1. Filters remove candidates without enough community signal
//! 2. SimilarityScorer scores each survivor against the target
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, SimilarityScorer};
//! use pipeline::filters::QualityGateFilter;
//!
//! let pipeline = FilterPipeline::new().add_filter(QualityGateFilter::new());
//! let eligible = pipeline.apply(store.all_except(target.id), target);
//!
//! let scorer = SimilarityScorer::new();
//! let scored: Vec<_> = eligible
//!     .into_iter()
//!     .filter_map(|candidate| scorer.score(target, candidate).scored())
//!     .collect();
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod similarity;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use similarity::{
    Component, ComponentScores, Similarity, SimilarityOutcome, SimilarityScorer, SkipReason,
    WEIGHTS,
};
