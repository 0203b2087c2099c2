//! Recommender crate for the anime recommendation engine.
//!
//! This crate contains the ranker that ties the catalog store, the quality
//! gate and the similarity scorer into one request.

pub mod error;
pub mod ranker;

pub use error::RecommendError;
pub use ranker::{AnimeSummary, RecommendationItem, RecommendationRanker, Recommendations};
