//! Filter implementations for the candidate pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod quality_gate;

// Re-export for convenience
pub use quality_gate::{is_quality_candidate, QualityGateFilter, QualityThresholds, SignalThresholds};
