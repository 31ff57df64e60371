//! Tunable thresholds for the prediction engine.

use serde::{Deserialize, Serialize};

/// Configuration for the prediction engine.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Minimum completed historical tasks before similarity is trusted
    pub min_history: usize,

    /// Candidates must be strictly above this cosine similarity
    pub similarity_threshold: f64,

    /// Maximum number of similar tasks kept
    pub max_similar: usize,

    /// Matches needed for the "Strong historical data" factor
    pub strong_history: usize,

    /// Confidence reported by the heuristic path
    pub heuristic_confidence: f64,

    /// Multiplier applied once to the summed task estimates
    pub sequential_overhead: f64,

    /// Tasks below this confidence count as risky
    pub low_confidence: f64,

    /// Tasks longer than this (ms) count as risky
    pub long_task_ms: f64,

    /// Tasks longer than this (ms) are bottlenecks
    pub bottleneck_ms: f64,

    /// Maximum number of bottlenecks reported
    pub max_bottlenecks: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            min_history: 3,
            similarity_threshold: 0.3,
            max_similar: 10,
            strong_history: 5,
            heuristic_confidence: 0.4,
            sequential_overhead: 1.2,
            low_confidence: 0.5,
            long_task_ms: 600_000.0,
            bottleneck_ms: 900_000.0,
            max_bottlenecks: 3,
        }
    }
}
