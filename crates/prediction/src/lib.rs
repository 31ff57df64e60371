//! Completion-time prediction for objectives and tasks.
//!
//! Tasks are matched against completed history by feature similarity;
//! thin history falls back to a heuristic. Per-task estimates roll up into
//! an objective forecast with risk and bottlenecks.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod features;
pub mod similarity;
pub mod estimator;
pub mod objective;
pub mod velocity;
pub mod format;

pub use config::PredictionConfig;
pub use error::{PredictionError, Result};
pub use features::{extract_features, speed_multiplier, Category, FeatureVector};
pub use similarity::{cosine_similarity, linear_regression};
pub use estimator::{EstimationMethod, Predictor, TaskPrediction};
pub use objective::{ObjectivePrediction, RiskLevel};
pub use velocity::{TrendDirection, VelocityMetrics, VelocityTrend, DEFAULT_WINDOW_DAYS, MAX_TREND_DAYS};
pub use format::format_duration;
