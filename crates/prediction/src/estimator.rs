//! Per-task completion time estimation.
//!
//! A task is compared against completed historical tasks through its
//! feature vector. When enough similar tasks exist, their observed
//! durations drive the estimate; otherwise a rule-based heuristic is used.

use babyagi_core::{AgentRole, Task, TaskId};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::PredictionConfig;
use crate::features::{category_multiplier, extract_features, speed_multiplier};
use crate::similarity::{cosine_similarity, mean_and_std_dev};

/// Base duration of the heuristic estimate (3 minutes).
const HEURISTIC_BASE_MS: f64 = 180_000.0;
/// Added per title character.
const HEURISTIC_PER_TITLE_CHAR_MS: f64 = 50.0;
/// Added per priority step below 11.
const HEURISTIC_PER_PRIORITY_STEP_MS: f64 = 30_000.0;
/// Growth per subtask.
const HEURISTIC_SUBTASK_FACTOR: f64 = 0.3;

/// How an estimate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimationMethod {
    /// Averaged from similar completed tasks
    Historical,
    /// Rule-based fallback
    Heuristic,
}

/// Predicted duration for a single task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskPrediction {
    /// Task this prediction belongs to
    pub task_id: TaskId,

    /// Estimated duration in milliseconds
    pub estimated_duration_ms: f64,

    /// Confidence in [0, 1]
    pub confidence: f64,

    /// Human-readable contributing factors
    pub factors: Vec<String>,

    /// Historical tasks judged similar
    pub similar_task_count: usize,

    /// Estimation path taken
    pub method: EstimationMethod,
}

/// The prediction engine.
///
/// Stateless apart from its configuration; every call is a pure function of
/// its arguments.
#[derive(Debug, Clone, Default)]
pub struct Predictor {
    config: PredictionConfig,
}

impl Predictor {
    /// Create a predictor with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: PredictionConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Predict how long `task` will take given a pool of historical tasks.
    pub fn predict_task<'a, I>(&self, task: &Task, historical: I, role: AgentRole) -> TaskPrediction
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let completed: Vec<(&Task, f64)> = historical
            .into_iter()
            .filter(|t| t.is_completed_with_timestamps())
            .filter_map(|t| t.duration().map(|d| (t, d.num_milliseconds() as f64)))
            .collect();

        if completed.len() < self.config.min_history {
            debug!(
                task = %task.id,
                history = completed.len(),
                "Not enough history, using heuristic"
            );
            return self.heuristic_estimate(task, role);
        }

        let target = extract_features(task);
        let mut matches: Vec<(f64, f64)> = Vec::new();
        for (candidate, duration) in completed {
            match cosine_similarity(&target, &extract_features(candidate)) {
                Ok(similarity) if similarity > self.config.similarity_threshold => {
                    matches.push((similarity, duration));
                }
                Ok(_) => {}
                Err(e) => {
                    error!(candidate = %candidate.id, "Skipping historical task: {}", e);
                }
            }
        }

        matches.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(self.config.max_similar);

        if matches.is_empty() {
            debug!(task = %task.id, "No similar tasks above threshold, using heuristic");
            return self.heuristic_estimate(task, role);
        }

        let durations: Vec<f64> = matches.iter().map(|(_, d)| *d).collect();
        let (avg_duration, std_dev) = mean_and_std_dev(&durations);
        let match_count = matches.len();

        let sample_confidence = (match_count as f64 / self.config.max_similar.max(1) as f64).min(1.0);
        let variance_confidence = if avg_duration > 0.0 {
            (1.0 - std_dev / avg_duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let confidence = ((sample_confidence + variance_confidence) / 2.0).clamp(0.0, 1.0);

        let mut factors = Vec::new();
        if task.priority.is_some_and(|p| p <= 3) {
            factors.push("High priority".to_string());
        }
        if let Some(category) = &task.category {
            factors.push(format!("Category: {}", category));
        }
        if !task.subtasks.is_empty() {
            factors.push(format!("{} subtasks", task.subtasks.len()));
        }
        if match_count >= self.config.strong_history {
            factors.push("Strong historical data".to_string());
        }

        debug!(
            task = %task.id,
            matches = match_count,
            avg_ms = avg_duration,
            confidence,
            "Historical estimate"
        );

        TaskPrediction {
            task_id: task.id.clone(),
            estimated_duration_ms: (avg_duration * speed_multiplier(role)).max(0.0),
            confidence,
            factors,
            similar_task_count: match_count,
            method: EstimationMethod::Historical,
        }
    }

    /// Rule-based estimate used when history is missing or dissimilar.
    pub fn heuristic_estimate(&self, task: &Task, role: AgentRole) -> TaskPrediction {
        let mut estimate = HEURISTIC_BASE_MS + task.title_len() as f64 * HEURISTIC_PER_TITLE_CHAR_MS;

        // Lower priority numbers add more time.
        if let Some(priority) = task.priority {
            estimate += (11.0 - f64::from(priority)) * HEURISTIC_PER_PRIORITY_STEP_MS;
        }

        estimate *= category_multiplier(task.category.as_deref());

        if !task.subtasks.is_empty() {
            estimate *= 1.0 + task.subtasks.len() as f64 * HEURISTIC_SUBTASK_FACTOR;
        }

        estimate *= speed_multiplier(role);

        TaskPrediction {
            task_id: task.id.clone(),
            estimated_duration_ms: estimate.max(0.0),
            confidence: self.config.heuristic_confidence,
            factors: vec![
                "Heuristic estimation".to_string(),
                "Insufficient historical data".to_string(),
            ],
            similar_task_count: 0,
            method: EstimationMethod::Heuristic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn epoch() -> babyagi_core::Time {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn done(title: &str, minutes: i64) -> Task {
        Task::new(title)
            .created(epoch())
            .completed(epoch() + Duration::minutes(minutes))
    }

    #[test]
    fn test_heuristic_with_too_little_history() {
        let predictor = Predictor::new();
        let task = Task::new("Plan launch");
        let history = vec![done("Plan launch", 5), done("Plan launch", 6)];

        let prediction = predictor.predict_task(&task, &history, AgentRole::General);
        assert_eq!(prediction.confidence, 0.4);
        assert_eq!(
            prediction.factors,
            vec!["Heuristic estimation", "Insufficient historical data"]
        );
        assert_eq!(prediction.similar_task_count, 0);
        assert_eq!(prediction.method, EstimationMethod::Heuristic);
    }

    #[test]
    fn test_heuristic_formula() {
        let predictor = Predictor::new();
        // 10 chars, priority 1, execution, 2 subtasks, developer
        let task = Task::new("0123456789")
            .with_priority(1)
            .with_category("execution")
            .with_subtask(Task::new("a"))
            .with_subtask(Task::new("b"));

        let prediction = predictor.heuristic_estimate(&task, AgentRole::Developer);
        let expected = (180_000.0 + 500.0 + 10.0 * 30_000.0) * 1.8 * 1.6 * 0.9;
        assert!((prediction.estimated_duration_ms - expected).abs() < 1e-6);
    }

    #[test]
    fn test_heuristic_priority_polarity() {
        let predictor = Predictor::new();
        let urgent = predictor.heuristic_estimate(&Task::new("x").with_priority(1), AgentRole::General);
        let relaxed = predictor.heuristic_estimate(&Task::new("x").with_priority(10), AgentRole::General);
        assert!(urgent.estimated_duration_ms > relaxed.estimated_duration_ms);
    }

    #[test]
    fn test_incomplete_history_is_ignored() {
        let predictor = Predictor::new();
        let mut history = vec![done("a", 1), done("b", 2)];
        history.push(Task::new("pending one"));
        let mut no_timestamp = Task::new("marked done");
        no_timestamp.status = babyagi_core::TaskStatus::Completed;
        history.push(no_timestamp);

        let prediction = predictor.predict_task(&Task::new("c"), &history, AgentRole::General);
        assert_eq!(prediction.method, EstimationMethod::Heuristic);
    }

    #[test]
    fn test_historical_estimate_from_similar_tasks() {
        let predictor = Predictor::new();
        let history = vec![
            done("Write unit tests", 10),
            done("Write unit tests", 10),
            done("Write unit tests", 10),
        ];

        let task = Task::new("Write unit tests");
        let prediction = predictor.predict_task(&task, &history, AgentRole::General);

        assert_eq!(prediction.method, EstimationMethod::Historical);
        assert_eq!(prediction.similar_task_count, 3);
        assert_eq!(prediction.estimated_duration_ms, 600_000.0);
        // sample 0.3, variance 1.0
        assert!((prediction.confidence - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_role_scales_historical_estimate() {
        let predictor = Predictor::new();
        let history = vec![done("Draft", 10), done("Draft", 10), done("Draft", 10)];
        let prediction = predictor.predict_task(&Task::new("Draft"), &history, AgentRole::Manager);
        assert!((prediction.estimated_duration_ms - 480_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_dissimilar_tasks_below_threshold_are_excluded() {
        let predictor = Predictor::new().with_config(PredictionConfig {
            similarity_threshold: 0.999,
            ..Default::default()
        });
        // [5, 5, 4, 0] against long-titled candidates
        let task = Task::new("short");
        let history = vec![
            done("A considerably longer historical task title here", 60),
            done("Another considerably longer historical task title", 60),
            done("short", 2),
            done("short", 4),
        ];

        let prediction = predictor.predict_task(&task, &history, AgentRole::General);
        assert_eq!(prediction.similar_task_count, 2);
        assert_eq!(prediction.estimated_duration_ms, 180_000.0);
    }

    #[test]
    fn test_no_match_falls_back_to_heuristic() {
        let predictor = Predictor::new().with_config(PredictionConfig {
            similarity_threshold: 1.5,
            ..Default::default()
        });
        let history = vec![done("a", 1), done("b", 1), done("c", 1)];
        let prediction = predictor.predict_task(&Task::new("d"), &history, AgentRole::General);
        assert_eq!(prediction.method, EstimationMethod::Heuristic);
        assert_eq!(prediction.confidence, 0.4);
    }

    #[test]
    fn test_top_matches_are_capped() {
        let predictor = Predictor::new();
        let history: Vec<Task> = (0..15).map(|_| done("Same title", 3)).collect();
        let prediction = predictor.predict_task(&Task::new("Same title"), &history, AgentRole::General);
        assert_eq!(prediction.similar_task_count, 10);
        assert_eq!(prediction.confidence, 1.0);
        assert!(prediction.factors.contains(&"Strong historical data".to_string()));
    }

    #[test]
    fn test_factors_describe_task() {
        let predictor = Predictor::new();
        let history = vec![done("Tune query", 5), done("Tune query", 6), done("Tune query", 7)];
        let task = Task::new("Tune query")
            .with_priority(2)
            .with_category("optimization")
            .with_subtask(Task::new("index"));

        let prediction = predictor.predict_task(&task, &history, AgentRole::General);
        assert_eq!(prediction.method, EstimationMethod::Historical);
        assert_eq!(
            prediction.factors,
            vec!["High priority", "Category: optimization", "1 subtasks"]
        );
    }

    #[test]
    fn test_confidence_bounds_with_wild_variance() {
        let predictor = Predictor::new();
        let history = vec![done("Deploy", 1), done("Deploy", 1), done("Deploy", 500)];
        let prediction = predictor.predict_task(&Task::new("Deploy"), &history, AgentRole::General);
        assert!(prediction.confidence >= 0.0 && prediction.confidence <= 1.0);
    }

    #[test]
    fn test_zero_duration_history_keeps_confidence_finite() {
        let predictor = Predictor::new();
        let history = vec![done("Ping", 0), done("Ping", 0), done("Ping", 0)];
        let prediction = predictor.predict_task(&Task::new("Ping"), &history, AgentRole::General);
        assert_eq!(prediction.estimated_duration_ms, 0.0);
        assert!(prediction.confidence.is_finite());
        assert!(prediction.confidence >= 0.0 && prediction.confidence <= 1.0);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let predictor = Predictor::new();
        let history = vec![done("Review PR", 3), done("Review PR", 8), done("Merge PR", 2)];
        let task = Task::new("Review PR").with_priority(4);
        let a = predictor.predict_task(&task, &history, AgentRole::Analyst);
        let b = predictor.predict_task(&task, &history, AgentRole::Analyst);
        assert_eq!(a, b);
    }
}
