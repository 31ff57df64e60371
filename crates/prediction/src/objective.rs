//! Objective-level forecasting.

use std::collections::HashMap;

use babyagi_core::{Objective, Task, TaskId, Time};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::estimator::{Predictor, TaskPrediction};

/// Coarse likelihood of an objective running late.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Few risky tasks
    Low,
    /// More than a quarter of tasks risky
    Medium,
    /// More than half of tasks risky
    High,
}

impl RiskLevel {
    /// Classify a high-risk ratio.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.5 {
            RiskLevel::High
        } else if ratio > 0.25 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Ordinal used when ranking: low = 1, medium = 2, high = 3.
    pub fn ordinal(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forecast for a whole objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectivePrediction {
    /// Sum of task estimates including sequential overhead (ms)
    pub total_estimated_ms: f64,

    /// Projected completion time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub completion_date: Time,

    /// Per-task predictions keyed by task id
    pub task_predictions: HashMap<TaskId, TaskPrediction>,

    /// Risk classification
    pub risk_level: RiskLevel,

    /// Titles of the first long-running tasks, in task order
    pub bottlenecks: Vec<String>,

    /// Tasks counted as risky
    pub high_risk_count: usize,

    /// Mean task confidence (0 with no tasks)
    pub average_confidence: f64,
}

impl ObjectivePrediction {
    /// Prediction for a top-level task.
    pub fn task(&self, id: &TaskId) -> Option<&TaskPrediction> {
        self.task_predictions.get(id)
    }
}

impl Predictor {
    /// Forecast an objective against a historical corpus, as of now.
    pub fn predict_objective(&self, objective: &Objective, historical: &[Objective]) -> ObjectivePrediction {
        self.predict_objective_at(objective, historical, Utc::now())
    }

    /// Forecast an objective against a historical corpus at a fixed time.
    ///
    /// Only top-level tasks are predicted; subtasks feed into their
    /// parent's features but are not estimated on their own.
    pub fn predict_objective_at(
        &self,
        objective: &Objective,
        historical: &[Objective],
        now: Time,
    ) -> ObjectivePrediction {
        let config = self.config();
        let pool: Vec<&Task> = historical.iter().flat_map(|o| o.tasks.iter()).collect();
        let role = objective.role();

        let predictions: Vec<TaskPrediction> = objective
            .tasks
            .iter()
            .map(|task| self.predict_task(task, pool.iter().copied(), role))
            .collect();

        let sum: f64 = predictions.iter().map(|p| p.estimated_duration_ms).sum();
        let total_estimated_ms = sum * config.sequential_overhead;

        let high_risk_count = predictions
            .iter()
            .filter(|p| p.confidence < config.low_confidence || p.estimated_duration_ms > config.long_task_ms)
            .count();
        let risk_ratio = high_risk_count as f64 / predictions.len().max(1) as f64;

        let bottlenecks: Vec<String> = objective
            .tasks
            .iter()
            .zip(&predictions)
            .filter(|(_, p)| p.estimated_duration_ms > config.bottleneck_ms)
            .map(|(t, _)| t.title.clone())
            .take(config.max_bottlenecks)
            .collect();

        let average_confidence = if predictions.is_empty() {
            0.0
        } else {
            predictions.iter().map(|p| p.confidence).sum::<f64>() / predictions.len() as f64
        };

        debug!(
            objective = %objective.id,
            tasks = predictions.len(),
            history = pool.len(),
            total_ms = total_estimated_ms,
            "Objective forecast"
        );

        ObjectivePrediction {
            total_estimated_ms,
            completion_date: completion_after(now, total_estimated_ms),
            task_predictions: predictions.into_iter().map(|p| (p.task_id.clone(), p)).collect(),
            risk_level: RiskLevel::from_ratio(risk_ratio),
            bottlenecks,
            high_risk_count,
            average_confidence,
        }
    }
}

/// `now` plus `ms`, saturating at the latest representable time.
fn completion_after(now: Time, ms: f64) -> Time {
    Duration::try_milliseconds(ms.round() as i64)
        .and_then(|span| now.checked_add_signed(span))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PredictionConfig;
    use crate::estimator::EstimationMethod;
    use babyagi_core::{AgentRole, ObjectiveStatus};
    use chrono::TimeZone;

    fn now() -> Time {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn objective_with(titles: &[&str]) -> Objective {
        titles.iter().enumerate().fold(Objective::new("Launch", ""), |o, (i, title)| {
            o.with_task(Task::new(*title).with_id(format!("t{i}")).created(now()))
        })
    }

    fn history_objective(title: &str, minutes: &[i64]) -> Objective {
        minutes.iter().fold(
            Objective::new("past", "").with_status(ObjectiveStatus::Completed),
            |o, m| {
                o.with_task(
                    Task::new(title)
                        .created(now())
                        .completed(now() + Duration::minutes(*m)),
                )
            },
        )
    }

    #[test]
    fn test_heuristic_only_forecast() {
        let predictor = Predictor::new();
        let objective = objective_with(&["Research market", "Draft plan", "Write copy"]);

        let prediction = predictor.predict_objective_at(&objective, &[], now());

        let mut sum = 0.0;
        for task in &objective.tasks {
            let p = prediction.task(&task.id).unwrap();
            assert_eq!(p.confidence, 0.4);
            assert_eq!(p.method, EstimationMethod::Heuristic);
            sum += p.estimated_duration_ms;
        }
        assert!((prediction.total_estimated_ms - sum * 1.2).abs() < 1e-6);

        // every task has confidence 0.4 < 0.5
        assert_eq!(prediction.high_risk_count, 3);
        assert_eq!(prediction.risk_level, RiskLevel::High);
        // ~4 minutes each, none above 15 minutes
        assert!(prediction.bottlenecks.is_empty());
        assert_eq!(
            prediction.completion_date,
            now() + Duration::milliseconds(prediction.total_estimated_ms.round() as i64)
        );
    }

    #[test]
    fn test_empty_objective() {
        let prediction = Predictor::new().predict_objective_at(&Objective::new("empty", ""), &[], now());
        assert_eq!(prediction.total_estimated_ms, 0.0);
        assert_eq!(prediction.risk_level, RiskLevel::Low);
        assert_eq!(prediction.completion_date, now());
        assert_eq!(prediction.average_confidence, 0.0);
    }

    #[test]
    fn test_history_pool_is_shared_across_objectives() {
        let predictor = Predictor::new();
        // two completed tasks in each past objective, four in total
        let history = vec![
            history_objective("Write tests", &[4, 6]),
            history_objective("Write tests", &[4, 6]),
        ];
        let objective = objective_with(&["Write tests"]);

        let prediction = predictor.predict_objective_at(&objective, &history, now());
        let task = prediction.task(&TaskId::from("t0")).unwrap();
        assert_eq!(task.method, EstimationMethod::Historical);
        assert_eq!(task.similar_task_count, 4);
        assert_eq!(task.estimated_duration_ms, 300_000.0);
    }

    #[test]
    fn test_bottlenecks_in_task_order_and_capped() {
        let predictor = Predictor::new();
        let long = |title: &str, id: &str| Task::new(title).with_id(id).with_priority(1).with_category("optimization");
        let objective = Objective::new("big", "")
            .with_task(Task::new("quick").with_id("q"))
            .with_task(long("Alpha", "a"))
            .with_task(long("Beta", "b"))
            .with_task(long("Gamma", "c"))
            .with_task(long("Delta", "d"));

        let prediction = predictor.predict_objective_at(&objective, &[], now());
        assert_eq!(prediction.bottlenecks, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_role_changes_total() {
        let predictor = Predictor::new();
        let base = objective_with(&["Sketch wireframes", "Review copy"]);
        let slow = base.clone().with_role(AgentRole::Researcher);
        let fast = base.clone().with_role(AgentRole::Manager);

        let slow_total = predictor.predict_objective_at(&slow, &[], now()).total_estimated_ms;
        let base_total = predictor.predict_objective_at(&base, &[], now()).total_estimated_ms;
        let fast_total = predictor.predict_objective_at(&fast, &[], now()).total_estimated_ms;
        assert!(slow_total > base_total && base_total > fast_total);
    }

    #[test]
    fn test_risk_ratio_thresholds() {
        assert_eq!(RiskLevel::from_ratio(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_ratio(0.25), RiskLevel::Low);
        assert_eq!(RiskLevel::from_ratio(0.26), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_ratio(0.5), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_ratio(0.51), RiskLevel::High);
    }

    #[test]
    fn test_risk_is_monotonic_in_risky_task_count() {
        let mut previous = RiskLevel::Low;
        for risky in 0..=8 {
            let level = RiskLevel::from_ratio(risky as f64 / 8.0);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_confident_short_history_gives_low_risk() {
        let predictor = Predictor::new().with_config(PredictionConfig {
            low_confidence: 0.3,
            ..Default::default()
        });
        let history = vec![history_objective("Write tests", &[5, 5, 5])];
        let objective = objective_with(&["Write tests", "Write tests"]);

        let prediction = predictor.predict_objective_at(&objective, &history, now());
        assert_eq!(prediction.high_risk_count, 0);
        assert_eq!(prediction.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_forecast_is_deterministic() {
        let predictor = Predictor::new();
        let history = vec![history_objective("Ship", &[3, 9, 12])];
        let objective = objective_with(&["Ship", "Polish"]);
        assert_eq!(
            predictor.predict_objective_at(&objective, &history, now()),
            predictor.predict_objective_at(&objective, &history, now())
        );
    }

    #[test]
    fn test_completion_date_saturates_on_huge_estimates() {
        let ancient = DateTime::<Utc>::MIN_UTC;
        let history = ["a", "b", "c"].iter().fold(
            Objective::new("past", "").with_status(ObjectiveStatus::Completed),
            |o, id| {
                o.with_task(
                    Task::new("Migrate database")
                        .with_id(*id)
                        .created(ancient)
                        .completed(now()),
                )
            },
        );
        let objective = objective_with(&["Migrate database", "Migrate database", "Migrate database"]);

        let prediction = Predictor::new().predict_objective_at(&objective, &[history], now());
        assert!(prediction.total_estimated_ms > 0.0);
        assert_eq!(prediction.completion_date, DateTime::<Utc>::MAX_UTC);

        assert_eq!(completion_after(now(), f64::MAX), DateTime::<Utc>::MAX_UTC);
        assert_eq!(completion_after(now(), 60_000.0), now() + Duration::minutes(1));
    }
}
