//! Throughput metrics over a recent window.

use babyagi_core::{Objective, ObjectiveStatus, Task, Time};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::estimator::Predictor;
use crate::similarity::linear_regression;

/// Default window for velocity metrics.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Slope (tasks/day per day) beyond which the trend is not steady.
const TREND_SLOPE_EPSILON: f64 = 0.1;

/// Longest span, in days, bucketed by the velocity trend.
pub const MAX_TREND_DAYS: u32 = 366;

/// Windowed throughput.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityMetrics {
    /// Completed tasks per day
    pub tasks_per_day: f64,

    /// Completed objectives per week
    pub objectives_per_week: f64,

    /// Mean duration of completed tasks (ms)
    pub avg_task_duration_ms: f64,
}

/// Direction of daily completions across the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Completions rising
    Accelerating,
    /// No clear change
    Steady,
    /// Completions falling
    Slowing,
}

/// Least-squares trend of daily task completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityTrend {
    /// Change in completions per day, per day
    pub slope: f64,

    /// Classified direction
    pub direction: TrendDirection,

    /// Completions per day, oldest first
    pub daily_completions: Vec<usize>,
}

/// Start of the window, clamped to the earliest representable time.
fn window_start(now: Time, window_days: u32) -> Time {
    Duration::try_days(i64::from(window_days))
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn recent(objectives: &[Objective], window_days: u32, now: Time) -> impl Iterator<Item = &Objective> {
    let start = window_start(now, window_days);
    objectives.iter().filter(move |o| o.created_at >= start)
}

fn completed_tasks<'a>(objectives: impl Iterator<Item = &'a Objective>) -> impl Iterator<Item = &'a Task> {
    objectives
        .flat_map(|o| o.tasks.iter())
        .filter(|t| t.is_completed_with_timestamps())
}

impl Predictor {
    /// Velocity over the last `window_days`, as of now.
    pub fn velocity(&self, objectives: &[Objective], window_days: u32) -> VelocityMetrics {
        self.velocity_at(objectives, window_days, Utc::now())
    }

    /// Velocity over the `window_days` before `now`.
    ///
    /// A zero-day window yields all zeros.
    pub fn velocity_at(&self, objectives: &[Objective], window_days: u32, now: Time) -> VelocityMetrics {
        if window_days == 0 {
            return VelocityMetrics::default();
        }
        let days = f64::from(window_days);

        let durations: Vec<f64> = completed_tasks(recent(objectives, window_days, now))
            .filter_map(|t| t.duration())
            .map(|d| d.num_milliseconds() as f64)
            .collect();

        let completed_objectives = recent(objectives, window_days, now)
            .filter(|o| o.status == ObjectiveStatus::Completed)
            .count();

        let avg_task_duration_ms = if durations.is_empty() {
            0.0
        } else {
            durations.iter().sum::<f64>() / durations.len() as f64
        };

        VelocityMetrics {
            tasks_per_day: durations.len() as f64 / days,
            objectives_per_week: completed_objectives as f64 / days * 7.0,
            avg_task_duration_ms,
        }
    }

    /// Trend of daily completions over the `window_days` before `now`.
    ///
    /// Completions are bucketed by day since the window start. Windows
    /// shorter than two days, or without completions, are steady. Only the
    /// last [`MAX_TREND_DAYS`] days are bucketed.
    pub fn velocity_trend_at(&self, objectives: &[Objective], window_days: u32, now: Time) -> Result<VelocityTrend> {
        let window_days = window_days.min(MAX_TREND_DAYS);
        let start = window_start(now, window_days);
        let mut daily_completions = vec![0usize; window_days as usize];

        for task in completed_tasks(recent(objectives, window_days, now)) {
            let Some(done) = task.completed_at else { continue };
            let day = (done - start).num_days();
            if (0..i64::from(window_days)).contains(&day) {
                daily_completions[day as usize] += 1;
            }
        }

        if window_days < 2 || daily_completions.iter().all(|c| *c == 0) {
            return Ok(VelocityTrend {
                slope: 0.0,
                direction: TrendDirection::Steady,
                daily_completions,
            });
        }

        let xs: Vec<f64> = (0..daily_completions.len()).map(|d| d as f64).collect();
        let ys: Vec<f64> = daily_completions.iter().map(|c| *c as f64).collect();
        let (slope, _) = linear_regression(&xs, &ys)?;

        let direction = if slope > TREND_SLOPE_EPSILON {
            TrendDirection::Accelerating
        } else if slope < -TREND_SLOPE_EPSILON {
            TrendDirection::Slowing
        } else {
            TrendDirection::Steady
        };

        Ok(VelocityTrend {
            slope,
            direction,
            daily_completions,
        })
    }
}
