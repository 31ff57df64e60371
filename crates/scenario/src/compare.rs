//! Side-by-side comparison of scenarios.

use babyagi_prediction::{format_duration, RiskLevel};
use serde::{Deserialize, Serialize};

use crate::scenario::{ModificationKind, Scenario};

/// Result of comparing scenarios against the first one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Scenario names, in input order
    pub scenario_names: Vec<String>,

    /// Total time minus the baseline's total (ms); the baseline is 0
    pub time_deltas: Vec<f64>,

    /// `"<RISK> (<N> tasks, <M> bottlenecks)"` per scenario
    pub risk_comparison: Vec<String>,

    /// Natural-language suggestions
    pub recommendations: Vec<String>,
}

/// Compare scenarios, treating the first as the baseline.
///
/// An empty slice yields an empty comparison.
pub fn compare_scenarios(scenarios: &[Scenario]) -> Comparison {
    let Some(baseline) = scenarios.first() else {
        return Comparison::default();
    };
    let baseline_total = baseline.prediction.total_estimated_ms;

    let time_deltas: Vec<f64> = scenarios
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if i == 0 {
                0.0
            } else {
                s.prediction.total_estimated_ms - baseline_total
            }
        })
        .collect();

    let risk_comparison = scenarios
        .iter()
        .map(|s| {
            format!(
                "{} ({} tasks, {} bottlenecks)",
                s.prediction.risk_level.as_str().to_uppercase(),
                s.modified_objective.tasks.len(),
                s.prediction.bottlenecks.len()
            )
        })
        .collect();

    let mut recommendations = Vec::new();

    // First occurrence wins ties.
    let mut fastest = 0;
    for (i, delta) in time_deltas.iter().enumerate() {
        if *delta < time_deltas[fastest] {
            fastest = i;
        }
    }
    if fastest != 0 {
        recommendations.push(format!(
            "Scenario \"{}\" is the fastest option.",
            scenarios[fastest].name
        ));
    }

    let mut safest = 0;
    for (i, s) in scenarios.iter().enumerate() {
        if s.prediction.risk_level.ordinal() < scenarios[safest].prediction.risk_level.ordinal() {
            safest = i;
        }
    }
    if safest != fastest {
        recommendations.push(format!(
            "Scenario \"{}\" has the lowest risk.",
            scenarios[safest].name
        ));
    }

    for (scenario, delta) in scenarios.iter().zip(&time_deltas).skip(1) {
        let removed = scenario.count_of(ModificationKind::RemoveTask);
        if removed > 0 && *delta < 0.0 {
            recommendations.push(format!(
                "Scenario \"{}\" saves {} by removing {} task(s).",
                scenario.name,
                format_duration(-delta),
                removed
            ));
        }

        let added = scenario.count_of(ModificationKind::AddTask);
        if added > 0 && scenario.prediction.risk_level == RiskLevel::Low {
            recommendations.push(format!(
                "Scenario \"{}\" adds {} task(s) and stays low risk, so the extra scope looks feasible.",
                scenario.name, added
            ));
        }
    }

    Comparison {
        scenario_names: scenarios.iter().map(|s| s.name.clone()).collect(),
        time_deltas,
        risk_comparison,
        recommendations,
    }
}
