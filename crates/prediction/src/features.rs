//! Task feature extraction and the fixed lookup tables behind it.

use babyagi_core::{AgentRole, Task};

/// Priority assumed when a task has none.
pub const DEFAULT_PRIORITY: u8 = 5;

/// Number of components in a [`FeatureVector`].
pub const FEATURE_LEN: usize = 4;

/// Numeric summary of a task used for similarity matching.
///
/// Layout: `[title length, priority, category complexity, subtasks * 2]`.
pub type FeatureVector = [f64; FEATURE_LEN];

/// Task categories the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Gathering information
    Research,
    /// Breaking work down
    Planning,
    /// Doing the work
    Execution,
    /// Verifying results
    Testing,
    /// Writing things up
    Documentation,
    /// Improving existing work
    Optimization,
}

impl Category {
    /// Parse a free-text label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "research" => Some(Category::Research),
            "planning" => Some(Category::Planning),
            "execution" => Some(Category::Execution),
            "testing" => Some(Category::Testing),
            "documentation" => Some(Category::Documentation),
            "optimization" => Some(Category::Optimization),
            _ => None,
        }
    }

    /// Complexity score used as a feature component.
    pub fn complexity(&self) -> f64 {
        match self {
            Category::Research => 4.0,
            Category::Planning => 3.0,
            Category::Execution => 6.0,
            Category::Testing => 5.0,
            Category::Documentation => 2.0,
            Category::Optimization => 7.0,
        }
    }

    /// Duration multiplier used by the heuristic estimate.
    pub fn heuristic_multiplier(&self) -> f64 {
        match self {
            Category::Research => 1.5,
            Category::Planning => 1.2,
            Category::Execution => 1.8,
            Category::Testing => 1.4,
            Category::Documentation => 1.0,
            Category::Optimization => 2.0,
        }
    }
}

/// Complexity for an optional label; unknown or missing is 4.
pub fn category_complexity(label: Option<&str>) -> f64 {
    label
        .and_then(Category::parse)
        .map(|c| c.complexity())
        .unwrap_or(4.0)
}

/// Heuristic multiplier for an optional label; unknown or missing is 1.3.
pub fn category_multiplier(label: Option<&str>) -> f64 {
    label
        .and_then(Category::parse)
        .map(|c| c.heuristic_multiplier())
        .unwrap_or(1.3)
}

/// Speed multiplier for a role. Below 1 is faster than baseline.
pub fn speed_multiplier(role: AgentRole) -> f64 {
    match role {
        AgentRole::Developer => 0.9,
        AgentRole::Designer => 1.1,
        AgentRole::Researcher => 1.3,
        AgentRole::Manager => 0.8,
        AgentRole::Analyst => 1.0,
        AgentRole::General => 1.0,
    }
}

/// Extract the feature vector for a task.
pub fn extract_features(task: &Task) -> FeatureVector {
    [
        task.title_len() as f64,
        f64::from(task.priority.unwrap_or(DEFAULT_PRIORITY)),
        category_complexity(task.category.as_deref()),
        task.subtasks.len() as f64 * 2.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_features() {
        let task = Task::new("Write tests")
            .with_priority(2)
            .with_category("TESTING")
            .with_subtask(Task::new("unit"))
            .with_subtask(Task::new("integration"));

        assert_eq!(extract_features(&task), [11.0, 2.0, 5.0, 4.0]);
    }

    #[test]
    fn test_extract_features_defaults() {
        let task = Task::new("abc");
        assert_eq!(extract_features(&task), [3.0, 5.0, 4.0, 0.0]);

        let odd = Task::new("abc").with_category("gardening");
        assert_eq!(extract_features(&odd)[2], 4.0);
    }

    #[test]
    fn test_category_lookup_is_case_insensitive() {
        assert_eq!(Category::parse(" Optimization "), Some(Category::Optimization));
        assert_eq!(category_multiplier(Some("ReSeArCh")), 1.5);
        assert_eq!(category_multiplier(None), 1.3);
        assert_eq!(category_complexity(Some("unknown")), 4.0);
    }

    #[test]
    fn test_speed_multipliers() {
        assert_eq!(speed_multiplier(AgentRole::Manager), 0.8);
        assert_eq!(speed_multiplier(AgentRole::Researcher), 1.3);
        assert_eq!(speed_multiplier(AgentRole::default()), 1.0);
    }
}
