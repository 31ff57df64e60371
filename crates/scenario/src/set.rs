//! An ordered collection of named scenarios.

use babyagi_core::ScenarioId;

use crate::compare::{compare_scenarios, Comparison};
use crate::scenario::Scenario;

/// Scenarios kept for one simulation session.
///
/// Insertion order is preserved; the first scenario is the comparison
/// baseline.
#[derive(Debug, Clone, Default)]
pub struct ScenarioSet {
    scenarios: Vec<Scenario>,
}

impl ScenarioSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scenario at the end.
    pub fn push(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    /// Get a scenario by id.
    pub fn get(&self, id: ScenarioId) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Get a scenario by name.
    pub fn by_name(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Store a newer snapshot in place of the one with the same id.
    ///
    /// Returns the previous snapshot, or `None` (and stores nothing) when
    /// the id is unknown.
    pub fn replace(&mut self, scenario: Scenario) -> Option<Scenario> {
        let slot = self.scenarios.iter_mut().find(|s| s.id == scenario.id)?;
        Some(std::mem::replace(slot, scenario))
    }

    /// Remove a scenario by id.
    pub fn remove(&mut self, id: ScenarioId) -> Option<Scenario> {
        let index = self.scenarios.iter().position(|s| s.id == id)?;
        Some(self.scenarios.remove(index))
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Compare all scenarios against the first.
    pub fn compare(&self) -> Comparison {
        compare_scenarios(&self.scenarios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::ScenarioSimulator;
    use babyagi_core::{Objective, Task, TaskId};

    fn objective() -> Objective {
        Objective::new("Move house", "")
            .with_task(Task::new("Pack boxes").with_id("p"))
            .with_task(Task::new("Book van").with_id("v"))
    }

    #[test]
    fn test_replace_keeps_position() {
        let sim = ScenarioSimulator::default();
        let mut set = ScenarioSet::new();
        let baseline = sim.create_scenario(&objective(), "Baseline", "", &[]);
        let lean = sim.create_scenario(&objective(), "Lean", "", &[]);
        let lean_id = lean.id;
        set.push(baseline);
        set.push(lean);

        let current = set.get(lean_id).unwrap().clone();
        let updated = sim.remove_task(&current, &TaskId::from("v"), &[]);
        let previous = set.replace(updated).unwrap();

        assert_eq!(previous.modified_objective.tasks.len(), 2);
        assert_eq!(set.get(lean_id).unwrap().modified_objective.tasks.len(), 1);
        let names: Vec<_> = set.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Baseline", "Lean"]);
        assert!(set.compare().time_deltas[1] < 0.0);
    }

    #[test]
    fn test_replace_unknown_id() {
        let sim = ScenarioSimulator::default();
        let mut set = ScenarioSet::new();
        set.push(sim.create_scenario(&objective(), "A", "", &[]));

        let stranger = sim.create_scenario(&objective(), "B", "", &[]);
        assert!(set.replace(stranger).is_none());
        assert_eq!(set.len(), 1);
        assert!(set.by_name("B").is_none());
    }

    #[test]
    fn test_remove() {
        let sim = ScenarioSimulator::default();
        let mut set = ScenarioSet::new();
        let a = sim.create_scenario(&objective(), "A", "", &[]);
        let id = a.id;
        set.push(a);

        assert_eq!(set.remove(id).map(|s| s.name), Some("A".to_string()));
        assert!(set.is_empty());
        assert_eq!(set.compare(), Comparison::default());
    }
}
