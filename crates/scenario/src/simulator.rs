//! Scenario operations.
//!
//! Every operation takes a scenario by reference and returns a new one with
//! the change applied, a fresh forecast and, when something changed, one
//! more log entry. Unknown task ids never fail: they degrade to a no-op.

use std::sync::Arc;

use babyagi_core::{AgentRole, Objective, ScenarioId, Task, TaskId, Time};
use babyagi_prediction::Predictor;
use chrono::Utc;
use tracing::{info, warn};

use crate::scenario::{Change, Modification, Scenario, TaskPatch};

/// Creates and mutates scenarios.
#[derive(Debug, Clone, Default)]
pub struct ScenarioSimulator {
    predictor: Predictor,
    fixed_now: Option<Time>,
}

impl ScenarioSimulator {
    /// Create a simulator around a predictor.
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            fixed_now: None,
        }
    }

    /// Pin the clock, for reproducible forecasts and timestamps.
    pub fn with_fixed_time(mut self, now: Time) -> Self {
        self.fixed_now = Some(now);
        self
    }

    /// Get the predictor.
    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    fn now(&self) -> Time {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    /// Start a scenario from a copy of `objective`.
    pub fn create_scenario(
        &self,
        objective: &Objective,
        name: impl Into<String>,
        description: impl Into<String>,
        historical: &[Objective],
    ) -> Scenario {
        let now = self.now();
        let modified_objective = objective.clone();
        let prediction = self.predictor.predict_objective_at(&modified_objective, historical, now);
        let name = name.into();

        info!(objective = %objective.id, scenario = %name, "Created scenario");

        Scenario {
            id: ScenarioId::new(),
            name,
            description: description.into(),
            base_objective: Arc::new(objective.clone()),
            modified_objective,
            prediction,
            created_at: now,
            modifications: Vec::new(),
        }
    }

    /// Append a task.
    pub fn add_task(&self, scenario: &Scenario, task: Task, historical: &[Objective]) -> Scenario {
        let mut objective = scenario.modified_objective.clone();
        let entry = self.entry(
            Change::AddTask {
                title: task.title.clone(),
            },
            format!("Added task \"{}\"", task.title),
            Some(task.id.clone()),
        );
        objective.tasks.push(task);

        self.derive(scenario, objective, Some(entry), historical)
    }

    /// Remove a top-level task.
    ///
    /// An unknown id logs nothing but still re-forecasts the unchanged list.
    pub fn remove_task(&self, scenario: &Scenario, task_id: &TaskId, historical: &[Objective]) -> Scenario {
        let mut objective = scenario.modified_objective.clone();

        let entry = match objective.tasks.iter().position(|t| &t.id == task_id) {
            Some(index) => {
                let removed = objective.tasks.remove(index);
                Some(self.entry(
                    Change::RemoveTask {
                        title: removed.title.clone(),
                    },
                    format!("Removed task \"{}\"", removed.title),
                    Some(removed.id),
                ))
            }
            None => {
                warn!(scenario = %scenario.name, task = %task_id, "Task to remove not found");
                None
            }
        };

        self.derive(scenario, objective, entry, historical)
    }

    /// Change a task's priority. An unknown id returns the scenario as is.
    pub fn modify_priority(
        &self,
        scenario: &Scenario,
        task_id: &TaskId,
        new_priority: u8,
        historical: &[Objective],
    ) -> Scenario {
        let mut objective = scenario.modified_objective.clone();
        let Some(task) = objective.task_mut(task_id) else {
            warn!(scenario = %scenario.name, task = %task_id, "Task to reprioritize not found");
            return scenario.clone();
        };

        let old = task.priority.replace(new_priority);
        let entry = self.entry(
            Change::ChangePriority {
                from: old,
                to: new_priority,
            },
            format!(
                "Changed priority of \"{}\" from {} to {}",
                task.title,
                old.map(|p| p.to_string()).unwrap_or_else(|| "unset".to_string()),
                new_priority
            ),
            Some(task_id.clone()),
        );

        self.derive(scenario, objective, Some(entry), historical)
    }

    /// Edit task fields. An unknown id or empty patch returns the scenario as is.
    pub fn modify_task(
        &self,
        scenario: &Scenario,
        task_id: &TaskId,
        patch: &TaskPatch,
        historical: &[Objective],
    ) -> Scenario {
        if patch.is_empty() {
            return scenario.clone();
        }

        let mut objective = scenario.modified_objective.clone();
        let Some(task) = objective.task_mut(task_id) else {
            warn!(scenario = %scenario.name, task = %task_id, "Task to modify not found");
            return scenario.clone();
        };

        let original_title = task.title.clone();
        let mut fields = Vec::new();
        if let Some(title) = &patch.title {
            task.title = title.clone();
            fields.push("title".to_string());
        }
        if let Some(category) = &patch.category {
            task.category = Some(category.clone());
            fields.push("category".to_string());
        }
        if let Some(estimated_time) = &patch.estimated_time {
            task.estimated_time = Some(estimated_time.clone());
            fields.push("estimatedTime".to_string());
        }

        let description = format!("Modified \"{}\": {}", original_title, fields.join(", "));
        let entry = self.entry(Change::ModifyTask { fields }, description, Some(task_id.clone()));

        self.derive(scenario, objective, Some(entry), historical)
    }

    /// Switch the agent role, which rescales every task.
    pub fn change_agent_role(&self, scenario: &Scenario, role: AgentRole, historical: &[Objective]) -> Scenario {
        let mut objective = scenario.modified_objective.clone();
        let old = objective.role();
        objective.agent_role = Some(role);

        let entry = self.entry(
            Change::ChangeRole { from: old, to: role },
            format!("Changed agent role from {} to {}", old, role),
            None,
        );

        self.derive(scenario, objective, Some(entry), historical)
    }

    /// Rebuild the task list in the given order.
    ///
    /// Tasks whose id is not listed are dropped. Unknown and repeated ids
    /// are skipped, so each task appears at most once.
    pub fn reorder_tasks(&self, scenario: &Scenario, ordered_ids: &[TaskId], historical: &[Objective]) -> Scenario {
        let mut objective = scenario.modified_objective.clone();
        let before = objective.tasks.len();

        let mut remaining: Vec<Option<Task>> = objective.tasks.drain(..).map(Some).collect();
        for id in ordered_ids {
            let position = remaining
                .iter()
                .position(|slot| matches!(slot, Some(t) if &t.id == id));
            if let Some(task) = position.and_then(|i| remaining[i].take()) {
                objective.tasks.push(task);
            }
        }

        let dropped = before - objective.tasks.len();
        if dropped > 0 {
            warn!(scenario = %scenario.name, dropped, "Reorder dropped unlisted tasks");
        }

        let order: Vec<TaskId> = objective.tasks.iter().map(|t| t.id.clone()).collect();
        let description = if dropped > 0 {
            format!("Reordered tasks ({} dropped)", dropped)
        } else {
            "Reordered tasks".to_string()
        };
        let entry = self.entry(Change::ReorderTasks { order, dropped }, description, None);

        self.derive(scenario, objective, Some(entry), historical)
    }

    fn entry(&self, change: Change, description: String, task_id: Option<TaskId>) -> Modification {
        Modification {
            change,
            description,
            task_id,
            at: self.now(),
        }
    }

    fn derive(
        &self,
        scenario: &Scenario,
        modified_objective: Objective,
        entry: Option<Modification>,
        historical: &[Objective],
    ) -> Scenario {
        let prediction = self
            .predictor
            .predict_objective_at(&modified_objective, historical, self.now());

        let mut modifications = scenario.modifications.clone();
        if let Some(entry) = entry {
            info!(scenario = %scenario.name, change = entry.kind().as_str(), "{}", entry.description);
            modifications.push(entry);
        }

        Scenario {
            id: scenario.id,
            name: scenario.name.clone(),
            description: scenario.description.clone(),
            base_objective: Arc::clone(&scenario.base_objective),
            modified_objective,
            prediction,
            created_at: scenario.created_at,
            modifications,
        }
    }
}
