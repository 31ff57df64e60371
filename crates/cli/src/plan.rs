//! Scenario plan files for `babyagi simulate`.

use babyagi_core::{AgentRole, Objective, Task, TaskId};
use babyagi_scenario::{Scenario, ScenarioSimulator, TaskPatch};
use serde::Deserialize;

/// One scenario to build from the base objective.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioPlan {
    /// Scenario name
    pub name: String,

    /// What the scenario explores
    #[serde(default)]
    pub description: String,

    /// Edits applied in order
    #[serde(default)]
    pub steps: Vec<PlanStep>,
}

/// A single scenario edit.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PlanStep {
    AddTask {
        task: Task,
    },
    RemoveTask {
        #[serde(rename = "taskId")]
        task_id: TaskId,
    },
    ModifyPriority {
        #[serde(rename = "taskId")]
        task_id: TaskId,
        priority: u8,
    },
    ModifyTask {
        #[serde(rename = "taskId")]
        task_id: TaskId,
        patch: TaskPatch,
    },
    ChangeRole {
        role: AgentRole,
    },
    ReorderTasks {
        #[serde(rename = "taskIds")]
        task_ids: Vec<TaskId>,
    },
}

impl PlanStep {
    /// Apply this step, returning the next snapshot.
    pub fn apply(&self, sim: &ScenarioSimulator, scenario: &Scenario, historical: &[Objective]) -> Scenario {
        match self {
            PlanStep::AddTask { task } => sim.add_task(scenario, task.clone(), historical),
            PlanStep::RemoveTask { task_id } => sim.remove_task(scenario, task_id, historical),
            PlanStep::ModifyPriority { task_id, priority } => {
                sim.modify_priority(scenario, task_id, *priority, historical)
            }
            PlanStep::ModifyTask { task_id, patch } => sim.modify_task(scenario, task_id, patch, historical),
            PlanStep::ChangeRole { role } => sim.change_agent_role(scenario, *role, historical),
            PlanStep::ReorderTasks { task_ids } => sim.reorder_tasks(scenario, task_ids, historical),
        }
    }
}

impl ScenarioPlan {
    /// Build the scenario described by this plan.
    pub fn build(&self, sim: &ScenarioSimulator, base: &Objective, historical: &[Objective]) -> Scenario {
        let start = sim.create_scenario(base, self.name.clone(), self.description.clone(), historical);
        self.steps
            .iter()
            .fold(start, |scenario, step| step.apply(sim, &scenario, historical))
    }
}
