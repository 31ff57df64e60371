//! Scenario snapshots and their modification log.

use std::sync::Arc;

use babyagi_core::{AgentRole, Objective, ScenarioId, TaskId, Time};
use babyagi_prediction::ObjectivePrediction;
use serde::{Deserialize, Serialize};

/// A what-if variant of an objective.
///
/// Each value is a complete snapshot: simulator operations return a new
/// `Scenario` and never touch the one they were given. The base objective
/// is shared read-only between all snapshots derived from it.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    /// Unique identifier, stable across snapshots of the same scenario
    pub id: ScenarioId,

    /// Display name
    pub name: String,

    /// What this scenario explores
    pub description: String,

    /// Objective the scenario started from
    pub base_objective: Arc<Objective>,

    /// Objective with all modifications applied
    pub modified_objective: Objective,

    /// Forecast for `modified_objective`
    pub prediction: ObjectivePrediction,

    /// When the scenario was created
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: Time,

    /// Applied modifications, oldest first
    pub modifications: Vec<Modification>,
}

impl Scenario {
    /// Number of logged modifications of the given kind.
    pub fn count_of(&self, kind: ModificationKind) -> usize {
        self.modifications.iter().filter(|m| m.kind() == kind).count()
    }
}

/// One entry in a scenario's modification log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    /// What changed, with kind-specific detail
    pub change: Change,

    /// Human-readable summary
    pub description: String,

    /// Task affected, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,

    /// When the change was applied
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub at: Time,
}

impl Modification {
    /// Kind tag of this modification.
    pub fn kind(&self) -> ModificationKind {
        self.change.kind()
    }
}

/// Kind-specific payload of a modification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    /// A task was appended
    AddTask {
        /// Title of the new task
        title: String,
    },
    /// A task was removed
    RemoveTask {
        /// Title of the removed task
        title: String,
    },
    /// Task fields were edited
    ModifyTask {
        /// Names of the fields that changed
        fields: Vec<String>,
    },
    /// The agent role changed
    ChangeRole {
        /// Previous role
        from: AgentRole,
        /// New role
        to: AgentRole,
    },
    /// A task's priority changed
    ChangePriority {
        /// Previous priority
        from: Option<u8>,
        /// New priority
        to: u8,
    },
    /// Tasks were reordered
    ReorderTasks {
        /// Resulting task order
        order: Vec<TaskId>,
        /// Tasks dropped because they were not listed
        dropped: usize,
    },
}

impl Change {
    /// Kind tag of this change.
    pub fn kind(&self) -> ModificationKind {
        match self {
            Change::AddTask { .. } => ModificationKind::AddTask,
            Change::RemoveTask { .. } => ModificationKind::RemoveTask,
            Change::ModifyTask { .. } => ModificationKind::ModifyTask,
            Change::ChangeRole { .. } => ModificationKind::ChangeRole,
            Change::ChangePriority { .. } => ModificationKind::ChangePriority,
            Change::ReorderTasks { .. } => ModificationKind::ReorderTasks,
        }
    }
}

/// Modification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationKind {
    /// Task appended
    AddTask,
    /// Task removed
    RemoveTask,
    /// Task fields edited
    ModifyTask,
    /// Agent role changed
    ChangeRole,
    /// Task priority changed
    ChangePriority,
    /// Task list reordered
    ReorderTasks,
}

impl ModificationKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModificationKind::AddTask => "add_task",
            ModificationKind::RemoveTask => "remove_task",
            ModificationKind::ModifyTask => "modify_task",
            ModificationKind::ChangeRole => "change_role",
            ModificationKind::ChangePriority => "change_priority",
            ModificationKind::ReorderTasks => "reorder_tasks",
        }
    }
}

/// Field edits for [`crate::ScenarioSimulator::modify_task`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    /// New title
    #[serde(default)]
    pub title: Option<String>,

    /// New category
    #[serde(default)]
    pub category: Option<String>,

    /// New display estimate
    #[serde(default)]
    pub estimated_time: Option<String>,
}

impl TaskPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.estimated_time.is_none()
    }
}
