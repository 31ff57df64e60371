//! Objective model - a goal decomposed into an ordered task list.

use serde::{Deserialize, Serialize};
use crate::id::{ObjectiveId, TaskId};
use crate::task::Task;
use crate::Time;

/// An objective is the top-level goal the agent works towards.
///
/// Task order is execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    /// Unique identifier
    pub id: ObjectiveId,

    /// Objective title
    pub title: String,

    /// Detailed description
    #[serde(default)]
    pub description: String,

    /// Objective status
    pub status: ObjectiveStatus,

    /// When created
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: Time,

    /// Role the agent plays while working on this objective
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_role: Option<AgentRole>,

    /// Ordered top-level tasks
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Objective {
    /// Create a pending objective.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: ObjectiveId::new(),
            title: title.into(),
            description: description.into(),
            status: ObjectiveStatus::Pending,
            created_at: chrono::Utc::now(),
            agent_role: None,
            tasks: Vec::new(),
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<ObjectiveId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the agent role.
    pub fn with_role(mut self, role: AgentRole) -> Self {
        self.agent_role = Some(role);
        self
    }

    /// Set the creation timestamp.
    pub fn created(mut self, at: Time) -> Self {
        self.created_at = at;
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: ObjectiveStatus) -> Self {
        self.status = status;
        self
    }

    /// Append a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Find a top-level task by id.
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Find a top-level task by id, mutably.
    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    /// Role to use for speed adjustments.
    pub fn role(&self) -> AgentRole {
        self.agent_role.unwrap_or_default()
    }
}

/// Objective status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveStatus {
    /// Tasks generated, nothing running
    Pending,
    /// Tasks are being executed
    Executing,
    /// All work done
    Completed,
}

/// Agent persona assigned to an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Software developer
    Developer,
    /// Designer
    Designer,
    /// Researcher
    Researcher,
    /// Project manager
    Manager,
    /// Data analyst
    Analyst,
    /// No specialisation
    #[default]
    General,
}

impl AgentRole {
    /// All roles, in display order.
    pub const ALL: [AgentRole; 6] = [
        AgentRole::Developer,
        AgentRole::Designer,
        AgentRole::Researcher,
        AgentRole::Manager,
        AgentRole::Analyst,
        AgentRole::General,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Developer => "developer",
            AgentRole::Designer => "designer",
            AgentRole::Researcher => "researcher",
            AgentRole::Manager => "manager",
            AgentRole::Analyst => "analyst",
            AgentRole::General => "general",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentRole::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown agent role: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("Developer".parse::<AgentRole>().unwrap(), AgentRole::Developer);
        assert_eq!(" analyst ".parse::<AgentRole>().unwrap(), AgentRole::Analyst);
        assert!("wizard".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_missing_role_defaults_to_general() {
        let objective = Objective::new("Ship it", "");
        assert_eq!(objective.role(), AgentRole::General);
    }

    #[test]
    fn test_deserialize_objective_without_optional_fields() {
        let json = r#"{
            "id": "o1",
            "title": "Launch blog",
            "status": "executing",
            "createdAt": 1700000000000
        }"#;
        let objective: Objective = serde_json::from_str(json).unwrap();
        assert!(objective.tasks.is_empty());
        assert!(objective.agent_role.is_none());
        assert_eq!(objective.status, ObjectiveStatus::Executing);
    }

    #[test]
    fn test_task_lookup() {
        let objective = Objective::new("o", "")
            .with_task(Task::new("a").with_id("a"))
            .with_task(Task::new("b").with_id("b"));
        assert_eq!(objective.task(&TaskId::from("b")).map(|t| t.title.as_str()), Some("b"));
        assert!(objective.task(&TaskId::from("zzz")).is_none());
    }
}
