//! Task model - the unit of work inside an objective.

use serde::{Deserialize, Serialize};
use crate::id::TaskId;
use crate::Time;

/// A task is a unit of work generated for an objective.
///
/// Subtasks are owned by their parent, so the structure is a tree and a
/// `clone()` is a full structural copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Current status
    pub status: TaskStatus,

    /// Priority 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    /// Creation timestamp
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: Time,

    /// Completion timestamp, set by the executor when the task finishes
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed_at: Option<Time>,

    /// Free-text category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Display-only time estimate ("~10 min")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,

    /// Ordered subtasks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Task>,
}

impl Task {
    /// Create a pending task with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            status: TaskStatus::Pending,
            priority: None,
            created_at: chrono::Utc::now(),
            completed_at: None,
            category: None,
            estimated_time: None,
            subtasks: Vec::new(),
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the creation timestamp.
    pub fn created(mut self, at: Time) -> Self {
        self.created_at = at;
        self
    }

    /// Mark the task completed at the given time.
    pub fn completed(mut self, at: Time) -> Self {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(at);
        self
    }

    /// Append a subtask.
    pub fn with_subtask(mut self, subtask: Task) -> Self {
        self.subtasks.push(subtask);
        self
    }

    /// Whether this task can serve as historical evidence.
    pub fn is_completed_with_timestamps(&self) -> bool {
        self.status == TaskStatus::Completed && self.completed_at.is_some()
    }

    /// Wall-clock time the task took, for completed tasks only.
    pub fn duration(&self) -> Option<chrono::Duration> {
        if self.status != TaskStatus::Completed {
            return None;
        }
        self.completed_at.map(|done| done - self.created_at)
    }

    /// Title length in characters.
    pub fn title_len(&self) -> usize {
        self.title.chars().count()
    }
}

/// Task status as tracked by the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started
    Pending,
    /// Currently executing
    Executing,
    /// Finished
    Completed,
}

impl TaskStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Executing => "executing",
            TaskStatus::Completed => "completed",
        }
    }
}
