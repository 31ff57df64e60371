//! BabyAGI core data models.
//!
//! Objectives, their ordered tasks, and the identifiers shared by the
//! prediction and scenario crates.

#![warn(missing_docs)]

// Core identities
mod id;

// Work model
mod objective;
mod task;

// Re-exports
pub use id::*;

pub use objective::{AgentRole, Objective, ObjectiveStatus};
pub use task::{Task, TaskStatus};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
