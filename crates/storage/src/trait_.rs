//! Objective store abstraction.

use async_trait::async_trait;
use babyagi_core::{Objective, ObjectiveId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Source of the historical objective corpus.
///
/// The prediction crates never touch storage; callers load objectives
/// through this trait and pass them in.
#[async_trait]
pub trait ObjectiveStore: Send + Sync {
    /// Save an objective (create or update).
    async fn save_objective(&mut self, objective: &Objective) -> Result<()>;

    /// Load an objective by ID.
    async fn load_objective(&self, id: &ObjectiveId) -> Result<Option<Objective>>;

    /// List all objectives, oldest first.
    async fn list_objectives(&self) -> Result<Vec<Objective>>;

    /// Delete an objective.
    async fn delete_objective(&mut self, id: &ObjectiveId) -> Result<()>;
}
