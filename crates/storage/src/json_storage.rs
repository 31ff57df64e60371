//! JSON file storage implementation.
//!
//! Stores one pretty-printed JSON file per objective under
//! `<root>/objectives/`. The file format is the application's own objective
//! shape, so exported objective lists can be imported as-is.

use std::path::{Path, PathBuf};

use babyagi_core::{Objective, ObjectiveId};
use tokio::fs;
use tracing::{debug, warn};

use super::{ObjectiveStore, Result, StorageError};

/// File-based JSON objective store.
pub struct JsonObjectiveStore {
    root: PathBuf,
}

impl JsonObjectiveStore {
    /// Open a store rooted at `root`, creating its directories.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("objectives")).await?;
        Ok(Self { root })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn objective_path(&self, id: &ObjectiveId) -> PathBuf {
        self.root
            .join("objectives")
            .join(format!("{}.json", file_stem(id.as_str())))
    }

    /// Import a JSON array of objectives, saving each one.
    ///
    /// Returns the number of objectives imported.
    pub async fn import_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let json = fs::read_to_string(path.as_ref()).await?;
        let objectives: Vec<Objective> = serde_json::from_str(&json)?;
        for objective in &objectives {
            self.save_objective(objective).await?;
        }
        debug!(
            "Imported {} objectives from {}",
            objectives.len(),
            path.as_ref().display()
        );
        Ok(objectives.len())
    }
}

/// Map an arbitrary id onto a safe file name.
///
/// ASCII alphanumerics and `-` pass through; every other byte, `_`
/// included, becomes `_XX` (uppercase hex), so distinct ids never share
/// a file.
fn file_stem(id: &str) -> String {
    let mut stem = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{byte:02X}"));
        }
    }
    stem
}

#[async_trait::async_trait]
impl ObjectiveStore for JsonObjectiveStore {
    async fn save_objective(&mut self, objective: &Objective) -> Result<()> {
        let path = self.objective_path(&objective.id);
        let json = serde_json::to_string_pretty(objective)?;
        fs::write(&path, json.as_bytes()).await?;
        Ok(())
    }

    async fn load_objective(&self, id: &ObjectiveId) -> Result<Option<Objective>> {
        let loaded: Option<Objective> = read_json(&self.objective_path(id)).await?;
        match loaded {
            Some(objective) if objective.id != *id => {
                warn!("File for {} holds objective {}, ignoring", id, objective.id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn list_objectives(&self) -> Result<Vec<Objective>> {
        let mut objectives: Vec<Objective> = list_dir(&self.root.join("objectives")).await?;
        objectives.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(objectives)
    }

    async fn delete_objective(&mut self, id: &ObjectiveId) -> Result<()> {
        match fs::remove_file(self.objective_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!("Skipping unreadable {}: {}", entry.path().display(), e),
        }
    }
    Ok(items)
}
