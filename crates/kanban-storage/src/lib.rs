//! JSON file persistence for the task board.
//!
//! The canonical on-disk shape is a flat array of task objects. Two legacy
//! shapes are accepted on load and rewritten in the canonical shape on the
//! next save: a `doing` status spelling, and an object keyed by status
//! (`{"todo": [...], "doing": [...], "done": [...]}`).

use kanban_core::{Task, TaskStatus};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported tasks file format: {0}")]
    Format(String),
}

/// File-backed task repository. Load and save are the only operations;
/// the board core never touches the filesystem itself.
pub struct TaskFileStore {
    path: PathBuf,
}

impl TaskFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all tasks. A missing file is an empty board; an unreadable or
    /// unparseable file is an error the caller must treat as fatal at
    /// startup, never as an empty board.
    pub fn load(&self) -> Result<Vec<Task>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        parse_tasks_compat(&content)
    }

    /// Persist all tasks as a pretty-printed flat array, replacing the
    /// file atomically via a temp-file rename.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let payload = serde_json::to_string_pretty(tasks)?;
        write_atomic(&self.path, &payload)
    }
}

/// Parse the canonical flat array first; fall back to the legacy
/// status-keyed object, where the column key is authoritative for status.
pub fn parse_tasks_compat(content: &str) -> Result<Vec<Task>, StorageError> {
    if let Ok(tasks) = serde_json::from_str::<Vec<Task>>(content) {
        return Ok(tasks);
    }

    let raw: Value = serde_json::from_str(content)?;
    let root = raw.as_object().ok_or_else(|| {
        StorageError::Format("expected a task array or a status-keyed object".to_string())
    })?;

    let mut tasks = Vec::new();
    for (key, entries) in root {
        let Ok(status) = key.parse::<TaskStatus>() else {
            // Unknown keys (metadata and the like) are skipped.
            continue;
        };
        let list = entries.as_array().ok_or_else(|| {
            StorageError::Format(format!("column '{key}' is not an array"))
        })?;
        for entry in list {
            let mut task: Task = serde_json::from_value(entry.clone())?;
            task.status = status;
            tasks.push(task);
        }
    }
    Ok(tasks)
}

fn write_atomic(path: &Path, payload: &str) -> Result<(), StorageError> {
    let temp_path = match path.file_name() {
        Some(name) => path.with_file_name(format!("{}.tmp", name.to_string_lossy())),
        None => path.with_extension("tmp"),
    };
    fs::write(&temp_path, payload)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
