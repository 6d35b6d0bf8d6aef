pub mod board;
pub mod cleanup;
pub mod layout;

pub use board::Board;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("task title cannot be empty")]
    EmptyTitle,
    #[error("task {0} not found")]
    TaskNotFound(u64),
    #[error("unknown status: {0}")]
    InvalidStatus(String),
}

/// The three board columns, in render order.
pub const STATUSES: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    /// Legacy files spell this `doing`; normalized on load.
    #[serde(alias = "doing")]
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Column header as rendered; the storage key for `Todo` stays
    /// unhyphenated while the header reads "TO DO".
    pub fn header(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TO DO",
            TaskStatus::InProgress => "IN-PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = BoardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_lowercase();
        match normalized.as_str() {
            "t" | "todo" => Ok(TaskStatus::Todo),
            "ip" | "in-progress" | "in_progress" | "inprogress" | "doing" => {
                Ok(TaskStatus::InProgress)
            }
            "d" | "done" => Ok(TaskStatus::Done),
            other => Err(BoardError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub completion_date: Option<DateTime<Utc>>,
    #[serde(default = "unix_epoch", deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,
    /// Immutable creation-sequence counter. Not persisted; the board
    /// re-derives it on load and uses it as the renumbering sort key,
    /// so reassigned ids never change relative creation order.
    #[serde(skip)]
    pub(crate) seq: u64,
}

impl Task {
    pub fn completed_on(&self) -> Option<chrono::NaiveDate> {
        self.completion_date.map(|ts| ts.date_naive())
    }
}

fn unix_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Deserialize a `created_at` that legacy files may carry as null.
fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<DateTime<Utc>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_else(unix_epoch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_round_trips_wire_names() {
        for status in STATUSES {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: TaskStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn legacy_doing_spelling_maps_to_in_progress() {
        let status: TaskStatus = serde_json::from_str("\"doing\"").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
    }

    #[test]
    fn status_aliases_resolve() {
        assert_eq!("t".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!("ip".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("doing".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("D".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!(matches!(
            "urgent".parse::<TaskStatus>(),
            Err(BoardError::InvalidStatus(_))
        ));
    }

    #[test]
    fn task_tolerates_null_created_at() {
        let task: Task = serde_json::from_str(
            r#"{"id": 3, "title": "legacy", "status": "doing", "completion_date": null, "created_at": null}"#,
        )
        .unwrap();
        assert_eq!(task.id, 3);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn task_serializes_wire_fields() {
        let task = Task {
            id: 1,
            title: "Buy milk".to_string(),
            status: TaskStatus::Todo,
            completion_date: None,
            created_at: Utc.with_ymd_and_hms(2026, 8, 27, 10, 0, 0).unwrap(),
            seq: 0,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["status"], "todo");
        assert!(value["completion_date"].is_null());
        assert!(value["created_at"].is_string());
        assert!(value.get("seq").is_none());
    }
}
