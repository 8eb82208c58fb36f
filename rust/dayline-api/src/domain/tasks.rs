//! Task domain models.
//!
//! Tasks are deliberately loose records: the `time` field is stored exactly
//! as the client sent it, and only the scheduler's training pipeline ever
//! parses it (skipping rows it cannot read). Identity is the SQLite row id.

use serde::{Deserialize, Serialize};

/// Default display color for new tasks (the UI accent).
pub const DEFAULT_TASK_COLOR: &str = "#ffcc00";

/// An active task on the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Row id (SQLite autoincrement).
    pub id: i64,
    /// Task name shown on the grid.
    pub name: String,
    /// Clock time as entered, e.g. "7:00 PM". Stored verbatim.
    pub time: String,
    /// Display color (hex).
    pub color: String,
}

/// Payload for creating a task.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTask {
    /// Task name.
    pub name: String,
    /// Clock time string.
    pub time: String,
    /// Display color; defaults to [`DEFAULT_TASK_COLOR`] when omitted.
    #[serde(default)]
    pub color: Option<String>,
}

/// Partial update for an existing task; omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// A task archived at deletion time; the scheduler trains on these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalTask {
    /// Row id within the archive (not the original task id).
    pub id: i64,
    pub name: String,
    pub time: String,
    pub color: String,
}
