//! SQLite schema for the task store.

/// Active tasks plus the append-only archive that feeds training.
///
/// `task_history` rows are copies taken at deletion time; their ids are
/// independent of the original task ids.
pub const TASKS_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    time TEXT NOT NULL,
    color TEXT NOT NULL DEFAULT '#ffcc00'
);

CREATE TABLE IF NOT EXISTS task_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    time TEXT NOT NULL,
    color TEXT NOT NULL DEFAULT '#ffcc00'
);
";
