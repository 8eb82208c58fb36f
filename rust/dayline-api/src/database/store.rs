//! SQLite task store.
//!
//! Each operation opens its own connection in the blocking thread pool, so
//! the store stays thread safe without shared connection state; WAL mode
//! handles the service's concurrent reads. Deleting a task archives it into
//! `task_history` in the same transaction - the archive is the scheduler's
//! training data, so a delete must never lose the row.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use scheduler_core::HistoryRow;
use tokio::task;

use crate::database::schema::TASKS_SCHEMA;
use crate::domain::tasks::{NewTask, Task, TaskPatch, DEFAULT_TASK_COLOR};

/// SQLite-backed store for active tasks and the training archive.
#[derive(Debug, Clone)]
pub struct TaskStore {
    /// Path to the SQLite database file.
    db_path: PathBuf,
}

impl TaskStore {
    /// Open the store, creating the database file and tables if needed.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            db_path: path.into(),
        };
        store
            .with_conn(|conn| {
                conn.execute_batch(TASKS_SCHEMA)
                    .context("Failed to create task tables")
            })
            .await?;
        Ok(store)
    }

    /// All active tasks in id order.
    pub async fn list(&self) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, time, color FROM tasks ORDER BY id")?;
            let tasks = stmt
                .query_map([], |row| {
                    Ok(Task {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        time: row.get(2)?,
                        color: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
        .await
    }

    /// Insert a new task and return it with its assigned id.
    pub async fn create(&self, new: NewTask) -> Result<Task> {
        self.with_conn(move |conn| {
            let color = new
                .color
                .unwrap_or_else(|| DEFAULT_TASK_COLOR.to_string());
            conn.execute(
                "INSERT INTO tasks (name, time, color) VALUES (?1, ?2, ?3)",
                params![new.name, new.time, color],
            )
            .context("Failed to insert task")?;
            Ok(Task {
                id: conn.last_insert_rowid(),
                name: new.name,
                time: new.time,
                color,
            })
        })
        .await
    }

    /// Apply a partial update; `None` when the id does not exist.
    pub async fn update(&self, id: i64, patch: TaskPatch) -> Result<Option<Task>> {
        self.with_conn(move |conn| {
            let Some(current) = fetch_task(conn, id)? else {
                return Ok(None);
            };
            let task = Task {
                id,
                name: patch.name.unwrap_or(current.name),
                time: patch.time.unwrap_or(current.time),
                color: patch.color.unwrap_or(current.color),
            };
            conn.execute(
                "UPDATE tasks SET name = ?1, time = ?2, color = ?3 WHERE id = ?4",
                params![task.name, task.time, task.color, id],
            )
            .context("Failed to update task")?;
            Ok(Some(task))
        })
        .await
    }

    /// Archive the task into `task_history`, then delete it.
    ///
    /// Returns `false` when the id does not exist. Archive and delete share
    /// one transaction so the row cannot vanish without entering the
    /// archive.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let archived = tx.execute(
                "INSERT INTO task_history (name, time, color)
                 SELECT name, time, color FROM tasks WHERE id = ?1",
                params![id],
            )?;
            if archived == 0 {
                return Ok(false);
            }
            tx.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
            tx.commit()?;
            Ok(true)
        })
        .await
    }

    /// Export the archive as training rows for the scheduler.
    pub async fn history(&self) -> Result<Vec<HistoryRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT name, time FROM task_history ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(HistoryRow {
                        name: row.get(0)?,
                        time: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .await
    }

    /// Run an operation against a fresh connection on the blocking pool.
    async fn with_conn<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || -> Result<T> {
            let mut conn =
                Connection::open(&db_path).context("Failed to open task database")?;
            conn.pragma_update(None, "journal_mode", "WAL")
                .context("Failed to enable WAL mode")?;
            op(&mut conn)
        })
        .await
        .context("Task store worker panicked")?
    }
}

fn fetch_task(conn: &Connection, id: i64) -> Result<Option<Task>> {
    conn.query_row(
        "SELECT id, name, time, color FROM tasks WHERE id = ?1",
        params![id],
        |row| {
            Ok(Task {
                id: row.get(0)?,
                name: row.get(1)?,
                time: row.get(2)?,
                color: row.get(3)?,
            })
        },
    )
    .optional()
    .context("Failed to fetch task")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn open_store(dir: &TempDir) -> TaskStore {
        TaskStore::open(dir.path().join("tasks.db")).await.unwrap()
    }

    fn new_task(name: &str, time: &str) -> NewTask {
        NewTask {
            name: name.to_string(),
            time: time.to_string(),
            color: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids_and_default_color() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let first = store.create(new_task("Terra", "7:00 PM")).await.unwrap();
        let second = store.create(new_task("Gaming", "9:00 PM")).await.unwrap();
        assert!(first.id < second.id);
        assert_eq!(first.color, DEFAULT_TASK_COLOR);
        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_patches_only_provided_fields() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        let task = store.create(new_task("Terra", "7:00 PM")).await.unwrap();

        let patched = store
            .update(
                task.id,
                TaskPatch {
                    time: Some("7:30 PM".to_string()),
                    ..TaskPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.name, "Terra");
        assert_eq!(patched.time, "7:30 PM");

        assert!(store.update(9999, TaskPatch::default()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_archives_before_removing() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;
        let task = store.create(new_task("Terra", "7:00 PM")).await.unwrap();

        assert!(store.delete(task.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());

        let history = store.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].name, "Terra");
        assert_eq!(history[0].time, "7:00 PM");

        // Deleting again is a clean miss, not an error.
        assert!(!store.delete(task.id).await.unwrap());
        assert_eq!(store.history().await.unwrap().len(), 1);
    }
}
