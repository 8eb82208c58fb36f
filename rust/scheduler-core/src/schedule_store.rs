//! `SQLite` store for the predicted schedule.
//!
//! The output table is append-only: repeated inference runs accumulate rows
//! and nothing ever rewrites them, so no read-modify-write coordination is
//! needed. Each operation opens its own connection, keeping the store
//! trivially `Send + Sync`; WAL mode covers the service's concurrent reads.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::SchedulerResult;
use crate::inference::{PredictedSlot, ScheduleSink};

/// Schema for the append-only output table.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS predicted_schedule (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    time TEXT NOT NULL
)";

/// A persisted predicted-schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedScheduleRow {
    pub id: i64,
    pub name: String,
    pub time: String,
}

/// Append-only store over the `predicted_schedule` table.
#[derive(Debug, Clone)]
pub struct SqliteScheduleStore {
    db_path: PathBuf,
}

impl SqliteScheduleStore {
    /// Open the store, creating the database file and table if needed.
    pub fn open(path: impl Into<PathBuf>) -> SchedulerResult<Self> {
        let store = Self {
            db_path: path.into(),
        };
        let conn = store.connect()?;
        conn.execute(SCHEMA, [])?;
        Ok(store)
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// All accumulated rows in insertion order.
    pub fn list(&self) -> SchedulerResult<Vec<PredictedScheduleRow>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name, time FROM predicted_schedule ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PredictedScheduleRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    time: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn connect(&self) -> SchedulerResult<Connection> {
        let conn = Connection::open(&self.db_path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(conn)
    }
}

impl ScheduleSink for SqliteScheduleStore {
    fn append(&self, slots: &[PredictedSlot]) -> SchedulerResult<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO predicted_schedule (name, time) VALUES (?1, ?2)")?;
            for slot in slots {
                stmt.execute(params![slot.name, slot.time])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
