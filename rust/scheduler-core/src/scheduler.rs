//! The scheduler facade held by the service.
//!
//! Bundles the artifact slot pair, the predicted-schedule store, and the
//! training configuration into one explicitly owned object - request
//! handlers receive it through application state rather than reaching for
//! process-wide globals.

use std::path::PathBuf;

use crate::artifacts::ArtifactStore;
use crate::error::SchedulerResult;
use crate::inference::{generate_schedule, PredictedSlot};
use crate::schedule_store::{PredictedScheduleRow, SqliteScheduleStore};
use crate::training::{train, HistoryRow, TrainingConfig, TrainingReport};

/// Batch scheduler over one artifact slot and one output table.
///
/// Training and inference are discrete, non-overlapping runs; callers that
/// might race must serialize externally (the service invokes both through a
/// single blocking task at a time).
#[derive(Debug, Clone)]
pub struct Scheduler {
    artifacts: ArtifactStore,
    schedule: SqliteScheduleStore,
    training: TrainingConfig,
}

impl Scheduler {
    /// Open a scheduler, creating the artifact directory and the schedule
    /// database as needed.
    pub fn open(
        model_dir: impl Into<PathBuf>,
        schedule_db: impl Into<PathBuf>,
        training: TrainingConfig,
    ) -> SchedulerResult<Self> {
        let schedule_db = schedule_db.into();
        if let Some(parent) = schedule_db.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self {
            artifacts: ArtifactStore::open(model_dir)?,
            schedule: SqliteScheduleStore::open(schedule_db)?,
            training,
        })
    }

    /// Whether a trained model is currently available.
    pub fn is_trained(&self) -> bool {
        self.artifacts.is_populated()
    }

    /// Run a training pass over the exported archive.
    pub fn train(&self, rows: &[HistoryRow]) -> SchedulerResult<TrainingReport> {
        train(rows, &self.training, &self.artifacts)
    }

    /// Predict a schedule for `names`, appending it to the output table.
    pub fn predict(&self, names: &[String]) -> SchedulerResult<Vec<PredictedSlot>> {
        generate_schedule(names, &self.artifacts, &self.schedule)
    }

    /// All predicted rows accumulated so far.
    pub fn predictions(&self) -> SchedulerResult<Vec<PredictedScheduleRow>> {
        self.schedule.list()
    }
}
