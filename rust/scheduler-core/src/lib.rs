//! Task-time prediction core for the Dayline planner.
//!
//! Dayline learns when a user tends to do a task from the archive of
//! completed tasks, then predicts a clock time for a list of task names.
//! This crate is that whole pipeline: encode the names, fit a regression
//! forest against minutes-since-midnight, persist the fitted pair as opaque
//! artifacts, and run inference into an append-only schedule table.
//!
//! # Architecture
//!
//! - [`clock`]: 12-hour clock strings <-> minutes since midnight
//! - [`encoding`]: deterministic task-name -> dense code mapping
//! - [`forest`]: bootstrap ensemble of CART regression trees
//! - [`features`]: feature layout, persisted with the model
//! - [`artifacts`]: the durable "current model" slot pair
//! - [`training`]: parse -> encode -> fit -> persist
//! - [`inference`]: load -> encode -> predict -> append
//! - [`schedule_store`]: the append-only `predicted_schedule` table
//! - [`scheduler`]: facade bundling the above for service state
//!
//! Everything here is synchronous and batch-oriented - blocking `rusqlite`
//! and `std::fs`, no async. Async callers cross the boundary with
//! `tokio::task::spawn_blocking`.
//!
//! # Example
//!
//! ```rust,ignore
//! use scheduler_core::{HistoryRow, Scheduler, TrainingConfig};
//!
//! let scheduler = Scheduler::open(
//!     "./data/models",
//!     "./data/predicted_schedule.db",
//!     TrainingConfig::default(),
//! )?;
//! scheduler.train(&archive)?;
//! let slots = scheduler.predict(&["Terra".to_string(), "Gaming".to_string()])?;
//! ```

pub mod artifacts;
pub mod clock;
pub mod encoding;
pub mod error;
pub mod features;
pub mod forest;
pub mod inference;
pub mod schedule_store;
pub mod scheduler;
pub mod training;

pub use artifacts::{ArtifactStore, ModelArtifact, ModelMetadata, ENCODING_SLOT, MODEL_SLOT};
pub use encoding::CategoryEncoding;
pub use error::{SchedulerError, SchedulerResult};
pub use features::FeatureShape;
pub use forest::{ForestConfig, RandomForestRegressor};
pub use inference::{generate_schedule, PredictedSlot, ScheduleSink};
pub use schedule_store::{PredictedScheduleRow, SqliteScheduleStore};
pub use scheduler::Scheduler;
pub use training::{train, HistoryRow, TrainingConfig, TrainingReport};
