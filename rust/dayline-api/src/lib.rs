//! Dayline API - local planner service
//!
//! This crate is the HTTP backend of the Dayline daily planner. It owns the
//! SQLite task store (active tasks plus the training archive fed by
//! deletions) and exposes the learned scheduler's train/predict runs, so the
//! desktop frontend only ever speaks HTTP to localhost:
//!
//! - **Task CRUD**: create, list, edit, delete tasks on the weekly grid
//! - **Archive on delete**: deleted tasks feed the scheduler's training data
//! - **Scheduler**: train the task-time model, generate predicted schedules
//!
//! # Architecture
//!
//! - [`config`]: configuration loading and defaults
//! - [`domain`]: task domain models
//! - [`database`]: SQLite task store
//! - [`api`]: HTTP API endpoints
//! - [`server`]: router assembly and middleware
//! - [`logging`]: startup step logging and operation timers
//!
//! # Example
//!
//! ```rust,ignore
//! use dayline_api::{config::AppConfig, server::create_app};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!     let app = create_app(config).await?;
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod database;
pub mod domain;
pub mod logging;
pub mod server;

use std::sync::Arc;

use scheduler_core::Scheduler;

use config::AppConfig;
use database::TaskStore;

/// Shared application state across request handlers.
///
/// Everything in here is an explicitly owned store object; there is no
/// process-wide mutable state behind the handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
    /// SQLite task store (active tasks + training archive).
    pub store: TaskStore,
    /// Batch scheduler over the artifact slot and the output table.
    pub scheduler: Scheduler,
}
