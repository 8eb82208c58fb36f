//! Core domain models for the planner.

pub mod tasks;

pub use tasks::{HistoricalTask, NewTask, Task, TaskPatch, DEFAULT_TASK_COLOR};
