//! SQLite persistence for the planner's tasks.
//!
//! One database file holds the active `tasks` table and the append-only
//! `task_history` archive that feeds scheduler training. The predicted
//! schedule lives in its own file, owned by `scheduler_core`.

pub mod schema;
pub mod store;

pub use store::TaskStore;
