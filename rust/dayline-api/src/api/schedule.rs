//! Task CRUD endpoints over the task store.
//!
//! The routes and response envelopes mirror what the desktop frontend
//! expects: mutations answer with a short `message` plus the affected task.
//! No clock validation happens here - tasks store their time string
//! verbatim, and only scheduler training ever parses it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;

use crate::api::{error_response, internal_error};
use crate::domain::tasks::{NewTask, Task, TaskPatch};
use crate::AppState;

/// Create the schedule router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(list_tasks).post(add_task))
        .route("/schedule/{task_id}", put(edit_task).delete(delete_task))
}

/// Envelope returned by the mutating endpoints.
#[derive(Debug, Serialize)]
struct TaskEnvelope {
    message: &'static str,
    task: Task,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// List the active schedule.
async fn list_tasks(State(state): State<AppState>) -> Response {
    match state.store.list().await {
        Ok(tasks) => (StatusCode::OK, Json(tasks)).into_response(),
        Err(err) => internal_error(&err),
    }
}

/// Add a new task.
async fn add_task(State(state): State<AppState>, Json(new): Json<NewTask>) -> Response {
    match state.store.create(new).await {
        Ok(task) => (
            StatusCode::CREATED,
            Json(TaskEnvelope {
                message: "Task added",
                task,
            }),
        )
            .into_response(),
        Err(err) => internal_error(&err),
    }
}

/// Edit an existing task.
async fn edit_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(patch): Json<TaskPatch>,
) -> Response {
    match state.store.update(task_id, patch).await {
        Ok(Some(task)) => (
            StatusCode::OK,
            Json(TaskEnvelope {
                message: "Task updated",
                task,
            }),
        )
            .into_response(),
        Ok(None) => task_not_found(task_id),
        Err(err) => internal_error(&err),
    }
}

/// Delete a task, archiving it into the training history first.
async fn delete_task(State(state): State<AppState>, Path(task_id): Path<i64>) -> Response {
    match state.store.delete(task_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Task deleted",
            }),
        )
            .into_response(),
        Ok(false) => task_not_found(task_id),
        Err(err) => internal_error(&err),
    }
}

fn task_not_found(task_id: i64) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("Task {task_id} not found"))
}
