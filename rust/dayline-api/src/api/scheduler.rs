//! Scheduler endpoints: train, predict, and read the generated schedule.
//!
//! Both train and predict are discrete batch runs over the synchronous core,
//! executed on the blocking pool. Their failures are per-run conditions -
//! they map to client-facing statuses and never take the service down.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use scheduler_core::{PredictedScheduleRow, PredictedSlot, SchedulerError, TrainingReport};
use serde::{Deserialize, Serialize};
use tokio::task;

use crate::api::error_response;
use crate::AppState;

/// Create the scheduler router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scheduler/train", post(train_model))
        .route("/scheduler/predict", post(predict_schedule))
        .route("/scheduler/schedule", get(list_predictions))
}

/// Training outcome returned to the caller.
#[derive(Debug, Serialize)]
struct TrainResponse {
    message: &'static str,
    #[serde(flatten)]
    report: TrainingReport,
}

/// Train the model over the accumulated task history.
async fn train_model(State(state): State<AppState>) -> Response {
    let rows = match state.store.history().await {
        Ok(rows) => rows,
        Err(err) => return crate::api::internal_error(&err),
    };

    let scheduler = state.scheduler.clone();
    match task::spawn_blocking(move || scheduler.train(&rows)).await {
        Ok(Ok(report)) => (
            StatusCode::OK,
            Json(TrainResponse {
                message: "Model trained",
                report,
            }),
        )
            .into_response(),
        Ok(Err(err)) => scheduler_error(&err),
        Err(join) => join_error(&join),
    }
}

/// Prediction request: an ordered list of task names, duplicates allowed.
#[derive(Debug, Deserialize)]
struct PredictRequest {
    names: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    message: &'static str,
    predictions: Vec<PredictedSlot>,
}

/// Generate a predicted schedule for the requested names.
async fn predict_schedule(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Response {
    let scheduler = state.scheduler.clone();
    match task::spawn_blocking(move || scheduler.predict(&request.names)).await {
        Ok(Ok(predictions)) => (
            StatusCode::OK,
            Json(PredictResponse {
                message: "Schedule generated",
                predictions,
            }),
        )
            .into_response(),
        Ok(Err(err)) => scheduler_error(&err),
        Err(join) => join_error(&join),
    }
}

#[derive(Debug, Serialize)]
struct PredictedRowsResponse {
    schedule: Vec<PredictedScheduleRow>,
}

/// All predicted rows accumulated so far (read by the frontend grid).
async fn list_predictions(State(state): State<AppState>) -> Response {
    let scheduler = state.scheduler.clone();
    match task::spawn_blocking(move || scheduler.predictions()).await {
        Ok(Ok(schedule)) => {
            (StatusCode::OK, Json(PredictedRowsResponse { schedule })).into_response()
        }
        Ok(Err(err)) => scheduler_error(&err),
        Err(join) => join_error(&join),
    }
}

/// Map scheduler failures to user-facing statuses.
///
/// `ModelNotFound` is a 409: the resource exists once the caller trains.
/// Bad input (unknown names, no usable history) is a 422. Anything else is
/// an infrastructure fault.
fn scheduler_error(err: &SchedulerError) -> Response {
    match err {
        SchedulerError::ModelNotFound { .. } => {
            error_response(StatusCode::CONFLICT, err.to_string())
        }
        SchedulerError::Training { .. }
        | SchedulerError::UnknownCategory { .. }
        | SchedulerError::TimeParse { .. } => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
        }
        SchedulerError::Codec(_) | SchedulerError::Io(_) | SchedulerError::Store(_) => {
            tracing::error!(error = %err, "scheduler run failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

fn join_error(join: &tokio::task::JoinError) -> Response {
    tracing::error!(error = %join, "scheduler task panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}
