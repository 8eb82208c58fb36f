//! HTTP server setup and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use scheduler_core::Scheduler;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api;
use crate::config::AppConfig;
use crate::database::TaskStore;
use crate::logging::OpTimer;
use crate::{log_banner, log_init_step, log_success, AppState};

/// Dayline API version (from Cargo.toml).
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the application with all routes and middleware.
pub async fn create_app(config: AppConfig) -> anyhow::Result<Router> {
    let overall_timer = OpTimer::new("server", "create_app");

    log_banner!(
        format!("🗓️  Dayline API v{VERSION}"),
        format!("Tasks: {}", config.database.tasks_db.display())
    );

    // [1/3] Open the task store
    let step_timer = OpTimer::new("server", "task_store");
    if let Some(parent) = config.database.tasks_db.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = TaskStore::open(&config.database.tasks_db).await?;
    log_init_step!(
        1,
        3,
        "Task Store",
        format!("🗄️  {}", config.database.tasks_db.display())
    );
    step_timer.finish();

    // [2/3] Open the scheduler (artifact slots + predicted schedule table)
    let step_timer = OpTimer::new("server", "scheduler");
    let scheduler = {
        let model_dir = config.scheduler.model_dir.clone();
        let schedule_db = config.database.schedule_db.clone();
        let training = config.scheduler.training_config();
        tokio::task::spawn_blocking(move || Scheduler::open(model_dir, schedule_db, training))
            .await??
    };
    log_init_step!(
        2,
        3,
        "Scheduler",
        if scheduler.is_trained() {
            "🧠 Model loaded"
        } else {
            "🧠 No model yet (train first)"
        }
    );
    step_timer.finish();

    // [3/3] Assemble routes and middleware
    let step_timer = OpTimer::new("server", "router");
    let timeout = Duration::from_secs(config.server.timeout_secs);
    let state = AppState {
        config: Arc::new(config),
        store,
        scheduler,
    };
    let app = Router::new()
        .merge(api::health::router())
        .merge(api::schedule::router())
        .merge(api::scheduler::router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(timeout))
        .with_state(state);
    log_init_step!(3, 3, "Router", "🌐 Routes + middleware");
    step_timer.finish();

    log_success!("Dayline API ready");
    overall_timer.finish();
    Ok(app)
}
