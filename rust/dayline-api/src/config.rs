//! Configuration management for the Dayline service.
//!
//! Configuration is loaded from multiple sources in order: built-in
//! defaults, an optional `config/dayline` file (TOML/YAML/JSON), then
//! `DAYLINE`-prefixed environment variables (`DAYLINE__SERVER__PORT=5001`).
//! A `.env` file is honored when present.

use std::path::PathBuf;

use scheduler_core::{FeatureShape, ForestConfig, TrainingConfig};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database paths.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Scheduler configuration.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    /// Load configuration from defaults, the optional config file, and
    /// environment variables.
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/dayline").required(false))
            .add_source(
                config::Environment::with_prefix("DAYLINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize().unwrap_or_default();
        Ok(app_config)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to. Local-first: loopback unless overridden.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Database paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file holding active tasks and the training archive.
    #[serde(default = "default_tasks_db")]
    pub tasks_db: PathBuf,
    /// SQLite file accumulating predicted schedules.
    #[serde(default = "default_schedule_db")]
    pub schedule_db: PathBuf,
}

fn default_tasks_db() -> PathBuf {
    PathBuf::from("./data/tasks.db")
}

fn default_schedule_db() -> PathBuf {
    PathBuf::from("./data/predicted_schedule.db")
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            tasks_db: default_tasks_db(),
            schedule_db: default_schedule_db(),
        }
    }
}

/// Scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Directory holding the encoding/model artifact slots.
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
    /// Also train on the coarse hour-of-day bucket, not just the name.
    #[serde(default)]
    pub hour_feature: bool,
    /// Number of trees in the regression forest.
    #[serde(default = "default_trees")]
    pub trees: usize,
    /// Fixed RNG seed for reproducible training runs.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("./data/models")
}

fn default_trees() -> usize {
    100
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            hour_feature: false,
            trees: default_trees(),
            seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Translate the service-level knobs into the core's training config.
    pub fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            feature_shape: if self.hour_feature {
                FeatureShape::NameAndHour
            } else {
                FeatureShape::NameOnly
            },
            forest: ForestConfig {
                trees: self.trees,
                seed: self.seed,
                ..ForestConfig::default()
            },
        }
    }
}
