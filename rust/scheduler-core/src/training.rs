//! The training pipeline: parse, encode, fit, persist.
//!
//! Training consumes the historical task archive (rows the user completed
//! and deleted) and produces the artifact slot pair consumed by inference.
//! Runs are discrete and synchronous; a run that fails leaves any previously
//! persisted artifacts untouched.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactStore, ModelArtifact, ModelMetadata};
use crate::clock;
use crate::encoding::CategoryEncoding;
use crate::error::{SchedulerError, SchedulerResult};
use crate::features::FeatureShape;
use crate::forest::{ForestConfig, RandomForestRegressor};

/// One historical task observation exported from the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRow {
    /// Task name as it appeared on the grid.
    pub name: String,
    /// Clock time string as the user entered it; may be unparsable.
    pub time: String,
}

/// Knobs for a training run.
#[derive(Debug, Clone, Default)]
pub struct TrainingConfig {
    /// Feature layout to fit (persisted with the model).
    pub feature_shape: FeatureShape,
    /// Forest hyperparameters.
    pub forest: ForestConfig,
}

/// What a completed training run learned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Rows that contributed to the fit.
    pub samples: usize,
    /// Rows dropped for unparsable times.
    pub skipped: usize,
    /// Distinct task names in the fitted vocabulary.
    pub vocabulary: usize,
}

/// Fit the encoding and model over the archive and persist both.
///
/// Rows whose time does not parse are skipped and counted, not fatal; a run
/// with zero usable rows is a [`SchedulerError::Training`] and writes
/// nothing.
pub fn train(
    rows: &[HistoryRow],
    config: &TrainingConfig,
    store: &ArtifactStore,
) -> SchedulerResult<TrainingReport> {
    let mut usable: Vec<(&str, u32)> = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for row in rows {
        match clock::minutes_from_midnight(&row.time) {
            Ok(minutes) => usable.push((row.name.as_str(), minutes)),
            Err(_) => {
                skipped += 1;
                tracing::warn!(name = %row.name, time = %row.time, "skipping row with unparsable time");
            }
        }
    }
    if usable.is_empty() {
        return Err(SchedulerError::Training { skipped });
    }

    let encoding = CategoryEncoding::fit(usable.iter().map(|(name, _)| *name));

    let mut samples = Vec::with_capacity(usable.len());
    let mut targets = Vec::with_capacity(usable.len());
    for &(name, minutes) in &usable {
        // Freshly fitted over these exact names; cannot miss.
        let code = encoding.encode(name)?;
        samples.push(config.feature_shape.training_row(code, minutes));
        targets.push(f64::from(minutes));
    }

    let forest = RandomForestRegressor::fit(&samples, &targets, &config.forest);
    let model = ModelArtifact {
        metadata: ModelMetadata {
            feature_shape: config.feature_shape,
            trained_at: Utc::now(),
            samples: usable.len(),
        },
        forest,
    };
    store.save(&encoding, &model)?;

    let report = TrainingReport {
        samples: usable.len(),
        skipped,
        vocabulary: encoding.len(),
    };
    tracing::info!(
        samples = report.samples,
        skipped = report.skipped,
        vocabulary = report.vocabulary,
        "scheduler model trained"
    );
    Ok(report)
}
