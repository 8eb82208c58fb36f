//! Inference over the persisted artifact pair.
//!
//! Given an ordered list of task names, load the current encoding and model,
//! predict a clock time per name, and append the result to a
//! [`ScheduleSink`]. The append is all-or-nothing: an unknown name aborts
//! the run before anything is predicted or written.

use serde::{Deserialize, Serialize};

use crate::artifacts::ArtifactStore;
use crate::clock;
use crate::error::SchedulerResult;

/// One predicted (name, clock time) pair, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictedSlot {
    pub name: String,
    pub time: String,
}

/// Destination for generated schedules.
///
/// The predicted schedule is append-only and never deduplicated; repeated
/// runs accumulate rows. Implementations must write all slots or none.
pub trait ScheduleSink {
    /// Append a batch of predicted slots, preserving order.
    fn append(&self, slots: &[PredictedSlot]) -> SchedulerResult<()>;
}

/// Predict a clock time for every name and append the batch to `sink`.
///
/// Returns the predicted slots in-process as well, so callers are not forced
/// to read the output table back to see what was generated.
///
/// # Errors
///
/// - [`SchedulerError::ModelNotFound`](crate::SchedulerError::ModelNotFound)
///   when no training run has populated the artifact slots.
/// - [`SchedulerError::UnknownCategory`](crate::SchedulerError::UnknownCategory)
///   when any name is outside the training vocabulary; nothing is written.
pub fn generate_schedule(
    names: &[String],
    artifacts: &ArtifactStore,
    sink: &dyn ScheduleSink,
) -> SchedulerResult<Vec<PredictedSlot>> {
    let (encoding, model) = artifacts.load()?;

    // Encode everything up front so an unknown name cannot leave a partial
    // schedule behind.
    let mut codes = Vec::with_capacity(names.len());
    for name in names {
        codes.push(encoding.encode(name)?);
    }

    let shape = model.metadata.feature_shape;
    let slots: Vec<PredictedSlot> = names
        .iter()
        .zip(codes)
        .map(|(name, code)| {
            let minutes = model.forest.predict(&shape.inference_row(code));
            PredictedSlot {
                name: name.clone(),
                time: clock::clock_string(minutes),
            }
        })
        .collect();

    sink.append(&slots)?;
    tracing::info!(count = slots.len(), "predicted schedule appended");
    Ok(slots)
}
