//! Durable model artifacts.
//!
//! A training run produces two opaque blobs - the fitted category encoding
//! and the fitted model - persisted under fixed, well-known slot names in a
//! single directory. There is exactly one "current model" slot pair; a new
//! training run replaces it atomically. The slot names are exported so a
//! future layout can add versioned keys without changing the contract.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::encoding::CategoryEncoding;
use crate::error::{SchedulerError, SchedulerResult};
use crate::features::FeatureShape;
use crate::forest::RandomForestRegressor;

/// Slot name for the persisted category encoding.
pub const ENCODING_SLOT: &str = "label-encoding";
/// Slot name for the persisted regression model.
pub const MODEL_SLOT: &str = "model";

/// Facts about a fitted model that inference must not guess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Feature layout the forest was fit on.
    pub feature_shape: FeatureShape,
    /// When the training run finished.
    pub trained_at: DateTime<Utc>,
    /// Number of usable training rows.
    pub samples: usize,
}

/// The model slot's payload: metadata plus the fitted forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    pub forest: RandomForestRegressor,
}

/// File-backed store for the current encoding/model slot pair.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open (and create if needed) an artifact directory.
    pub fn open(dir: impl Into<PathBuf>) -> SchedulerResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the slots.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether both slots are populated.
    pub fn is_populated(&self) -> bool {
        self.slot_path(ENCODING_SLOT).is_file() && self.slot_path(MODEL_SLOT).is_file()
    }

    /// Persist a freshly fitted encoding/model pair, replacing the current
    /// slots.
    pub fn save(&self, encoding: &CategoryEncoding, model: &ModelArtifact) -> SchedulerResult<()> {
        self.write_slot(ENCODING_SLOT, &bincode::serialize(encoding)?)?;
        self.write_slot(MODEL_SLOT, &bincode::serialize(model)?)?;
        tracing::debug!(dir = %self.dir.display(), "artifacts saved");
        Ok(())
    }

    /// Load the current encoding/model pair.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::ModelNotFound`] when either slot is missing;
    /// callers surface that as "train first".
    pub fn load(&self) -> SchedulerResult<(CategoryEncoding, ModelArtifact)> {
        let encoding = bincode::deserialize(&self.read_slot(ENCODING_SLOT)?)?;
        let model = bincode::deserialize(&self.read_slot(MODEL_SLOT)?)?;
        Ok((encoding, model))
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.bin"))
    }

    /// Write through a temp sibling then rename, so a failed write never
    /// clobbers the current slot.
    fn write_slot(&self, slot: &str, bytes: &[u8]) -> SchedulerResult<()> {
        let target = self.slot_path(slot);
        let staging = self.dir.join(format!("{slot}.bin.tmp"));
        fs::write(&staging, bytes)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }

    fn read_slot(&self, slot: &str) -> SchedulerResult<Vec<u8>> {
        match fs::read(self.slot_path(slot)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(SchedulerError::ModelNotFound {
                    slot_dir: self.dir.clone(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::forest::ForestConfig;

    fn sample_artifacts() -> (CategoryEncoding, ModelArtifact) {
        let encoding = CategoryEncoding::fit(["Terra", "Gaming"]);
        let forest = RandomForestRegressor::fit(
            &[vec![0.0], vec![1.0]],
            &[1260.0, 1140.0],
            &ForestConfig {
                trees: 10,
                seed: Some(1),
                ..ForestConfig::default()
            },
        );
        let model = ModelArtifact {
            metadata: ModelMetadata {
                feature_shape: FeatureShape::NameOnly,
                trained_at: Utc::now(),
                samples: 2,
            },
            forest,
        };
        (encoding, model)
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(dir.path()).unwrap();
        let (encoding, model) = sample_artifacts();

        assert!(!store.is_populated());
        store.save(&encoding, &model).unwrap();
        assert!(store.is_populated());

        let (loaded_encoding, loaded_model) = store.load().unwrap();
        assert_eq!(loaded_encoding, encoding);
        assert_eq!(loaded_model.metadata.samples, 2);
        assert_eq!(loaded_model.metadata.feature_shape, FeatureShape::NameOnly);
    }

    #[test]
    fn missing_slots_report_model_not_found() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(dir.path().join("models")).unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, SchedulerError::ModelNotFound { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn save_replaces_the_previous_slot_pair() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::open(dir.path()).unwrap();
        let (encoding, model) = sample_artifacts();
        store.save(&encoding, &model).unwrap();

        let richer = CategoryEncoding::fit(["Terra", "Gaming", "Reading"]);
        store.save(&richer, &model).unwrap();
        let (loaded, _) = store.load().unwrap();
        assert_eq!(loaded.len(), 3);
    }
}
