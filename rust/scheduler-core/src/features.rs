//! Feature layout shared by training and inference.
//!
//! The source of a long-standing training/inference mismatch in planners of
//! this kind is an implicit feature convention: one side trains with a
//! coarse hour-of-day column, the other predicts without it. Here the shape
//! is an explicit value chosen at training time and persisted inside the
//! model artifact, so inference always rebuilds rows of the same width.

use serde::{Deserialize, Serialize};

use crate::clock;

/// Which columns the regression model was fit on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureShape {
    /// Encoded task name only.
    #[default]
    NameOnly,
    /// Encoded task name plus a coarse hour-of-day bucket (0-23).
    NameAndHour,
}

impl FeatureShape {
    /// Hour bucket supplied at inference time when the shape carries one.
    ///
    /// The true future hour is unknown when predicting, so a fixed midday
    /// bucket stands in and the model leans on the name column. This is a
    /// known approximation, kept deliberately.
    pub const DEFAULT_HOUR_BUCKET: u32 = 12;

    /// Number of columns in a feature row.
    pub fn width(self) -> usize {
        match self {
            Self::NameOnly => 1,
            Self::NameAndHour => 2,
        }
    }

    /// Feature row for a training observation.
    pub fn training_row(self, code: usize, minutes: u32) -> Vec<f64> {
        match self {
            Self::NameOnly => vec![code as f64],
            Self::NameAndHour => vec![code as f64, f64::from(clock::hour_bucket(minutes))],
        }
    }

    /// Feature row for an inference request (no observed time available).
    pub fn inference_row(self, code: usize) -> Vec<f64> {
        match self {
            Self::NameOnly => vec![code as f64],
            Self::NameAndHour => vec![code as f64, f64::from(Self::DEFAULT_HOUR_BUCKET)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_match_declared_width() {
        for shape in [FeatureShape::NameOnly, FeatureShape::NameAndHour] {
            assert_eq!(shape.training_row(3, 1140).len(), shape.width());
            assert_eq!(shape.inference_row(3).len(), shape.width());
        }
    }

    #[test]
    fn hour_bucket_is_derived_from_the_observed_time() {
        let row = FeatureShape::NameAndHour.training_row(0, 1140);
        assert_eq!(row, vec![0.0, 19.0]);
    }

    #[test]
    fn inference_uses_the_fixed_bucket() {
        let row = FeatureShape::NameAndHour.inference_row(5);
        assert_eq!(row, vec![5.0, f64::from(FeatureShape::DEFAULT_HOUR_BUCKET)]);
    }
}
