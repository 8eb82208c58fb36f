use std::path::PathBuf;

use thiserror::Error;

/// Core error type for the Dayline scheduling pipeline
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Clock strings that do not match `H:MM AM|PM`
    #[error("invalid clock time '{value}': expected H:MM AM/PM")]
    TimeParse { value: String },

    /// Training attempted with nothing to learn from
    #[error("no usable training data ({skipped} rows skipped)")]
    Training { skipped: usize },

    /// Inference attempted before training, or after artifact loss
    #[error("no trained model in '{}': train the scheduler first", .slot_dir.display())]
    ModelNotFound { slot_dir: PathBuf },

    /// Inference requested for a name outside the training vocabulary
    #[error("task '{name}' was never seen during training: retrain or drop it")]
    UnknownCategory { name: String },

    /// Artifact blob (de)serialization errors
    #[error("artifact codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Artifact file I/O errors
    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Predicted-schedule storage errors
    #[error("schedule store error: {0}")]
    Store(#[from] rusqlite::Error),
}

/// Result type alias for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

impl SchedulerError {
    /// True for conditions the caller can recover from without operator
    /// intervention (train first, retrain, or fix the input).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TimeParse { .. }
                | Self::Training { .. }
                | Self::ModelNotFound { .. }
                | Self::UnknownCategory { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SchedulerError::TimeParse {
            value: "25:00 XM".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid clock time '25:00 XM': expected H:MM AM/PM"
        );

        let err = SchedulerError::UnknownCategory {
            name: "Stargazing".to_string(),
        };
        assert!(err.to_string().contains("Stargazing"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(SchedulerError::Training { skipped: 3 }.is_recoverable());
        assert!(SchedulerError::ModelNotFound {
            slot_dir: PathBuf::from("/tmp/models"),
        }
        .is_recoverable());

        let io = SchedulerError::Io(std::io::Error::other("disk gone"));
        assert!(!io.is_recoverable());
    }
}
