//! Categorical encoding of task names.
//!
//! The regression model cannot consume strings, so distinct task names are
//! mapped to dense integer codes. The mapping is fit once per training run
//! over the sorted distinct names, which makes re-fitting on the same set
//! reproduce the exact same codes - a persisted model stays valid against a
//! freshly loaded encoding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};

/// Deterministic bijection from task name to dense integer code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEncoding {
    codes: BTreeMap<String, usize>,
}

impl CategoryEncoding {
    /// Fit an encoding over a sequence of names (duplicates welcome).
    ///
    /// Codes are assigned in sorted order of the distinct names, starting
    /// at zero.
    pub fn fit<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut codes: BTreeMap<String, usize> = names
            .into_iter()
            .map(|name| (name.as_ref().to_string(), 0))
            .collect();
        for (code, slot) in codes.values_mut().enumerate() {
            *slot = code;
        }
        Self { codes }
    }

    /// Look up the code for a name.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::UnknownCategory`] for names absent at fit
    /// time.
    pub fn encode(&self, name: &str) -> SchedulerResult<usize> {
        self.codes
            .get(name)
            .copied()
            .ok_or_else(|| SchedulerError::UnknownCategory {
                name: name.to_string(),
            })
    }

    /// Whether a name was present at fit time.
    pub fn contains(&self, name: &str) -> bool {
        self.codes.contains_key(name)
    }

    /// Number of distinct names in the fitted vocabulary.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True when no names were fitted.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
