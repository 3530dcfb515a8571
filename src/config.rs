//! Model options: saturation cap, worker budget and progress reporting.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, types::Count};

/// Options controlling how a [`BagOfWords`](crate::BagOfWords) counts and schedules work.
///
/// Missing fields fall back to their defaults when deserializing, so a
/// config file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BagOfWordsConfig {
    /// Upper bound on the counted occurrences of one token within one sequence.
    ///
    /// 1 gives a binary presence encoding; larger values give bounded
    /// term frequencies.
    pub maximum_occurrence: Count,

    /// Worker budget for batch operations.
    ///
    /// `None` runs on the global Rayon pool; `Some(n)` runs on a dedicated
    /// pool of `n` threads.
    pub parallelism: Option<usize>,

    /// Whether batch operations render a progress bar.
    pub show_progress: bool,
}

impl Default for BagOfWordsConfig {
    fn default() -> Self {
        Self {
            maximum_occurrence: 1,
            parallelism: None,
            show_progress: false,
        }
    }
}

impl BagOfWordsConfig {
    /// Checks that every field is within its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMaximumOccurrence`] for a zero cap and
    /// [`ConfigError::InvalidParallelism`] for a zero worker budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maximum_occurrence == 0 {
            return Err(ConfigError::InvalidMaximumOccurrence(self.maximum_occurrence));
        }
        if let Some(0) = self.parallelism {
            return Err(ConfigError::InvalidParallelism(0));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or a range error
    /// from [`validate`](Self::validate).
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_json_str`](Self::from_json_str).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
