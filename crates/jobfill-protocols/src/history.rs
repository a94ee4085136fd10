//! Autofill history entries kept in the local store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened on one autofill attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    Success {
        #[serde(default, rename = "fieldsFilled")]
        fields_filled: usize,
    },
    Error {
        error: String,
    },
}

/// One rolling-log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub url: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl HistoryEntry {
    pub fn success(url: impl Into<String>, fields_filled: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            url: url.into(),
            outcome: Outcome::Success { fields_filled },
        }
    }

    pub fn error(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            url: url.into(),
            outcome: Outcome::Error {
                error: error.into(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}
