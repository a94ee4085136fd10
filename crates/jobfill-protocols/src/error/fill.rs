//! Per-field write errors.

use thiserror::Error;

/// Why one field could not be written. Never aborts the remaining fields.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FillError {
    #[error("Stale element handle: {0}")]
    StaleHandle(String),

    #[error("Element is not editable: {0}")]
    NotEditable(String),

    #[error("Unsupported input kind: {0}")]
    UnsupportedKind(String),

    #[error("No option matches {value:?} in select {field}")]
    NoMatchingOption { field: String, value: String },

    #[error("Choice {field} does not match {value:?}")]
    NoMatchingChoice { field: String, value: String },

    #[error("Nothing to write for {0}")]
    EmptyValue(String),
}
