//! Extraction errors.

use thiserror::Error;

/// The page could not be analyzed at all.
///
/// An empty field list is not an error; callers report it as a status.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Page unloaded: {0}")]
    PageUnloaded(String),

    #[error("Document has no body element")]
    NoBody,
}
