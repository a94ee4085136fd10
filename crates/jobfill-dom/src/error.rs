//! DOM errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    #[error("Unknown node: {0}")]
    UnknownNode(usize),

    #[error("Node {0} is not an element")]
    NotAnElement(usize),

    #[error("Node {0} is detached from the document")]
    Detached(usize),

    #[error("Handle belongs to document {got}, not {expected}")]
    ForeignHandle { expected: u64, got: u64 },

    #[error("Document has been unloaded")]
    Unloaded,

    #[error("Node {0} is not a select element")]
    NotASelect(usize),

    #[error("Cannot insert node {0} inside itself")]
    HierarchyRequest(usize),
}
