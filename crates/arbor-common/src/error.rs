//! Error types for ArborDB.

use crate::slot::NodeId;
use thiserror::Error;

/// Result type alias using ArborError.
pub type Result<T> = std::result::Result<T, ArborError>;

/// Errors that can occur in ArborDB operations.
#[derive(Debug, Error)]
pub enum ArborError {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Parameter errors
    #[error("invalid order {0}: must be between 3 and {max}", max = crate::slot::MAX_ORDER)]
    InvalidOrder(usize),

    // Store errors
    #[error("node not found: {0}")]
    InvalidNodeId(NodeId),

    #[error("node {0} has been freed")]
    NodeFreed(NodeId),

    #[error("index file corrupted: {0}")]
    Corrupt(String),

    // Tree errors
    #[error("key not found")]
    KeyNotFound,

    #[error("tree invariant violated: {0}")]
    InvariantViolation(String),
}
