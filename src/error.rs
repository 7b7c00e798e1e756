//! Error types for the face grouping core.

use thiserror::Error;

/// Errors produced by embedding construction and similarity scoring.
///
/// Missing embeddings and empty input batches are not errors; they have
/// defined fallback behavior (score 0 and an empty group list).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FaceError {
    /// Two embeddings in the same batch have different dimensionality.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An embedding was constructed from an empty vector.
    #[error("embedding must contain at least one component")]
    EmptyEmbedding,
}
