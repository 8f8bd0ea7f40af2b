//! Error types for pairwise distance computation.

use thiserror::Error;

/// Errors from pairwise distance computation.
///
/// Both variants are shape contract violations between the two input
/// tensors. They are detected up front, before any norm or matmul work,
/// and no partial result is ever produced.
///
/// Element-type mismatches (mixing `f32` and `f64`) cannot occur: both
/// inputs share the scalar type parameter, so the compiler rejects them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PairwiseError {
    /// Batch counts differ between the two inputs.
    #[error("batch count mismatch: x has {x} batches, y has {y}")]
    BatchMismatch {
        /// Batch count of the first input.
        x: usize,
        /// Batch count of the second input.
        y: usize,
    },

    /// Feature dimensions differ between the two inputs.
    #[error("feature dimension mismatch: x vectors have {x} dims, y vectors have {y}")]
    DimensionMismatch {
        /// Feature dimension of the first input.
        x: usize,
        /// Feature dimension of the second input.
        y: usize,
    },
}
