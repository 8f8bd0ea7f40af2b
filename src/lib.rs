//! Batched pairwise squared-distance matrices for metric learning.
//!
//! `pairdist` computes, for batches of point sets, the full N×M matrix of
//! pairwise squared Euclidean distances between two sets of vectors:
//!
//! - **Norms**: [`row_norms_squared`], [`batch_row_norms_squared`]
//! - **Cross term**: the [`BatchedMatMul`] capability, with [`NdarrayGemm`]
//!   as the default provider
//! - **Distance matrices**: [`pairwise_sq_distances`] and friends
//!
//! # The Quadratic Expansion
//!
//! The crate leans on one identity:
//!
//! ```text
//! ‖x − y‖² = ‖x‖² + ‖y‖² − 2·x·y
//! ```
//!
//! Applied to whole batches, the N·M·D subtract-and-square workload
//! becomes a single batched matrix multiply plus two norm vectors that
//! broadcast across rows and columns. Optimized gemm kernels execute the
//! multiply far faster than elementwise broadcasting, which is why
//! distance-matrix code in embedding pipelines is written this way.
//!
//! The price is cancellation: when `x ≈ y`, the expansion subtracts two
//! nearly-equal quantities and rounding can produce a small negative
//! "squared distance". Every entry is clamped to `[0, +∞)` as a final
//! step, with NaN passed through rather than masked.
//!
//! # Where This Sits
//!
//! Triplet and contrastive losses (FaceNet, Schroff et al. 2015) consume
//! an N×M distance matrix per batch element to mine hard positives and
//! negatives. This crate is that building block and nothing more: no
//! model, no loss, no gradients. Embedded in a differentiable pipeline,
//! the surrounding system derives gradients from the same expansion.
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use pairdist::pairwise_sq_distances;
//!
//! // One batch: two 2-D points against two 2-D points.
//! let x = array![[[0.0_f32, 0.0], [1.0, 1.0]]];
//! let y = array![[[0.0_f32, 0.0], [3.0, 4.0]]];
//!
//! let dist = pairwise_sq_distances(x.view(), y.view()).unwrap();
//!
//! assert_eq!(dist.dim(), (1, 2, 2));
//! assert_eq!(dist[[0, 1, 1]], 13.0); // (1-3)² + (1-4)²
//! ```
//!
//! # References
//!
//! - Schroff, Kalenichenko, Philbin (2015). "FaceNet: A Unified Embedding
//!   for Face Recognition and Clustering"
//! - Hermans, Beyer, Leibe (2017). "In Defense of the Triplet Loss for
//!   Person Re-Identification" (batch-hard mining over distance matrices)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod matmul;
mod norms;
mod pairwise;

pub use error::PairwiseError;
pub use matmul::{BatchedMatMul, NdarrayGemm};
pub use norms::{batch_row_norms_squared, row_norms_squared};
pub use pairwise::{
    pairwise_distances, pairwise_sq_distances, pairwise_sq_distances_direct,
    pairwise_sq_distances_self, pairwise_sq_distances_with,
};
