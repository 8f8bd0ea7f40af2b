//! Batched pairwise squared Euclidean distance matrices.
//!
//! # Algorithm
//!
//! For `x` of shape `(B, N, D)` and `y` of shape `(B, M, D)`, the output
//! `(B, N, M)` matrix is built from the quadratic expansion
//!
//! ```text
//! ‖xᵢ − yⱼ‖² = ‖xᵢ‖² + ‖yⱼ‖² − 2·(xᵢ · yⱼ)
//! ```
//!
//! so the O(N·M·D) elementwise subtract-and-square workload collapses
//! into one batched matrix multiply (the cross term, `X·Yᵀ`) plus two
//! O(K·D) norm passes. The norm terms broadcast: `‖xᵢ‖²` across every
//! column of row `i`, `‖yⱼ‖²` down every row of column `j`.
//!
//! # Clamping
//!
//! The expansion subtracts two large, nearly-equal quantities when `xᵢ`
//! and `yⱼ` are close, and rounding can leave a small negative where the
//! true squared distance is ≥ 0. Every entry is therefore clamped to
//! `[0, +∞)` as the final step. The clamp preserves NaN: an upstream
//! NaN must surface as NaN, not be silently rewritten to 0.
//!
//! # Direct path
//!
//! [`pairwise_sq_distances_direct`] computes the same matrix by summing
//! squared differences elementwise. It exists as a numerically
//! transparent reference (and is competitive for tiny N·M); the
//! expansion path is the one to use at scale.

use ndarray::{Array3, ArrayView3, NdFloat};

use crate::error::PairwiseError;
use crate::matmul::{BatchedMatMul, NdarrayGemm};
use crate::norms::batch_row_norms_squared;

/// Lower clamp that lets NaN through.
///
/// `v < 0` is false for NaN, so NaN falls into the identity branch.
/// `A::max(v, 0)` would instead return 0 for NaN and mask upstream
/// numerical problems.
#[inline]
fn clamp_non_negative<A: NdFloat>(v: A) -> A {
    if v < A::zero() {
        A::zero()
    } else {
        v
    }
}

fn check_shapes<A>(x: &ArrayView3<A>, y: &ArrayView3<A>) -> Result<(), PairwiseError> {
    let (bx, _, dx) = x.dim();
    let (by, _, dy) = y.dim();
    if bx != by {
        return Err(PairwiseError::BatchMismatch { x: bx, y: by });
    }
    if dx != dy {
        return Err(PairwiseError::DimensionMismatch { x: dx, y: dy });
    }
    Ok(())
}

/// Expansion + clamp over pre-validated inputs.
fn expand_and_clamp<A, B>(backend: &B, x: ArrayView3<A>, y: ArrayView3<A>) -> Array3<A>
where
    A: NdFloat,
    B: BatchedMatMul<A>,
{
    let mut dist = backend.gemm_nt(x, y);
    let x_norms = batch_row_norms_squared(x);
    let y_norms = batch_row_norms_squared(y);
    let two = A::one() + A::one();

    for ((mut db, xnb), ynb) in dist
        .outer_iter_mut()
        .zip(x_norms.outer_iter())
        .zip(y_norms.outer_iter())
    {
        for (mut row, &xn) in db.outer_iter_mut().zip(xnb.iter()) {
            for (d, &yn) in row.iter_mut().zip(ynb.iter()) {
                *d = clamp_non_negative(xn + yn - two * *d);
            }
        }
    }

    dist
}

/// Pairwise squared Euclidean distances between two batched vector sets.
///
/// For `x` of shape `(B, N, D)` and `y` of shape `(B, M, D)`, returns a
/// `(B, N, M)` matrix where `out[b][i][j] = ‖x[b][i] − y[b][j]‖²`. Uses
/// the default [`NdarrayGemm`] provider for the cross term.
///
/// Every entry of the result is non-negative for finite inputs; NaN
/// inputs propagate to the affected entries. `N`, `M`, and `B` may each
/// be zero, giving a correctly-shaped empty result.
///
/// # Errors
///
/// [`PairwiseError::BatchMismatch`] if the batch counts differ, and
/// [`PairwiseError::DimensionMismatch`] if the feature dimensions
/// differ. Nothing is computed in either case.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use pairdist::pairwise_sq_distances;
///
/// let x = array![[[0.0_f32, 0.0], [1.0, 1.0]]];
/// let y = array![[[0.0_f32, 0.0], [3.0, 4.0]]];
///
/// let dist = pairwise_sq_distances(x.view(), y.view()).unwrap();
/// assert_eq!(dist[[0, 0, 0]], 0.0);
/// assert_eq!(dist[[0, 0, 1]], 25.0);
/// assert_eq!(dist[[0, 1, 0]], 2.0);
/// assert_eq!(dist[[0, 1, 1]], 13.0); // (1-3)² + (1-4)²
/// ```
pub fn pairwise_sq_distances<A: NdFloat>(
    x: ArrayView3<A>,
    y: ArrayView3<A>,
) -> Result<Array3<A>, PairwiseError> {
    pairwise_sq_distances_with(&NdarrayGemm, x, y)
}

/// [`pairwise_sq_distances`] with an explicit [`BatchedMatMul`] provider.
///
/// Use this to route the cross term through a BLAS-backed or
/// accelerator-backed gemm. The provider only sees shape-validated
/// inputs.
pub fn pairwise_sq_distances_with<A, B>(
    backend: &B,
    x: ArrayView3<A>,
    y: ArrayView3<A>,
) -> Result<Array3<A>, PairwiseError>
where
    A: NdFloat,
    B: BatchedMatMul<A>,
{
    check_shapes(&x, &y)?;
    Ok(expand_and_clamp(backend, x, y))
}

/// Pairwise squared distances of a batch against itself.
///
/// Returns the `(B, N, N)` matrix of `‖x[b][i] − x[b][j]‖²`. This is the
/// matrix triplet-mining loops consume: the diagonal is ~0 (exactly 0 up
/// to rounding, then clamped) and the matrix is symmetric up to rounding.
///
/// Infallible: a batch always agrees with itself on shape.
#[must_use]
pub fn pairwise_sq_distances_self<A: NdFloat>(x: ArrayView3<A>) -> Array3<A> {
    expand_and_clamp(&NdarrayGemm, x, x)
}

/// Pairwise (non-squared) Euclidean distances.
///
/// Square root of [`pairwise_sq_distances`], entry by entry. The sqrt is
/// taken after the clamp, so finite inputs never produce NaN here.
///
/// # Errors
///
/// Same shape errors as [`pairwise_sq_distances`].
pub fn pairwise_distances<A: NdFloat>(
    x: ArrayView3<A>,
    y: ArrayView3<A>,
) -> Result<Array3<A>, PairwiseError> {
    let mut dist = pairwise_sq_distances(x, y)?;
    dist.mapv_inplace(|v| v.sqrt());
    Ok(dist)
}

/// Reference path: elementwise sum of squared differences.
///
/// Computes the same `(B, N, M)` matrix as [`pairwise_sq_distances`] by
/// iterating dimensions directly, with no matmul and no cancellation.
/// O(B·N·M·D) — use it for verification and tiny inputs, not at scale.
///
/// # Errors
///
/// Same shape errors as [`pairwise_sq_distances`].
pub fn pairwise_sq_distances_direct<A: NdFloat>(
    x: ArrayView3<A>,
    y: ArrayView3<A>,
) -> Result<Array3<A>, PairwiseError> {
    check_shapes(&x, &y)?;

    let (batches, n, _) = x.dim();
    let m = y.dim().1;
    let mut out = Array3::zeros((batches, n, m));

    for ((xb, yb), mut ob) in x
        .outer_iter()
        .zip(y.outer_iter())
        .zip(out.outer_iter_mut())
    {
        for (xi, mut row) in xb.outer_iter().zip(ob.outer_iter_mut()) {
            for (yj, o) in yb.outer_iter().zip(row.iter_mut()) {
                *o = xi.iter().zip(yj.iter()).fold(A::zero(), |acc, (&a, &b)| {
                    let diff = a - b;
                    acc + diff * diff
                });
            }
        }
    }

    Ok(out)
}
