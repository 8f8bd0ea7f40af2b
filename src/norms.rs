//! Squared row norms for batches of vectors.
//!
//! The quadratic expansion `‖x − y‖² = ‖x‖² + ‖y‖² − 2x·y` needs the
//! squared norm of every row vector on each side. These helpers compute
//! them in one pass per row, at the same precision as the input.
//!
//! A sum of squares is non-negative by construction, so no clamping
//! happens here — spurious negatives only appear later, when the norm
//! and cross terms are combined.

use ndarray::{Array1, Array2, ArrayView2, ArrayView3, Axis, NdFloat};

/// Squared L2 norm of every row of a matrix.
///
/// For input of shape `(K, D)`, returns shape `(K,)` where
/// `out[k] = Σ_d m[k][d]²`.
///
/// # Example
///
/// ```rust
/// use ndarray::array;
/// use pairdist::row_norms_squared;
///
/// let m = array![[3.0_f32, 4.0], [1.0, 0.0]];
/// let norms = row_norms_squared(m.view());
/// assert_eq!(norms[0], 25.0);
/// assert_eq!(norms[1], 1.0);
/// ```
#[must_use]
pub fn row_norms_squared<A: NdFloat>(m: ArrayView2<A>) -> Array1<A> {
    m.map_axis(Axis(1), |row| row.fold(A::zero(), |acc, &v| acc + v * v))
}

/// Squared L2 norm of every row vector in a batch of matrices.
///
/// For input of shape `(B, K, D)`, returns shape `(B, K)` where
/// `out[b][k] = Σ_d t[b][k][d]²`. Batch elements are independent.
///
/// Empty axes are fine: a `(0, K, D)` or `(B, 0, D)` input yields the
/// correspondingly empty output.
#[must_use]
pub fn batch_row_norms_squared<A: NdFloat>(t: ArrayView3<A>) -> Array2<A> {
    t.map_axis(Axis(2), |row| row.fold(A::zero(), |acc, &v| acc + v * v))
}
