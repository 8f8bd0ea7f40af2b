//! Batched matrix-multiply capability surface.
//!
//! This module is intentionally minimal:
//! - It defines the *interface* the distance computation relies on,
//!   plus one provider; it does not hand-roll a gemm.
//! - It keeps the scalar type generic (works for `f32` and `f64`).
//!
//! Rationale:
//! - The cross term of the quadratic expansion is one batched matrix
//!   multiply, and an optimized gemm is precisely the kind of thing an
//!   external linear-algebra backend does better than ad-hoc loops.
//!   Keeping the seam narrow lets callers substitute a BLAS-backed or
//!   accelerator-backed provider without touching the distance code.
//! - The shape contract is the whole contract: providers decide their
//!   own tiling, threading, and accumulation order. Reduction-order
//!   rounding differences are absorbed downstream by the clamp step.

use ndarray::linalg::general_mat_mul;
use ndarray::{Array3, ArrayView3, NdFloat};

/// Batched product of row-vector sets: `C[b] = X[b] · Y[b]ᵀ`.
///
/// For `x` of shape `(B, N, D)` and `y` of shape `(B, M, D)`, the result
/// has shape `(B, N, M)` with `C[b][i][j] = X[b][i] · Y[b][j]`.
///
/// Implementations may assume the caller has already validated that the
/// batch counts and feature dimensions agree.
pub trait BatchedMatMul<A> {
    /// Compute `X[b] · Y[b]ᵀ` for every batch element.
    fn gemm_nt(&self, x: ArrayView3<A>, y: ArrayView3<A>) -> Array3<A>;
}

/// Default provider backed by `ndarray`'s `general_mat_mul`.
///
/// Runs the batch elements sequentially; each per-batch multiply goes
/// through `matrixmultiply`'s blocked gemm kernels. Empty batches and
/// zero-row inputs produce the correspondingly empty output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NdarrayGemm;

impl<A: NdFloat> BatchedMatMul<A> for NdarrayGemm {
    fn gemm_nt(&self, x: ArrayView3<A>, y: ArrayView3<A>) -> Array3<A> {
        let (batches, n, _) = x.dim();
        let m = y.dim().1;
        let mut out = Array3::zeros((batches, n, m));

        for ((xb, yb), mut cb) in x
            .outer_iter()
            .zip(y.outer_iter())
            .zip(out.outer_iter_mut())
        {
            general_mat_mul(A::one(), &xb, &yb.t(), A::zero(), &mut cb);
        }

        out
    }
}
