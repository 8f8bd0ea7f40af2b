//! Property-based tests for the expansion path.
//!
//! These verify that the matmul-based quadratic expansion agrees with a
//! direct elementwise reference across random shapes and value ranges,
//! and that the clamp invariants hold unconditionally.

use ndarray::Array3;
use pairdist::{pairwise_sq_distances, pairwise_sq_distances_self};
use proptest::prelude::*;

// Reference implementation: plain sum of squared differences.
fn sq_dist_reference(x: &[f32], y: &[f32]) -> f32 {
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum()
}

/// Random (B, N, D) / (B, M, D) tensor pair with shared B and D.
fn arb_batch_pair() -> impl Strategy<Value = (Array3<f32>, Array3<f32>)> {
    (1usize..=3, 1usize..=6, 1usize..=6, 1usize..=32).prop_flat_map(|(b, n, m, d)| {
        (
            proptest::collection::vec(-100.0f32..100.0, b * n * d),
            proptest::collection::vec(-100.0f32..100.0, b * m * d),
        )
            .prop_map(move |(xv, yv)| {
                (
                    Array3::from_shape_vec((b, n, d), xv).unwrap(),
                    Array3::from_shape_vec((b, m, d), yv).unwrap(),
                )
            })
    })
}

/// Random single-batch tensor for self-distance properties.
fn arb_batch() -> impl Strategy<Value = Array3<f32>> {
    (1usize..=2, 1usize..=8, 1usize..=32).prop_flat_map(|(b, n, d)| {
        proptest::collection::vec(-100.0f32..100.0, b * n * d)
            .prop_map(move |v| Array3::from_shape_vec((b, n, d), v).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 300,
        ..ProptestConfig::default()
    })]

    /// Expansion matches the elementwise reference entry by entry.
    ///
    /// The expansion subtracts quantities on the order of ‖x‖² + ‖y‖²,
    /// so the tolerance scales with the norm terms rather than with the
    /// (possibly tiny) true distance.
    #[test]
    fn expansion_matches_reference((x, y) in arb_batch_pair()) {
        let dist = pairwise_sq_distances(x.view(), y.view()).unwrap();

        let (batches, n, _) = x.dim();
        let m = y.dim().1;
        prop_assert_eq!(dist.dim(), (batches, n, m));

        for b in 0..batches {
            for i in 0..n {
                let xi: Vec<f32> = x.slice(ndarray::s![b, i, ..]).to_vec();
                for j in 0..m {
                    let yj: Vec<f32> = y.slice(ndarray::s![b, j, ..]).to_vec();
                    let expected = sq_dist_reference(&xi, &yj);
                    let magnitude = xi.iter().map(|v| v * v).sum::<f32>()
                        + yj.iter().map(|v| v * v).sum::<f32>();
                    let tolerance = magnitude * 1e-5 + 1e-2;
                    let got = dist[[b, i, j]];
                    prop_assert!(
                        (got - expected).abs() < tolerance,
                        "mismatch at ({}, {}, {}): {} vs {} (tol: {})",
                        b, i, j, got, expected, tolerance
                    );
                }
            }
        }
    }

    /// Every entry is non-negative, whatever the rounding did.
    #[test]
    fn all_entries_non_negative((x, y) in arb_batch_pair()) {
        let dist = pairwise_sq_distances(x.view(), y.view()).unwrap();
        for &d in dist.iter() {
            prop_assert!(d >= 0.0, "negative distance survived the clamp: {}", d);
        }
    }

    /// Self-distance diagonal is ~0 relative to vector magnitude.
    #[test]
    fn self_diagonal_near_zero(x in arb_batch()) {
        let dist = pairwise_sq_distances_self(x.view());
        let (batches, n, _) = x.dim();

        for b in 0..batches {
            for i in 0..n {
                let norm_sq: f32 = x.slice(ndarray::s![b, i, ..])
                    .iter()
                    .map(|v| v * v)
                    .sum();
                let tolerance = norm_sq * 1e-5 + 1e-3;
                prop_assert!(
                    dist[[b, i, i]] < tolerance,
                    "diagonal ({}, {}) = {} exceeds {}",
                    b, i, dist[[b, i, i]], tolerance
                );
            }
        }
    }

    /// Self-distance matrix is symmetric within rounding.
    #[test]
    fn self_matrix_symmetric(x in arb_batch()) {
        let dist = pairwise_sq_distances_self(x.view());
        let (batches, n, _) = x.dim();

        for b in 0..batches {
            for i in 0..n {
                for j in (i + 1)..n {
                    let a = dist[[b, i, j]];
                    let c = dist[[b, j, i]];
                    let tolerance = a.abs() * 1e-5 + 1e-3;
                    prop_assert!(
                        (a - c).abs() < tolerance,
                        "asymmetry at ({}, {}, {}): {} vs {}",
                        b, i, j, a, c
                    );
                }
            }
        }
    }

    /// Swapping the arguments transposes the matrix.
    #[test]
    fn swap_transposes((x, y) in arb_batch_pair()) {
        let xy = pairwise_sq_distances(x.view(), y.view()).unwrap();
        let yx = pairwise_sq_distances(y.view(), x.view()).unwrap();

        let (batches, n, _) = x.dim();
        let m = y.dim().1;
        for b in 0..batches {
            for i in 0..n {
                for j in 0..m {
                    let a = xy[[b, i, j]];
                    let c = yx[[b, j, i]];
                    let tolerance = a.abs() * 1e-5 + 1e-3;
                    prop_assert!(
                        (a - c).abs() < tolerance,
                        "transpose mismatch at ({}, {}, {})",
                        b, i, j
                    );
                }
            }
        }
    }
}
