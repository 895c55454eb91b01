//! Damped (Tikhonov-regularized) pseudo-inverse via SVD.
//!
//! `J = U Σ Vᵀ`, `J⁺ = V Σ⁺ Uᵀ` with `σ⁺ = σ / (σ² + λ²)`. With `λ = 0` this is
//! the exact Moore-Penrose inverse `1/σ`, which is only bounded when `J` has
//! full rank.

use nalgebra::DMatrix;

/// Default damping used by the whole-body IK.
pub const DEFAULT_DAMPING: f64 = 1e-2;

/// Damped pseudo-inverse of `j` (`m × n` in, `n × m` out).
///
/// Never fails: an empty `j`, or a decomposition without singular vectors,
/// yields the zero matrix, which commands no motion.
pub fn damped_pseudo_inverse(j: &DMatrix<f64>, damping: f64) -> DMatrix<f64> {
    let (m, n) = j.shape();
    if j.is_empty() {
        return DMatrix::zeros(n, m);
    }
    let svd = j.clone().svd(true, true);
    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
        return DMatrix::zeros(n, m);
    };

    let lambda_sq = damping * damping;
    let inverted = svd.singular_values.map(|s| {
        if damping > 0.0 {
            s / (s * s + lambda_sq)
        } else {
            1.0 / s
        }
    });

    // V Σ⁺ Uᵀ: scale the columns of V (rows of Vᵀ) by σ⁺.
    let mut v = v_t.transpose();
    for (mut col, &s) in v.column_iter_mut().zip(inverted.iter()) {
        col *= s;
    }
    v * u.transpose()
}
