//! Softened Newtonian gravity for the n-body engine
//!
//! Accelerations are computed with dense N x N pairwise matrices rather than
//! a per-body loop:
//!
//! ```text
//! Dx[i][j] = x_j - x_i        (likewise Dy, Dz)
//! W[i][j]  = (Dx^2 + Dy^2 + Dz^2 + eps^2)^(-3/2),   W[i][i] = 0
//! Ax       = G * (Dx .* W) * M                      (likewise Ay, Az)
//! ```
//!
//! Only the diagonal of `W` is zeroed. An infinite off-diagonal weight can
//! only come from coincident bodies with zero softening and is left in place
//! so that the resulting NaN reaches the caller.
//!
//! Arrays are `nalgebra` dense matrices, which store columns contiguously.
//! Each N x 3 array is still one flat buffer and every pairwise matrix is
//! built and reduced column by column, so the accumulation order over `j`
//! is fixed and results are bit-for-bit repeatable. Row-major storage would
//! not change any value, only the memory walk.

use nalgebra::{DMatrix, DVector};

/// Source of accelerations for the integrator
/// Implementations return an N x 3 array, one row per body
pub trait AccelerationField {
    fn acceleration(&self, masses: &DVector<f64>, positions: &DMatrix<f64>) -> DMatrix<f64>;
}

/// Direct-sum Newtonian gravity with Plummer softening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftenedGravity {
    pub g: f64, // gravitational constant
    pub softening: f64, // softening length
}

impl AccelerationField for SoftenedGravity {
    fn acceleration(&self, masses: &DVector<f64>, positions: &DMatrix<f64>) -> DMatrix<f64> {
        compute_acceleration(self.softening, self.g, masses, positions)
    }
}

/// Pairwise displacement matrices `[Dx, Dy, Dz]` with `D[i][j] = R[j] - R[i]`
pub fn pairwise_displacements(positions: &DMatrix<f64>) -> [DMatrix<f64>; 3] {
    let n = positions.nrows();
    let axis = |k: usize| DMatrix::from_fn(n, n, |i, j| positions[(j, k)] - positions[(i, k)]);
    [axis(0), axis(1), axis(2)]
}

/// Softened inverse-cube weights `W[i][j] = (|D[i][j]|^2 + eps^2)^(-3/2)`
/// with the self terms `W[i][i]` set to zero
pub fn inverse_cube_weights(displacements: &[DMatrix<f64>; 3], softening: f64) -> DMatrix<f64> {
    let [dx, dy, dz] = displacements;
    let eps2 = softening * softening;

    let mut s = dx.component_mul(dx) + dy.component_mul(dy) + dz.component_mul(dz);
    s.add_scalar_mut(eps2);

    // 0^(-3/2) is +inf on the diagonal when eps = 0
    let mut w = s.map(|d2| d2.powf(-1.5));
    w.fill_diagonal(0.0);
    w
}

/// Acceleration on every body from all others
///
/// `A[i] = G * sum_{j != i} M[j] * (R[j] - R[i]) / (|R[j] - R[i]|^2 + eps^2)^(3/2)`
///
/// Pure function of its inputs. Non-finite values propagate.
pub fn compute_acceleration(
    softening: f64,
    g: f64,
    masses: &DVector<f64>,
    positions: &DMatrix<f64>,
) -> DMatrix<f64> {
    let n = positions.nrows();
    let d = pairwise_displacements(positions);
    let w = inverse_cube_weights(&d, softening);

    let mut a = DMatrix::zeros(n, 3);
    for (k, dk) in d.iter().enumerate() {
        // Matrix-vector product over j: (Dk .* W) * M
        let ak = (dk.component_mul(&w) * masses) * g;
        a.set_column(k, &ak);
    }
    a
}
