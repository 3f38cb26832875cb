//! Core state types for the N-body simulation.
//!
//! Bodies are not stored as individual structs. The body set is three dense
//! arrays shared by every body:
//! - positions `R` and velocities `V` as N x 3 matrices (one row per body),
//! - masses `M` as a length-N vector.
//!
//! `SimulationConfig` carries the fixed numerical parameters and
//! `SimulationState` the mutable arrays plus the current time `t`.

use nalgebra::{DMatrix, DVector, Vector3};

use super::error::ConfigurationError;

pub type NVec3 = Vector3<f64>;

/// Immutable parameter bundle for one run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub g: f64, // gravitational constant
    pub softening: f64, // softening length (epsilon, not squared)
    pub dt: f64, // fixed step size
    pub t_end: f64, // time end
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigurationError::TimeStep(self.dt));
        }
        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(ConfigurationError::EndTime(self.t_end));
        }
        if !(self.softening.is_finite() && self.softening >= 0.0) {
            return Err(ConfigurationError::Softening(self.softening));
        }
        Ok(())
    }

    /// Number of steps to reach `t_end`, fixed up front: ceil(t_end / dt)
    pub fn step_count(&self) -> usize {
        (self.t_end / self.dt).ceil() as usize
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            g: 1.0,
            softening: 0.1,
            dt: 0.01,
            t_end: 3.0,
        }
    }
}

/// Mutable simulation state, advanced in place by the integrator
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub t: f64, // time
    pub positions: DMatrix<f64>, // N x 3
    pub velocities: DMatrix<f64>, // N x 3
    pub accelerations: DMatrix<f64>, // N x 3, cached between half-kicks
    pub masses: DVector<f64>, // N, constant for the whole run
}

impl SimulationState {
    /// Build a state at t = 0 from dense arrays. Accelerations start at zero
    /// and are filled in when an integrator is constructed.
    pub fn new(
        positions: DMatrix<f64>,
        velocities: DMatrix<f64>,
        masses: DVector<f64>,
    ) -> Result<Self, ConfigurationError> {
        let n = masses.len();
        check_shape("positions", &positions, n)?;
        check_shape("velocities", &velocities, n)?;

        Ok(Self {
            t: 0.0,
            accelerations: DMatrix::zeros(n, 3),
            positions,
            velocities,
            masses,
        })
    }

    /// Build a state from per-body rows, copied into the dense layout
    pub fn from_rows(
        positions: &[[f64; 3]],
        velocities: &[[f64; 3]],
        masses: &[f64],
    ) -> Result<Self, ConfigurationError> {
        Self::new(rows_to_matrix(positions), rows_to_matrix(velocities), DVector::from_column_slice(masses))
    }

    /// Positions, velocities and accelerations must all be N x 3 with N the
    /// number of masses. Fields are public, so this is re-checked before
    /// integration starts.
    pub fn check_shapes(&self) -> Result<(), ConfigurationError> {
        let n = self.masses.len();
        check_shape("positions", &self.positions, n)?;
        check_shape("velocities", &self.velocities, n)?;
        check_shape("accelerations", &self.accelerations, n)
    }

    pub fn n_bodies(&self) -> usize {
        self.masses.len()
    }

    pub fn position(&self, i: usize) -> NVec3 {
        row3(&self.positions, i)
    }

    pub fn velocity(&self, i: usize) -> NVec3 {
        row3(&self.velocities, i)
    }

    pub fn acceleration(&self, i: usize) -> NVec3 {
        row3(&self.accelerations, i)
    }

    pub fn total_mass(&self) -> f64 {
        self.masses.sum()
    }

    /// Sum of M[i] * V[i]
    pub fn total_momentum(&self) -> NVec3 {
        mass_weighted_sum(&self.velocities, &self.masses)
    }

    /// Mass-weighted mean position. Undefined (NaN) for zero total mass.
    pub fn center_of_mass(&self) -> NVec3 {
        mass_weighted_sum(&self.positions, &self.masses) / self.total_mass()
    }

    /// Shift velocities so that the total momentum is zero.
    ///
    /// One-time preparation, applied before the first acceleration is
    /// computed. A system with zero total mass has no such frame and is
    /// left as it is.
    pub fn to_center_of_momentum_frame(&mut self) {
        let total_mass = self.total_mass();
        if total_mass == 0.0 {
            return;
        }
        let v_cm = self.total_momentum() / total_mass;
        for mut row in self.velocities.row_iter_mut() {
            row[0] -= v_cm.x;
            row[1] -= v_cm.y;
            row[2] -= v_cm.z;
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self
            .velocities
            .row_iter()
            .zip(self.masses.iter())
            .map(|(v, m)| m * v.norm_squared())
            .sum::<f64>()
    }

    /// Potential energy of the softened pair interaction,
    /// -G * sum_{i<j} m_i m_j / sqrt(|r_ij|^2 + eps^2)
    pub fn potential_energy(&self, g: f64, softening: f64) -> f64 {
        let n = self.n_bodies();
        let eps2 = softening * softening;
        let mut u = 0.0;
        for i in 0..n {
            let xi = self.position(i);
            for j in (i + 1)..n {
                let r2 = (self.position(j) - xi).norm_squared();
                u -= self.masses[i] * self.masses[j] / (r2 + eps2).sqrt();
            }
        }
        g * u
    }

    pub fn total_energy(&self, g: f64, softening: f64) -> f64 {
        self.kinetic_energy() + self.potential_energy(g, softening)
    }
}

fn check_shape(what: &'static str, m: &DMatrix<f64>, n: usize) -> Result<(), ConfigurationError> {
    if m.shape() != (n, 3) {
        return Err(ConfigurationError::ShapeMismatch {
            what,
            expected: (n, 3),
            found: m.shape(),
        });
    }
    Ok(())
}

fn rows_to_matrix(rows: &[[f64; 3]]) -> DMatrix<f64> {
    DMatrix::from_fn(rows.len(), 3, |i, k| rows[i][k])
}

/// Row `i` of an N x 3 array as a vector
pub fn row3(m: &DMatrix<f64>, i: usize) -> NVec3 {
    NVec3::new(m[(i, 0)], m[(i, 1)], m[(i, 2)])
}

fn mass_weighted_sum(m: &DMatrix<f64>, masses: &DVector<f64>) -> NVec3 {
    // (N x 3)^T * (N) -> 3
    let s = m.tr_mul(masses);
    NVec3::new(s[0], s[1], s[2])
}
