//! Random initial conditions
//!
//! Equal-mass bodies with standard-normal positions and velocities, drawn
//! from a seeded ChaCha stream so runs are reproducible.

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};
use rand::Rng;
use rand_chacha::ChaChaRng;

use super::states::SimulationState;

/// Sample from N(mean, std_dev^2) using the Box-Muller transform
pub fn sample_gaussian(rng: &mut ChaChaRng, mean: f64, std_dev: f64) -> f64 {
    // u1 in (0, 1] keeps ln finite
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + std_dev * z
}

/// `n` bodies of mass `total_mass / n` with positions and velocities drawn
/// independently per component from N(0, 1). Velocities are left as drawn;
/// move to the center-of-momentum frame separately.
pub fn random_bodies(n: usize, total_mass: f64, rng: &mut ChaChaRng) -> SimulationState {
    let positions = DMatrix::from_fn(n, 3, |_, _| sample_gaussian(rng, 0.0, 1.0));
    let velocities = DMatrix::from_fn(n, 3, |_, _| sample_gaussian(rng, 0.0, 1.0));
    let m = if n == 0 { 0.0 } else { total_mass / n as f64 };
    let masses = DVector::from_element(n, m);

    SimulationState {
        t: 0.0,
        accelerations: DMatrix::zeros(n, 3),
        positions,
        velocities,
        masses,
    }
}
