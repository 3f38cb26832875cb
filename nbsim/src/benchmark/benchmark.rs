use std::time::Instant;

use nalgebra::{DMatrix, DVector};

use crate::simulation::forces::{AccelerationField, SoftenedGravity};
use crate::simulation::integrator::leapfrog_step;
use crate::simulation::states::SimulationState;

const G: f64 = 1.0;
const SOFTENING: f64 = 0.1;
const DT: f64 = 0.01;

/// Helper to build a deterministic state of size `n`, no rng needed
fn make_state(n: usize) -> SimulationState {
    let mut state = SimulationState {
        t: 0.0,
        positions: DMatrix::from_fn(n, 3, |i, k| {
            let i_f = i as f64;
            match k {
                0 => (i_f * 0.37).sin() * 5.0,
                1 => (i_f * 0.13).cos() * 5.0,
                _ => (i_f * 0.07).sin() * 5.0,
            }
        }),
        velocities: DMatrix::zeros(n, 3),
        accelerations: DMatrix::zeros(n, 3),
        masses: DVector::from_element(n, 1.0),
    };
    let gravity = SoftenedGravity { g: G, softening: SOFTENING };
    state.accelerations = gravity.acceleration(&state.masses, &state.positions);
    state
}

/// Time one dense acceleration evaluation for a range of n
pub fn bench_acceleration() {
    let ns = [100, 200, 400, 800, 1600, 3200];
    let gravity = SoftenedGravity { g: G, softening: SOFTENING };

    println!("N,accel_ms");
    for n in ns {
        let state = make_state(n);

        // Warm up
        let _ = gravity.acceleration(&state.masses, &state.positions);

        let t0 = Instant::now();
        let a = gravity.acceleration(&state.masses, &state.positions);
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        // keep the result observable
        log::trace!("N = {}, |a[0]| = {}", n, a.row(0).norm());
        println!("{},{:.6}", n, ms);
    }
}

/// Time full leapfrog steps for a range of n
/// Output is CSV, ready to paste into a spreadsheet
pub fn bench_leapfrog_curve() {
    let gravity = SoftenedGravity { g: G, softening: SOFTENING };

    println!("N,step_ms");
    for n in (100..=2000).step_by(100) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 5 } else { 1 };
        let mut state = make_state(n);

        let t0 = Instant::now();
        for _ in 0..steps {
            leapfrog_step(&mut state, &gravity, DT);
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6}", n, ms);
    }
}
