//! Fixed-step leapfrog (kick-drift-kick) integration of the N-body system
//!
//! One step, with `A` cached from the previous step:
//!
//! ```text
//! V += A * dt/2        half kick
//! R += V * dt          drift
//! A  = field(M, R)     one force evaluation
//! V += A * dt/2        half kick
//! t += dt
//! ```
//!
//! Both kicks use dt/2. The number of steps is fixed at construction to
//! ceil(t_end / dt) so the trajectory length never depends on how `t`
//! accumulates rounding error.

use log::{debug, warn};

use super::error::ConfigurationError;
use super::forces::AccelerationField;
use super::states::{SimulationConfig, SimulationState};
use super::trajectory::Trajectory;

/// Where the integrator is in its run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized, // t = 0, initial acceleration computed, no steps yet
    Stepping, // at least one step taken, more remaining
    Finished, // all steps taken
}

/// Consumer notified after every completed step (renderers, loggers, ...)
/// Receives read-only access to everything recorded so far.
pub trait StepObserver {
    fn on_step(&mut self, step: usize, time: f64, trajectory: &Trajectory);
}

impl<T> StepObserver for T
where
    T: FnMut(usize, f64, &Trajectory),
{
    fn on_step(&mut self, step: usize, time: f64, trajectory: &Trajectory) {
        self(step, time, trajectory)
    }
}

/// Advance `state` by one kick-drift-kick step of size `dt`.
///
/// `state.accelerations` must hold the accelerations for the current
/// positions; on return it holds them for the new positions.
pub fn leapfrog_step<F>(state: &mut SimulationState, field: &F, dt: f64)
where
    F: AccelerationField + ?Sized,
{
    let half_dt = 0.5 * dt;

    // Kick: v_n+1/2 = v_n + (dt/2) * a_n
    state.velocities += &state.accelerations * half_dt;

    // Drift: x_n+1 = x_n + dt * v_n+1/2
    state.positions += &state.velocities * dt;

    // a_n+1 from x_n+1
    state.accelerations = field.acceleration(&state.masses, &state.positions);

    // Kick: v_n+1 = v_n+1/2 + (dt/2) * a_n+1
    state.velocities += &state.accelerations * half_dt;

    state.t += dt;
}

/// Owns the state of one run and drives it to `t_end`
pub struct Integrator<F: AccelerationField> {
    config: SimulationConfig,
    state: SimulationState,
    field: F,
    trajectory: Trajectory,
    total_steps: usize,
    steps_taken: usize,
    reported_non_finite: bool,
}

impl<F: AccelerationField> Integrator<F> {
    /// Validate the configuration and the array shapes, compute the initial
    /// accelerations and record the initial positions as snapshot 0.
    pub fn new(config: SimulationConfig, mut state: SimulationState, field: F) -> Result<Self, ConfigurationError> {
        config.validate()?;
        state.check_shapes()?;
        // snapshot k is stamped k * dt, so the run has to start at zero
        if state.t != 0.0 {
            return Err(ConfigurationError::StartTime(state.t));
        }

        let total_steps = config.step_count();
        state.accelerations = field.acceleration(&state.masses, &state.positions);

        let mut trajectory = Trajectory::with_capacity(total_steps.saturating_add(1).min(1 << 20));
        trajectory.record(0.0, &state.positions);

        debug!(
            "integrator ready: n = {}, dt = {}, t_end = {}, steps = {}",
            state.n_bodies(),
            config.dt,
            config.t_end,
            total_steps
        );

        let mut integrator = Self {
            config,
            state,
            field,
            trajectory,
            total_steps,
            steps_taken: 0,
            reported_non_finite: false,
        };
        integrator.check_finite();
        Ok(integrator)
    }

    pub fn phase(&self) -> Phase {
        if self.steps_taken >= self.total_steps {
            Phase::Finished
        } else if self.steps_taken == 0 {
            Phase::Initialized
        } else {
            Phase::Stepping
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == Phase::Finished
    }

    /// Take one step and record it. Returns `false` (and does nothing) once
    /// all steps have been taken.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        leapfrog_step(&mut self.state, &self.field, self.config.dt);
        self.steps_taken += 1;

        let time = self.steps_taken as f64 * self.config.dt;
        self.trajectory.record(time, &self.state.positions);
        self.check_finite();
        true
    }

    /// Run every remaining step
    pub fn run(&mut self) {
        while self.advance() {}
    }

    /// Run every remaining step, handing each new snapshot to `observer`
    pub fn run_with<O: StepObserver + ?Sized>(&mut self, observer: &mut O) {
        while self.advance() {
            let time = self.trajectory.final_time().unwrap_or(self.state.t);
            observer.on_step(self.steps_taken, time, &self.trajectory);
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Hand back the final state and the recorded trajectory
    pub fn into_parts(self) -> (SimulationState, Trajectory) {
        (self.state, self.trajectory)
    }

    fn check_finite(&mut self) {
        if self.reported_non_finite {
            return;
        }
        let finite = self.state.accelerations.iter().all(|a| a.is_finite())
            && self.state.positions.iter().all(|x| x.is_finite());
        if !finite {
            warn!(
                "non-finite acceleration or position at step {} (coincident bodies with zero softening?)",
                self.steps_taken
            );
            self.reported_non_finite = true;
        }
    }
}
