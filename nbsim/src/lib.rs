pub mod simulation;
pub mod configuration;
pub mod benchmark;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use simulation::error::ConfigurationError;
pub use simulation::states::{SimulationConfig, SimulationState, NVec3};
pub use simulation::forces::{AccelerationField, SoftenedGravity, compute_acceleration};
pub use simulation::integrator::{Integrator, Phase, StepObserver, leapfrog_step};
pub use simulation::trajectory::{Trajectory, DEFAULT_TRAIL_LENGTH};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ScenarioConfig, ParametersConfig, RandomConfig, BodyConfig, ScenarioError};

pub use benchmark::benchmark::{bench_acceleration, bench_leapfrog_curve};

#[cfg(feature = "viewer")]
pub use visualization::viewer2d::run_2d;
