//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - numerical parameters (`SimulationConfig`)
//! - system state at t = 0 (`SimulationState`), optionally moved to the
//!   center-of-momentum frame
//! - how many trailing snapshots a viewer should draw

use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::configuration::config::{BodyConfig, ScenarioConfig, ScenarioError};
use crate::simulation::error::ConfigurationError;
use crate::simulation::forces::SoftenedGravity;
use crate::simulation::integrator::Integrator;
use crate::simulation::sampling::random_bodies;
use crate::simulation::states::{SimulationConfig, SimulationState};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: SimulationConfig,
    pub state: SimulationState,
    pub trail_length: usize,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ScenarioError> {
        let p_cfg = &cfg.parameters;
        let config = SimulationConfig {
            g: p_cfg.g,
            softening: p_cfg.softening,
            dt: p_cfg.dt,
            t_end: p_cfg.t_end,
        };
        config.validate()?;

        let mut state = match (&cfg.random, &cfg.bodies) {
            (Some(_), Some(_)) => return Err(ScenarioError::AmbiguousInitialConditions),
            (None, None) => return Err(ScenarioError::MissingInitialConditions),
            (Some(r), None) => {
                let seed = r.seed.unwrap_or_else(clock_seed);
                info!("sampling {} random bodies (seed {})", r.n, seed);
                let mut rng = ChaChaRng::seed_from_u64(seed);
                random_bodies(r.n, r.total_mass, &mut rng)
            }
            (None, Some(bodies)) => state_from_bodies(bodies)?,
        };

        if cfg.center_of_momentum {
            state.to_center_of_momentum_frame();
        }

        Ok(Self {
            config,
            state,
            trail_length: cfg.trail_length,
        })
    }

    /// Integrator over direct softened gravity with this scenario's constants
    pub fn into_integrator(self) -> Result<Integrator<SoftenedGravity>, ConfigurationError> {
        let field = SoftenedGravity {
            g: self.config.g,
            softening: self.config.softening,
        };
        Integrator::new(self.config, self.state, field)
    }
}

fn state_from_bodies(bodies: &[BodyConfig]) -> Result<SimulationState, ConfigurationError> {
    let x: Vec<[f64; 3]> = bodies.iter().map(|b| b.x).collect();
    let v: Vec<[f64; 3]> = bodies.iter().map(|b| b.v).collect();
    let m: Vec<f64> = bodies.iter().map(|b| b.m).collect();
    SimulationState::from_rows(&x, &v, &m)
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
