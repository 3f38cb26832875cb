//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – numerical parameters and physical constants
//! - [`RandomConfig`]     – randomly generated initial conditions, or
//! - [`BodyConfig`]       – explicit initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! parameters:
//!   t_end: 3.0              # total simulation time
//!   dt: 0.01                # fixed step size
//!   softening: 0.1          # softening length epsilon
//!   g: 1.0                  # gravitational constant
//!
//! center_of_momentum: true  # subtract the mass-weighted mean velocity
//! trail_length: 50          # snapshots shown behind each body by the viewer
//!
//! # either
//! random:
//!   n: 100
//!   total_mass: 100.0
//!   seed: 42                # omit to seed from the clock
//!
//! # or
//! bodies:
//!   - x: [ 1.0, 0.0, 0.0 ]
//!     v: [ 0.0, 0.5, 0.0 ]
//!     m: 1.0
//! ```
//!
//! Every field except the initial conditions has a default.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::simulation::error::ConfigurationError;
use crate::simulation::trajectory::DEFAULT_TRAIL_LENGTH;

/// Error type for scenario loading
#[derive(Debug)]
pub enum ScenarioError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    MissingInitialConditions,
    AmbiguousInitialConditions,
    Config(ConfigurationError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "IO error: {}", e),
            ScenarioError::Parse(e) => write!(f, "YAML parse error: {}", e),
            ScenarioError::MissingInitialConditions => {
                write!(f, "scenario needs either `random` or `bodies`")
            }
            ScenarioError::AmbiguousInitialConditions => {
                write!(f, "scenario gives both `random` and `bodies`")
            }
            ScenarioError::Config(e) => write!(f, "invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ScenarioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScenarioError::Io(e) => Some(e),
            ScenarioError::Parse(e) => Some(e),
            ScenarioError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScenarioError {
    fn from(err: std::io::Error) -> Self {
        ScenarioError::Io(err)
    }
}

impl From<serde_yaml::Error> for ScenarioError {
    fn from(err: serde_yaml::Error) -> Self {
        ScenarioError::Parse(err)
    }
}

impl From<ConfigurationError> for ScenarioError {
    fn from(err: ConfigurationError) -> Self {
        ScenarioError::Config(err)
    }
}

/// Global numerical and physical parameters for a scenario
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ParametersConfig {
    pub t_end: f64, // time end
    pub dt: f64, // time step size
    pub softening: f64, // prevents singular forces at very small separations
    pub g: f64, // gravitational constant
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            t_end: 3.0,
            dt: 0.01,
            softening: 0.1,
            g: 1.0,
        }
    }
}

/// Randomly sampled initial conditions
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RandomConfig {
    #[serde(default = "default_n")]
    pub n: usize, // number of bodies
    #[serde(default = "default_total_mass")]
    pub total_mass: f64, // split evenly between the bodies
    #[serde(default)]
    pub seed: Option<u64>, // deterministic seed; clock-seeded when absent
}

fn default_n() -> usize {
    100
}

fn default_total_mass() -> f64 {
    100.0
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub x: [f64; 3], // initial position
    pub v: [f64; 3], // initial velocity
    pub m: f64, // mass
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub random: Option<RandomConfig>,
    #[serde(default)]
    pub bodies: Option<Vec<BodyConfig>>,
    #[serde(default = "default_true")]
    pub center_of_momentum: bool,
    #[serde(default = "default_trail_length")]
    pub trail_length: usize,
}

fn default_true() -> bool {
    true
}

fn default_trail_length() -> usize {
    DEFAULT_TRAIL_LENGTH
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_yaml::from_reader(reader)?)
    }
}
