//! Construction-time errors for the numerical core
//!
//! Only malformed configurations are errors. Non-finite values produced
//! while integrating (coincident bodies with zero softening, non-finite
//! inputs) are left in the arrays for the caller to inspect.

use std::fmt;

/// A configuration the integrator refuses to build from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Time step must be finite and strictly positive
    TimeStep(f64),
    /// End time must be finite and non-negative
    EndTime(f64),
    /// Softening length must be finite and non-negative
    Softening(f64),
    /// Integration starts from t = 0
    StartTime(f64),
    /// Array dimensions disagree with each other
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::TimeStep(dt) => {
                write!(f, "time step must be finite and > 0, got {}", dt)
            }
            ConfigurationError::EndTime(t) => {
                write!(f, "end time must be finite and >= 0, got {}", t)
            }
            ConfigurationError::Softening(eps) => {
                write!(f, "softening length must be finite and >= 0, got {}", eps)
            }
            ConfigurationError::StartTime(t) => {
                write!(f, "initial state must start at t = 0, got {}", t)
            }
            ConfigurationError::ShapeMismatch { what, expected, found } => write!(
                f,
                "{} has shape {}x{}, expected {}x{}",
                what, found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}
