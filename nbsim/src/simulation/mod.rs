pub mod error;
pub mod states;
pub mod forces;
pub mod trajectory;
pub mod integrator;
pub mod sampling;
pub mod scenario;
