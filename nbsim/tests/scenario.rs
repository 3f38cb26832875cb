use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use nbsim::simulation::sampling::sample_gaussian;
use nbsim::{ConfigurationError, Scenario, ScenarioConfig, ScenarioError};

use std::path::PathBuf;

fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(name)
}

// ==================================================================================
// YAML loading
// ==================================================================================

#[test]
fn defaults_follow_reference_run() {
    let cfg = ScenarioConfig::from_yaml_str("random:\n  seed: 7\n").unwrap();

    assert_eq!(cfg.parameters.t_end, 3.0);
    assert_eq!(cfg.parameters.dt, 0.01);
    assert_eq!(cfg.parameters.softening, 0.1);
    assert_eq!(cfg.parameters.g, 1.0);
    assert!(cfg.center_of_momentum);
    assert_eq!(cfg.trail_length, 50);

    let random = cfg.random.as_ref().unwrap();
    assert_eq!(random.n, 100);
    assert_eq!(random.total_mass, 100.0);
    assert_eq!(random.seed, Some(7));
}

#[test]
fn explicit_bodies_are_loaded() {
    let yaml = r#"
parameters:
  t_end: 1.0
  dt: 0.1
  softening: 0.0
  g: 2.0
center_of_momentum: false
bodies:
  - x: [ 1.0, 2.0, 3.0 ]
    v: [ 0.0, 1.0, 0.0 ]
    m: 2.0
  - x: [ -1.0, 0.0, 0.0 ]
    v: [ 0.0, 0.0, 0.0 ]
    m: 1.0
"#;
    let scenario = Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml).unwrap()).unwrap();

    assert_eq!(scenario.state.n_bodies(), 2);
    assert_eq!(scenario.state.position(0).as_slice(), &[1.0, 2.0, 3.0]);
    assert_eq!(scenario.state.velocity(0).as_slice(), &[0.0, 1.0, 0.0]);
    assert_eq!(scenario.state.masses.as_slice(), &[2.0, 1.0]);
    assert_eq!(scenario.config.g, 2.0);
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let err = ScenarioConfig::from_yaml_str("parameters: [1, 2").unwrap_err();
    assert!(matches!(err, ScenarioError::Parse(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ScenarioConfig::from_yaml_path(scenario_path("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, ScenarioError::Io(_)));
}

#[test]
fn initial_conditions_must_be_unambiguous() {
    let none = ScenarioConfig::from_yaml_str("parameters:\n  dt: 0.01\n").unwrap();
    assert!(matches!(Scenario::build_scenario(none), Err(ScenarioError::MissingInitialConditions)));

    let both = ScenarioConfig::from_yaml_str("random:\n  n: 2\nbodies: []\n").unwrap();
    assert!(matches!(Scenario::build_scenario(both), Err(ScenarioError::AmbiguousInitialConditions)));
}

#[test]
fn invalid_parameters_are_rejected() {
    let cfg = ScenarioConfig::from_yaml_str("parameters:\n  dt: -0.5\nrandom:\n  seed: 1\n").unwrap();
    let err = Scenario::build_scenario(cfg).unwrap_err();
    assert!(matches!(err, ScenarioError::Config(ConfigurationError::TimeStep(_))));
}

// ==================================================================================
// Scenario building
// ==================================================================================

#[test]
fn random_scenario_is_in_center_of_momentum_frame() {
    let cfg = ScenarioConfig::from_yaml_str("random:\n  n: 40\n  total_mass: 10.0\n  seed: 3\n").unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.state.n_bodies(), 40);
    assert_relative_eq!(scenario.state.total_mass(), 10.0, max_relative = 1e-12);
    assert!(scenario.state.masses.iter().all(|&m| m == 0.25));
    assert_abs_diff_eq!(scenario.state.total_momentum().norm(), 0.0, epsilon = 1e-12);
}

#[test]
fn random_scenario_is_reproducible() {
    let build = || {
        let cfg = ScenarioConfig::from_yaml_str("random:\n  n: 10\n  seed: 1234\n").unwrap();
        Scenario::build_scenario(cfg).unwrap().state
    };
    assert_eq!(build(), build());
}

#[test]
fn shipped_scenarios_load() {
    let cluster = ScenarioConfig::from_yaml_path(scenario_path("random_cluster.yaml")).unwrap();
    let cluster = Scenario::build_scenario(cluster).unwrap();
    assert_eq!(cluster.state.n_bodies(), 100);
    assert_eq!(cluster.trail_length, 50);
    assert_eq!(cluster.into_integrator().unwrap().total_steps(), 300);

    let binary = ScenarioConfig::from_yaml_path(scenario_path("two_body_circular.yaml")).unwrap();
    let binary = Scenario::build_scenario(binary).unwrap();
    assert_eq!(binary.state.n_bodies(), 2);
    // symmetric velocities already carry no momentum
    assert_eq!(binary.state.velocity(0).as_slice(), &[0.0, 0.5, 0.0]);
    assert_eq!(binary.into_integrator().unwrap().total_steps(), 12567);
}

#[test]
fn two_body_scenario_keeps_center_of_mass() {
    let cfg = ScenarioConfig::from_yaml_path(scenario_path("two_body_circular.yaml")).unwrap();
    let mut integrator = Scenario::build_scenario(cfg).unwrap().into_integrator().unwrap();

    for _ in 0..1000 {
        integrator.advance();
    }
    assert_abs_diff_eq!(integrator.state().center_of_mass().norm(), 0.0, epsilon = 1e-12);
}

// ==================================================================================
// Sampling
// ==================================================================================

#[test]
fn sample_gaussian_produces_reasonable_values() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let samples: Vec<f64> = (0..20_000).map(|_| sample_gaussian(&mut rng, 5.0, 2.0)).collect();

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

    assert!(samples.iter().all(|x| x.is_finite()));
    assert!((mean - 5.0).abs() < 0.1, "mean {}", mean);
    assert!((var.sqrt() - 2.0).abs() < 0.1, "std {}", var.sqrt());
}
