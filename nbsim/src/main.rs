use nbsim::{ScenarioConfig, Scenario, Integrator, SoftenedGravity, Trajectory};
use nbsim::{bench_acceleration, bench_leapfrog_curve};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file; looked up in the crate's `scenarios/` directory unless it is an existing path
    #[arg(short, long, default_value = "random_cluster.yaml")]
    file_name: String,

    /// Override the seed of a random scenario
    #[arg(long)]
    seed: Option<u64>,

    /// Print timing tables instead of simulating
    #[arg(long)]
    bench: bool,

    /// Open the 2D viewer (needs the `viewer` feature)
    #[arg(long)]
    view: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let given = PathBuf::from(&args.file_name);
    let config_path = if given.exists() {
        given
    } else {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file_name)
    };

    let mut scenario_cfg = ScenarioConfig::from_yaml_path(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    if let (Some(seed), Some(random)) = (args.seed, scenario_cfg.random.as_mut()) {
        random.seed = Some(seed);
    }
    debug!("{:?}", scenario_cfg);

    Ok(scenario_cfg)
}

fn run_headless(mut integrator: Integrator<SoftenedGravity>) {
    let g = integrator.config().g;
    let eps = integrator.config().softening;
    let e0 = integrator.state().total_energy(g, eps);

    let report_every = (integrator.total_steps() / 10).max(1);
    let mut progress = |step: usize, time: f64, _: &Trajectory| {
        if step % report_every == 0 {
            debug!("step {} t = {:.4}", step, time);
        }
    };
    integrator.run_with(&mut progress);

    let state = integrator.state();
    let e1 = state.total_energy(g, eps);
    let trajectory = integrator.trajectory();
    info!(
        "finished: {} steps, {} snapshots, t = {:.6}",
        integrator.steps_taken(),
        trajectory.len(),
        trajectory.final_time().unwrap_or(0.0)
    );
    info!("energy: {:.6e} -> {:.6e} (relative drift {:.3e})", e0, e1, ((e1 - e0) / e0).abs());
    info!("total momentum: {:?}", state.total_momentum().as_slice());
    info!("center of mass: {:?}", state.center_of_mass().as_slice());
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_acceleration();
        bench_leapfrog_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args)?;
    let scenario = Scenario::build_scenario(scenario_cfg).context("failed to build scenario")?;
    let trail_length = scenario.trail_length;
    let integrator = scenario.into_integrator().context("failed to start integrator")?;

    if args.view {
        #[cfg(feature = "viewer")]
        {
            nbsim::run_2d(integrator, trail_length);
            return Ok(());
        }
        #[cfg(not(feature = "viewer"))]
        {
            anyhow::bail!("built without the `viewer` feature (trail length {} ignored)", trail_length);
        }
    }

    run_headless(integrator);

    Ok(())
}
