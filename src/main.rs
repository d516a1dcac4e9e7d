// src/main.rs - Command-line front end for the smoother
use clap::Parser;
use std::path::PathBuf;

use trajectory_timing::config::{self, Config};
use trajectory_timing::input::PathFile;
use trajectory_timing::motion::check_limits;
use trajectory_timing::IterativeSmoother;

/// Time-parameterize a joint-space path
#[derive(Parser, Debug)]
#[command(name = "trajectory-timing", about = "Assign limit-respecting timing to an unclocked joint path.")]
struct Cli {
    /// Waypoint file (.toml, or .json)
    #[arg(short, long)]
    input: PathBuf,

    /// Smoother config and joint limit table (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override smoother.max_iterations
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Override smoother.max_time_change_per_iteration
    #[arg(long)]
    max_time_change: Option<f64>,

    /// Log debug output, including the full smoothed trajectory
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            config::load_config(&path.to_string_lossy())?
        }
        None => Config::default(),
    };
    if let Some(max_iterations) = cli.max_iterations {
        config.smoother.max_iterations = max_iterations;
    }
    if let Some(max_time_change) = cli.max_time_change {
        config.smoother.max_time_change_per_iteration = max_time_change;
    }
    config.validate()?;

    let (trajectory, limits) = PathFile::load(&cli.input)
        .map_err(|e| {
            tracing::error!("Failed to read waypoints from '{}': {}", cli.input.display(), e);
            e
        })?
        .into_parts(&config);
    tracing::info!(
        "Smoothing {} waypoints over {} joints",
        trajectory.len(),
        trajectory.num_joints()
    );

    let smoother = IterativeSmoother::new(config.smoother.clone());
    let outcome = smoother.smooth(&trajectory, &limits)?;
    tracing::info!(
        "Status: {:?} after {} passes, duration {:.4}s",
        outcome.status,
        outcome.iterations,
        outcome.duration()
    );

    let violations = check_limits(&outcome.trajectory, &limits, smoother.config().rounding_tolerance);
    for violation in &violations {
        tracing::warn!(
            "{:?} limit exceeded on joint '{}' at {}: {:.4} > {:.4}",
            violation.quantity,
            outcome.trajectory.joint_names[violation.joint],
            violation.index,
            violation.value.abs(),
            violation.limit
        );
    }

    let report = serde_json::json!({
        "status": outcome.status,
        "converged": outcome.converged(),
        "iterations": outcome.iterations,
        "intervals": outcome.intervals,
        "violations": violations,
        "trajectory": outcome.trajectory,
    });
    let text = serde_json::to_string_pretty(&report)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, text)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}
