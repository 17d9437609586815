//! matchsim - batch driver for the matching simulator

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use matching_simulator_core::{
    orchestrator::validate_report, ArrivalGenerator, RngManager, Simulation, SimulationConfig,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "matchsim")]
#[command(about = "Compare online matching policies on a shared arrival stream")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and report per-pool results
    Run {
        /// JSON scenario file (defaults to all five policies on the default stream)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write the JSON report here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Override the scenario's RNG seed
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Generate the scenario's arrival stream and summarize it
    Generate {
        /// JSON scenario file (defaults to the built-in scenario)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Override the scenario's RNG seed
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            output,
            seed,
        } => {
            let config = load_config(config.as_deref(), seed)?;
            run(config, output.as_deref())?;
        }
        Commands::Generate { config, seed } => {
            let config = load_config(config.as_deref(), seed)?;
            generate(&config)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<SimulationConfig> {
    let mut config = match path {
        Some(path) => {
            info!("Loading scenario: {}", path.display());
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading scenario {}", path.display()))?;
            serde_json::from_str::<SimulationConfig>(&raw)
                .with_context(|| format!("parsing scenario {}", path.display()))?
        }
        None => {
            info!("No scenario given, comparing every policy with defaults");
            SimulationConfig::default()
        }
    };

    if let Some(seed) = seed {
        config.rng_seed = seed;
    }
    config.validate()?;
    Ok(config)
}

fn run(config: SimulationConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let mut sim = Simulation::new(config)?;
    info!("Config hash: {}", sim.config_hash());

    sim.run_generated()?;
    let report = sim.report();
    validate_report(&report)?;

    for pool in &report.pools {
        let s = &pool.summary;
        info!(
            "{:<20} {:<18} matches {:>5}  unmatched {:>5}  rate {:>6.3}  mean gap {:>9.2}  mean latency {:>9.2}  total cost {:>12.1}",
            pool.name,
            pool.policy,
            s.matches,
            s.unmatched,
            s.match_rate(),
            s.mean_attribute_gap,
            s.mean_latency,
            s.total_cost
        );
    }

    let json = report.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing report {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn generate(config: &SimulationConfig) -> anyhow::Result<()> {
    let Some(arrivals) = &config.arrivals else {
        bail!("scenario has no `arrivals` section to generate from");
    };

    let mut rng = RngManager::new(config.rng_seed);
    let stream = ArrivalGenerator::generate(arrivals, &mut rng);
    let attributes: Vec<f64> = stream
        .records()
        .iter()
        .flatten()
        .map(|record| record.attribute)
        .collect();

    info!(
        "Generated {} ticks ({} trailing), {} arrivals",
        stream.len(),
        arrivals.trailing_ticks,
        stream.arrival_count()
    );
    if !attributes.is_empty() {
        let min = attributes.iter().copied().fold(f64::INFINITY, f64::min);
        let max = attributes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = attributes.iter().sum::<f64>() / attributes.len() as f64;
        info!("Attributes: min {:.2}, max {:.2}, mean {:.2}", min, max, mean);
    }

    Ok(())
}
