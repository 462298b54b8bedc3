//! evac — command-line front end for the rust_evac crowd-evacuation model.
//!
//! ```text
//! evac run --env env1 --movement momentum --json out/env1.json
//! evac sweep sweep.json --jobs 8
//! evac show --env env3
//! ```
//!
//! Maps are read from `<maps>/<env>.txt` (default `apps/evac/maps`).

mod run;
mod sweep;


use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ev_core::{MovementStrategy, RunConfig};
use ev_grid::GridEnvironment;

use run::{RunOutputs, map_path, run_single};
use sweep::{SweepConfig, run_sweep};

const DEFAULT_MAPS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/maps");

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at DEBUG level (every conflict and strategy switch).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding `<env>.txt` map files.
    #[arg(long, global = true, default_value = DEFAULT_MAPS_DIR)]
    maps: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one simulation.
    Run {
        #[arg(short, long, default_value = "env1")]
        env: String,
        /// `random`, `static`, or `momentum`.
        #[arg(short, long, default_value = "momentum")]
        movement: MovementStrategy,
        #[arg(long, default_value_t = 0.75)]
        spawn_fraction: f64,
        #[arg(long, default_value_t = 0.5)]
        cooperate_fraction: f64,
        #[arg(long, default_value_t = 2.0)]
        strategy_inertia: f64,
        #[arg(long, default_value_t = 5)]
        update_interval: u32,
        #[arg(long, default_value_t = 1)]
        familiarity: u32,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Restrict movement to the four orthogonal neighbours.
        #[arg(long)]
        orthogonal: bool,
        /// Stop after this many ticks even if agents remain.
        #[arg(long)]
        max_ticks: Option<u64>,
        /// Write the run summary as JSON to this file.
        #[arg(long)]
        json: Option<PathBuf>,
        /// Write `tick_summaries.csv` into this directory.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Run every parameter combination described by a JSON sweep file.
    Sweep {
        config: PathBuf,
        /// Maximum simulations running at once.
        #[arg(short, long, default_value_t = 8)]
        jobs: usize,
    },

    /// Print a map and its exit summary.
    Show {
        #[arg(short, long, default_value = "env1")]
        env: String,
        /// Check exit reachability for orthogonal-only movement.
        #[arg(long)]
        orthogonal: bool,
    },
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run {
            env,
            movement,
            spawn_fraction,
            cooperate_fraction,
            strategy_inertia,
            update_interval,
            familiarity,
            seed,
            orthogonal,
            max_ticks,
            json,
            csv,
        } => {
            let config = RunConfig {
                movement,
                environment: env,
                spawn_fraction,
                cooperate_fraction,
                strategy_inertia,
                update_interval,
                familiarity,
                seed,
                allow_diagonal: !orthogonal,
                max_ticks,
            };
            let summary = run_single(&config, &cli.maps, &RunOutputs { json, csv })?;

            println!("=== {} / {} / seed {} ===", config.environment, config.movement, config.seed);
            println!("People:       {}", summary.people_count);
            println!("Escaped:      {}", summary.escaped());
            println!("Ticks:        {}", summary.ticks);
            for fraction in [0.5, 0.9, 1.0] {
                match summary.time_to_escape(fraction) {
                    Some(t) => println!("{:>3.0}% out at: tick {t}", fraction * 100.0),
                    None    => println!("{:>3.0}% out at: never", fraction * 100.0),
                }
            }
        }

        Commands::Sweep { config, jobs } => {
            let sweep = SweepConfig::from_path(&config)?;
            let report = run_sweep(&sweep, &cli.maps, jobs)?;
            println!(
                "Sweep finished: {} ran, {} skipped, {} failed",
                report.ran, report.skipped, report.failed
            );
            if report.failed > 0 {
                bail!("{} simulation(s) failed", report.failed);
            }
        }

        Commands::Show { env, orthogonal } => {
            let map = GridEnvironment::from_path(&map_path(&cli.maps, &env))?;
            println!("{map}");
            println!();
            println!(
                "{}×{}  spawns: {}  exits: {}  obstacles: {}",
                map.width(),
                map.height(),
                map.spawns().len(),
                map.exits().len(),
                map.obstacles().len()
            );
            let sealed = map.spawns().iter().filter(|&&p| map.exit_reachable(p, !orthogonal).is_err()).count();
            if sealed > 0 {
                println!("warning: {sealed} spawn cell(s) cannot reach any exit");
            }
        }
    }

    Ok(())
}
