//! Parameter sweeps: many independent runs on a bounded rayon pool.
//!
//! A sweep file is JSON:
//!
//! ```json
//! {
//!   "movement": ["momentum", "static"],
//!   "environments": ["env5"],
//!   "cooperate_fractions": [0.5],
//!   "update_intervals": [5],
//!   "strategy_inertias": [2.0],
//!   "repetitions": 10,
//!   "spawn_fraction": 0.75,
//!   "familiarity": { "env4": 200, "env5": 200 },
//!   "base_seed": 42,
//!   "output_dir": "out/attempt5"
//! }
//! ```
//!
//! Every field is optional.  Each job writes
//! `<output_dir>/<movement>/<env>/coop_<c>/update_<u>/strat_inertia_<i>/iter_<n>/out.json`
//! and is skipped if that file already exists.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use ev_core::{MovementStrategy, RunConfig, mix_seed};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::run::{RunOutputs, run_single};

pub const OUTPUT_FILE: &str = "out.json";

// ── SweepConfig ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub movement:            Vec<MovementStrategy>,
    pub environments:        Vec<String>,
    pub cooperate_fractions: Vec<f64>,
    pub update_intervals:    Vec<u32>,
    pub strategy_inertias:   Vec<f64>,
    /// Runs per parameter combination.
    pub repetitions:         u32,
    pub spawn_fraction:      f64,
    /// Familiarity used for every map not listed in `familiarity`.
    pub default_familiarity: u32,
    /// Per-map familiarity overrides.
    pub familiarity:         BTreeMap<String, u32>,
    pub base_seed:           u64,
    pub output_dir:          PathBuf,
    pub max_ticks:           Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            movement:            vec![MovementStrategy::StaticFieldWithMomentum, MovementStrategy::StaticField],
            environments:        vec!["env5".into()],
            cooperate_fractions: vec![0.5],
            update_intervals:    vec![5],
            strategy_inertias:   vec![2.0],
            repetitions:         10,
            spawn_fraction:      0.75,
            default_familiarity: 1,
            familiarity:         BTreeMap::from([("env4".into(), 200), ("env5".into(), 200)]),
            base_seed:           42,
            output_dir:          PathBuf::from("out"),
            max_ticks:           None,
        }
    }
}

impl SweepConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening sweep file {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing sweep file {}", path.display()))?;
        Ok(config)
    }

    /// The cartesian product of every list × repetitions, in a fixed order.
    /// Each job's seed is derived from `base_seed` and its index.
    pub fn jobs(&self) -> Vec<SweepJob> {
        let mut jobs = Vec::new();
        for &movement in &self.movement {
            for env in &self.environments {
                for &coop in &self.cooperate_fractions {
                    for &interval in &self.update_intervals {
                        for &inertia in &self.strategy_inertias {
                            for iteration in 0..self.repetitions {
                                let index = jobs.len() as u64;
                                let config = RunConfig {
                                    movement,
                                    environment:        env.clone(),
                                    spawn_fraction:     self.spawn_fraction,
                                    cooperate_fraction: coop,
                                    strategy_inertia:   inertia,
                                    update_interval:    interval,
                                    familiarity:        self.familiarity_for(env),
                                    seed:               mix_seed(self.base_seed, index),
                                    max_ticks:          self.max_ticks,
                                    ..RunConfig::default()
                                };
                                let output = self.output_dir.join(job_dir(&config, iteration)).join(OUTPUT_FILE);
                                jobs.push(SweepJob { config, iteration, output });
                            }
                        }
                    }
                }
            }
        }
        jobs
    }

    pub fn familiarity_for(&self, env: &str) -> u32 {
        self.familiarity.get(env).copied().unwrap_or(self.default_familiarity)
    }
}

/// Relative directory of one job's output.
pub fn job_dir(config: &RunConfig, iteration: u32) -> PathBuf {
    PathBuf::from(config.movement.as_str())
        .join(&config.environment)
        .join(format!("coop_{:?}", config.cooperate_fraction))
        .join(format!("update_{}", config.update_interval))
        .join(format!("strat_inertia_{:?}", config.strategy_inertia))
        .join(format!("iter_{iteration}"))
}

/// One run of a sweep.
#[derive(Clone, Debug)]
pub struct SweepJob {
    pub config:    RunConfig,
    pub iteration: u32,
    pub output:    PathBuf,
}

// ── Execution ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub ran:     usize,
    pub skipped: usize,
    pub failed:  usize,
}

enum JobResult {
    Ran,
    Skipped,
    Failed,
}

/// Run every job not already on disk, at most `threads` at a time.
pub fn run_sweep(sweep: &SweepConfig, maps: &Path, threads: usize) -> Result<SweepReport> {
    let jobs = sweep.jobs();
    let total = jobs.len();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .context("building sweep thread pool")?;
    info!(jobs = total, threads = pool.current_num_threads(), "sweep started");

    let started = Instant::now();
    let done = AtomicUsize::new(0);
    let results: Vec<JobResult> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let result = run_job(job, maps);
                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                info!(
                    "[{n}/{total} - {}%] {} elapsed",
                    n * 100 / total.max(1),
                    format_hms(started.elapsed().as_secs())
                );
                result
            })
            .collect()
    });

    let mut report = SweepReport::default();
    for r in results {
        match r {
            JobResult::Ran     => report.ran += 1,
            JobResult::Skipped => report.skipped += 1,
            JobResult::Failed  => report.failed += 1,
        }
    }
    info!(ran = report.ran, skipped = report.skipped, failed = report.failed, "sweep finished");
    Ok(report)
}

fn run_job(job: &SweepJob, maps: &Path) -> JobResult {
    if job.output.exists() {
        return JobResult::Skipped;
    }
    let outputs = RunOutputs { json: Some(job.output.clone()), csv: None };
    match run_single(&job.config, maps, &outputs) {
        Ok(_) => JobResult::Ran,
        Err(e) => {
            error!(output = %job.output.display(), iteration = job.iteration, "simulation failed: {e:#}");
            JobResult::Failed
        }
    }
}

fn format_hms(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
