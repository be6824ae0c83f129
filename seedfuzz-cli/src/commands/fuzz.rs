//! Fuzz command implementation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use seedfuzz_core::{FuzzConfig, Runner};
use tracing::{debug, info};

use super::{print_campaign, Output};
use crate::utils::{install_interrupt_handler, load_registry, print_json, run_blocking};

/// Campaign options. Unset options fall back to `SEEDFUZZ_*` variables.
#[derive(Debug, Clone, Args)]
pub struct FuzzOptions {
    /// Mutated trials after the seed replay
    #[arg(long)]
    pub trials: Option<u64>,

    /// Time budget for the mutation phase, in seconds
    #[arg(long, value_name = "SECS")]
    pub time: Option<u64>,

    /// Parallel workers
    #[arg(long)]
    pub workers: Option<usize>,

    /// Mutation RNG seed
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Maximum generated input length in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_len: Option<usize>,

    /// Write failing inputs to this directory as corpus entries
    #[arg(long, value_name = "DIR")]
    pub crash_dir: Option<PathBuf>,

    /// Register every corpus entry in this directory as an extra seed
    #[arg(long, value_name = "DIR")]
    pub corpus_dir: Option<PathBuf>,

    /// Keep fuzzing after the first failing input
    #[arg(long)]
    pub keep_going: bool,
}

impl FuzzOptions {
    /// Overlay the options on top of `base`.
    pub fn apply(&self, base: FuzzConfig) -> FuzzConfig {
        FuzzConfig {
            trials: self.trials.unwrap_or(base.trials),
            time_budget: self.time.map(Duration::from_secs).or(base.time_budget),
            workers: self.workers.unwrap_or(base.workers),
            rng_seed: self.rng_seed.unwrap_or(base.rng_seed),
            max_input_len: self.max_len.unwrap_or(base.max_input_len),
            stop_on_first_failure: base.stop_on_first_failure && !self.keep_going,
            crash_dir: self.crash_dir.clone().or(base.crash_dir),
        }
    }
}

/// Execute the fuzz command.
pub async fn execute(
    output: Output,
    alt_platform_expectation: bool,
    name: String,
    options: FuzzOptions,
) -> Result<bool> {
    let mut registry = load_registry(alt_platform_expectation)?;

    if let Some(dir) = &options.corpus_dir {
        let added = registry
            .fuzz_harness_mut(&name)
            .with_context(|| format!("Cannot fuzz {name}"))?
            .load_corpus_dir(dir)
            .with_context(|| format!("Failed to load corpus directory: {}", dir.display()))?;
        info!(path = %dir.display(), added, "Loaded extra seeds");
    }

    let config = options.apply(FuzzConfig::from_env());
    debug!(?config, "Resolved fuzz configuration");

    let stop = install_interrupt_handler();
    let runner = Runner::new(config).with_stop_flag(stop);
    let test = name.clone();
    let report = run_blocking(move || runner.fuzz(&registry, &test))
        .await
        .with_context(|| format!("Cannot fuzz {name}"))?;

    if output.json() {
        print_json(&report)?;
    } else if output.text() {
        println!();
        if report.passed() {
            println!("{} {}", "PASS".green().bold(), report.harness);
        } else {
            println!("{} {}", "FAIL".red().bold(), report.harness);
        }
        print_campaign(&report);
    }

    Ok(report.passed())
}
