//! Fuzz harness and campaign driver.
//!
//! A harness has two phases. Seeding needs `&mut self` and only appends to
//! the corpus; running needs `&self`, so the corpus cannot change while
//! trials are in flight.
//!
//! A campaign first replays every seed in registration order, then (if the
//! trial budget allows) runs mutated candidates across worker threads.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::config::FuzzConfig;
use crate::corpus::{self, SeedCorpus};
use crate::error::Result;
use crate::input::{ByteSequence, InputDigest};
use crate::mutate::Mutator;
use crate::target::TargetOperation;
use crate::trial::{run_trial, TrialOutcome};

/// Which phase of a campaign produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialPhase {
    Seed,
    Mutation,
}

/// One failing input, deduplicated by digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialFailure {
    pub input: ByteSequence,
    pub message: String,
    pub phase: TrialPhase,
    /// Corpus entry written for this input, if a crash directory was set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<std::path::PathBuf>,
    /// Why the corpus entry could not be written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_error: Option<String>,
}

/// Summary of a campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReport {
    pub harness: String,
    pub started_at: DateTime<Utc>,
    pub seeds: usize,
    /// Trials run, seeds included
    pub trials: u64,
    pub accepted: u64,
    pub rejected: u64,
    pub failures: Vec<TrialFailure>,
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
    /// Stopped by the caller's stop flag before the budget ran out
    pub interrupted: bool,
}

impl CampaignReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct FuzzHarness {
    name: String,
    target: Arc<dyn TargetOperation>,
    corpus: SeedCorpus,
}

impl std::fmt::Debug for FuzzHarness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzHarness")
            .field("name", &self.name)
            .field("seeds", &self.corpus.len())
            .finish_non_exhaustive()
    }
}

impl FuzzHarness {
    pub fn new(name: impl Into<String>, target: Arc<dyn TargetOperation>) -> Self {
        Self {
            name: name.into(),
            target,
            corpus: SeedCorpus::new(),
        }
    }

    /// Builder-style seed registration.
    pub fn with_seed(mut self, seed: impl Into<ByteSequence>) -> Self {
        self.register_seed(seed.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn corpus(&self) -> &SeedCorpus {
        &self.corpus
    }

    /// Add a literal seed. Returns `false` if it was already registered.
    pub fn register_seed(&mut self, seed: ByteSequence) -> bool {
        self.corpus.register(seed)
    }

    /// Register every corpus entry in `dir` as a seed.
    pub fn load_corpus_dir(&mut self, dir: &std::path::Path) -> Result<usize> {
        self.corpus.load_dir(dir)
    }

    /// Run the target once on `input`.
    pub fn run_trial(&self, input: &ByteSequence) -> TrialOutcome {
        run_trial(self.target.as_ref(), input)
    }

    /// Run a campaign.
    ///
    /// `stop` lets the caller end the mutation phase early; workers check it
    /// between trials. Seeds are always replayed in full.
    #[instrument(skip_all, fields(harness = %self.name))]
    pub fn run(&self, config: &FuzzConfig, stop: &AtomicBool) -> Result<CampaignReport> {
        config.validate()?;

        let started_at = Utc::now();
        let start = Instant::now();
        let stats = Stats::default();

        info!(
            seeds = self.corpus.len(),
            trials = config.trials,
            workers = config.workers,
            rng_seed = config.rng_seed,
            "Starting fuzz campaign"
        );

        debug!("Replaying seed corpus");
        for seed in self.corpus.iter() {
            stats.record(self.run_trial(seed), TrialPhase::Seed);
            if config.stop_on_first_failure && stats.has_failures() {
                break;
            }
        }

        let halted = config.stop_on_first_failure && stats.has_failures();
        if config.trials > 0 && !halted {
            debug!("Starting mutation phase");
            let deadline = config.time_budget.map(|budget| Instant::now() + budget);
            self.run_mutation_phase(config, deadline, stop, &stats);
        }

        let interrupted = stop.load(Ordering::Relaxed);
        let trials = stats.trials.load(Ordering::Relaxed);
        let accepted = stats.accepted.load(Ordering::Relaxed);
        let rejected = stats.rejected.load(Ordering::Relaxed);
        let mut failures = stats.into_failures();

        // A failing input must reach the report even if it cannot be saved.
        if let Some(dir) = &config.crash_dir {
            for failure in &mut failures {
                match corpus::write_entry(dir, &failure.input) {
                    Ok(path) => {
                        info!(path = %path.display(), "Saved failing input");
                        failure.saved_to = Some(path);
                    }
                    Err(e) => {
                        warn!(dir = %dir.display(), error = %e, "Failed to save failing input");
                        failure.save_error = Some(e.to_string());
                    }
                }
            }
        }

        let report = CampaignReport {
            harness: self.name.clone(),
            started_at,
            seeds: self.corpus.len(),
            trials,
            accepted,
            rejected,
            failures,
            elapsed: start.elapsed(),
            interrupted,
        };

        if report.passed() {
            info!(
                trials = report.trials,
                elapsed_ms = report.elapsed.as_millis() as u64,
                interrupted,
                "Fuzz campaign passed"
            );
        } else {
            for failure in &report.failures {
                error!(input = %failure.input, message = %failure.message, "Failing input");
            }
            warn!(
                failures = report.failures.len(),
                trials = report.trials,
                "Fuzz campaign failed"
            );
        }

        Ok(report)
    }

    fn run_mutation_phase(
        &self,
        config: &FuzzConfig,
        deadline: Option<Instant>,
        stop: &AtomicBool,
        stats: &Stats,
    ) {
        let issued = AtomicU64::new(0);

        std::thread::scope(|scope| {
            for worker in 0..config.workers {
                let issued = &issued;
                scope.spawn(move || {
                    let mut mutator = Mutator::new(
                        config.rng_seed.wrapping_add(worker as u64),
                        config.max_input_len,
                    );
                    let mut ran = 0u64;

                    loop {
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }
                        if config.stop_on_first_failure && stats.has_failures() {
                            break;
                        }
                        if deadline.is_some_and(|d| Instant::now() >= d) {
                            break;
                        }
                        if issued.fetch_add(1, Ordering::Relaxed) >= config.trials {
                            break;
                        }

                        let candidate = mutator.next_candidate(&self.corpus);
                        stats.record(self.run_trial(&candidate), TrialPhase::Mutation);
                        ran += 1;
                    }

                    debug!(worker, trials = ran, "Worker finished");
                });
            }
        });
    }
}

#[derive(Default)]
struct FailureSet {
    seen: HashSet<InputDigest>,
    list: Vec<TrialFailure>,
}

/// Counters shared by all workers of one campaign.
#[derive(Default)]
struct Stats {
    trials: AtomicU64,
    accepted: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicBool,
    failures: Mutex<FailureSet>,
}

impl Stats {
    fn record(&self, outcome: TrialOutcome, phase: TrialPhase) {
        self.trials.fetch_add(1, Ordering::Relaxed);

        match outcome {
            TrialOutcome::Completed { accepted: true } => {
                self.accepted.fetch_add(1, Ordering::Relaxed);
            }
            TrialOutcome::Completed { accepted: false } => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
            }
            TrialOutcome::Aborted { input, message } => {
                self.failed.store(true, Ordering::Relaxed);
                let mut set = self
                    .failures
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                if set.seen.insert(input.digest()) {
                    set.list.push(TrialFailure {
                        input,
                        message,
                        phase,
                        saved_to: None,
                        save_error: None,
                    });
                }
            }
        }
    }

    fn has_failures(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }

    fn into_failures(self) -> Vec<TrialFailure> {
        self.failures
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .list
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
