//! Test runner.
//!
//! Runs registered tests one at a time, in name order. A failing or
//! panicking unit test only fails itself; a fuzz test runs a full campaign
//! with the runner's [`FuzzConfig`].

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::FuzzConfig;
use crate::error::Result;
use crate::harness::CampaignReport;
use crate::input::ByteSequence;
use crate::registry::{TestCase, TestKind, TestRegistry, UnitTestFn};
use crate::trial::{panic_message, TrialOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub kind: TestKind,
    #[serde(flatten)]
    pub status: TestStatus,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignReport>,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub results: Vec<TestResult>,
    pub elapsed_ms: u64,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(TestResult::passed)
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed()).count()
    }
}

pub struct Runner {
    config: FuzzConfig,
    stop: Arc<AtomicBool>,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(FuzzConfig::seeds_only())
    }
}

impl Runner {
    pub fn new(config: FuzzConfig) -> Self {
        Self {
            config,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a stop flag with the caller (e.g. a Ctrl-C handler).
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// Run every test whose name contains `filter`.
    pub fn run(&self, registry: &TestRegistry, filter: Option<&str>) -> Result<RunReport> {
        let start = Instant::now();
        let mut results = Vec::new();

        for (name, case) in registry.matching(filter) {
            results.push(self.run_test(name, case));
        }

        let report = RunReport {
            results,
            elapsed_ms: millis(start.elapsed()),
        };
        info!(
            tests = report.results.len(),
            failed = report.failed_count(),
            "Test run finished"
        );
        Ok(report)
    }

    /// Run one registered test case. A campaign that cannot run fails only
    /// this test.
    pub fn run_test(&self, name: &str, case: &TestCase) -> TestResult {
        debug!(test = name, kind = %case.kind(), "Running test");
        let start = Instant::now();

        let (status, campaign) = match case {
            TestCase::Unit(test) => (run_unit(test), None),
            TestCase::Fuzz(harness) => match harness.run(&self.config, &self.stop) {
                Ok(report) => (campaign_status(&report), Some(report)),
                Err(e) => (
                    TestStatus::Failed {
                        message: format!("campaign error: {e}"),
                    },
                    None,
                ),
            },
        };

        if let TestStatus::Failed { message } = &status {
            warn!(test = name, %message, "Test failed");
        }

        TestResult {
            name: name.to_string(),
            kind: case.kind(),
            status,
            elapsed_ms: millis(start.elapsed()),
            campaign,
        }
    }

    /// Run a campaign for a single fuzz test.
    pub fn fuzz(&self, registry: &TestRegistry, name: &str) -> Result<CampaignReport> {
        registry.fuzz_harness(name)?.run(&self.config, &self.stop)
    }

    /// Run one trial of fuzz test `name` on a stored input.
    pub fn replay(
        &self,
        registry: &TestRegistry,
        name: &str,
        input: &ByteSequence,
    ) -> Result<TrialOutcome> {
        let outcome = registry.fuzz_harness(name)?.run_trial(input);
        info!(test = name, input = %input, aborted = outcome.is_aborted(), "Replayed input");
        Ok(outcome)
    }
}

fn campaign_status(report: &CampaignReport) -> TestStatus {
    match report.failures.first() {
        None => TestStatus::Passed,
        Some(first) => TestStatus::Failed {
            message: format!(
                "{} failing input(s); first: {} ({})",
                report.failures.len(),
                first.input,
                first.message
            ),
        },
    }
}

fn run_unit(test: &UnitTestFn) -> TestStatus {
    match catch_unwind(AssertUnwindSafe(test)) {
        Ok(Ok(())) => TestStatus::Passed,
        Ok(Err(failure)) => TestStatus::Failed {
            message: failure.to_string(),
        },
        Err(payload) => TestStatus::Failed {
            message: format!("panicked: {}", panic_message(payload.as_ref())),
        },
    }
}

fn millis(elapsed: Duration) -> u64 {
    elapsed.as_millis().try_into().unwrap_or(u64::MAX)
}
