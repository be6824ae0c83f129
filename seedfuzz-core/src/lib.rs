//! seedfuzz core - seed-corpus fuzz harness
//!
//! This crate drives a target operation with arbitrary byte sequences and
//! checks a single property: the target never panics. Whatever the target
//! returns, success or error, counts as a completed trial.
//!
//! # Features
//!
//! - Append-only seed corpus with idempotent registration
//! - Panic containment per trial, reporting the exact failing input
//! - Deterministic mutation engine and multi-worker campaigns
//! - Explicit test registry and runner for fixed-value and fuzz tests
//! - JSON corpus entries for capturing failing inputs as regression seeds
//!
//! # Example
//!
//! ```
//! use std::sync::atomic::AtomicBool;
//! use std::sync::Arc;
//!
//! use seedfuzz_core::{ByteSequence, FnTarget, FuzzConfig, FuzzHarness, Invocation};
//!
//! # fn example() -> seedfuzz_core::Result<()> {
//! let target = FnTarget::new(|input: Option<&[u8]>| match input {
//!     Some(bytes) if bytes.len() > 64 => Invocation::rejected("too long"),
//!     _ => Invocation::Accepted,
//! });
//!
//! let harness = FuzzHarness::new("example", Arc::new(target))
//!     .with_seed(ByteSequence::absent())
//!     .with_seed(ByteSequence::empty())
//!     .with_seed(b"x");
//!
//! let config = FuzzConfig {
//!     trials: 1_000,
//!     ..FuzzConfig::default()
//! };
//! let report = harness.run(&config, &AtomicBool::new(false))?;
//! assert!(report.passed());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod expect;
pub mod harness;
pub mod input;
pub mod mutate;
pub mod registry;
pub mod runner;
pub mod targets;
pub mod target;
pub mod trial;

// Re-export main types for convenience
pub use config::FuzzConfig;
pub use corpus::SeedCorpus;
pub use error::{HarnessError, Result};
pub use expect::{assert_empty, assert_equal, AssertResult, AssertionFailure, PlatformExpectation};
pub use harness::{CampaignReport, FuzzHarness, TrialFailure, TrialPhase};
pub use input::ByteSequence;
pub use mutate::Mutator;
pub use registry::{TestCase, TestKind, TestRegistry};
pub use runner::{RunReport, Runner, TestResult, TestStatus};
pub use target::{FnTarget, Invocation, TargetOperation};
pub use targets::builtin_registry;
pub use trial::{run_trial, TrialOutcome};

#[cfg(test)]
mod tests {
    use super::*;

    /// Integration test: build the bundled registry and run every test.
    #[test]
    fn test_builtin_suite_passes() {
        let registry =
            builtin_registry(&PlatformExpectation::default()).expect("Failed to build registry");

        let report = Runner::default()
            .run(&registry, None)
            .expect("Runner failed");

        assert_eq!(report.results.len(), 4);
        assert!(report.passed(), "Bundled tests should pass: {report:?}");
    }

    /// Mutation campaigns over the bundled targets stay crash-free.
    #[test]
    fn test_builtin_fuzz_campaigns() {
        let registry = builtin_registry(&PlatformExpectation::default()).unwrap();
        let runner = Runner::new(FuzzConfig {
            trials: 2_000,
            workers: 2,
            ..FuzzConfig::default()
        });

        for name in [targets::sample::FUZZ_TEST, targets::pkg::FUZZ_TEST] {
            let report = runner.fuzz(&registry, name).expect("Campaign failed");
            assert!(report.passed(), "{name} should not panic");
            assert_eq!(report.trials, 2_003);
        }
    }
}
