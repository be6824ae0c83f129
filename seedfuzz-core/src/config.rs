//! Campaign configuration.
//!
//! Loaded from environment variables with defaults; front ends override
//! individual fields afterwards.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{HarnessError, Result};

/// Default number of mutated trials per campaign.
pub const DEFAULT_TRIALS: u64 = 10_000;

/// Default upper bound on generated input length in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 4096;

/// Default RNG seed for the mutation engine.
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_F022;

/// Fuzz campaign configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzConfig {
    /// Mutated trials to run after the seed replay (0 = seeds only)
    pub trials: u64,
    /// Optional wall-clock budget for the mutation phase
    pub time_budget: Option<Duration>,
    /// Worker threads for the mutation phase (default: 1)
    pub workers: usize,
    /// Seed for the mutation engine; worker `n` uses `rng_seed + n`
    pub rng_seed: u64,
    /// Upper bound on generated input length
    pub max_input_len: usize,
    /// Stop the campaign at the first failing trial (default: true)
    pub stop_on_first_failure: bool,
    /// Where failing inputs are written as corpus entries
    pub crash_dir: Option<PathBuf>,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            time_budget: None,
            workers: 1,
            rng_seed: DEFAULT_RNG_SEED,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            stop_on_first_failure: true,
            crash_dir: None,
        }
    }
}

impl FuzzConfig {
    /// Configuration that only replays the seed corpus.
    pub fn seeds_only() -> Self {
        Self {
            trials: 0,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `SEEDFUZZ_TRIALS`, `SEEDFUZZ_TIME_BUDGET_SECS`, `SEEDFUZZ_WORKERS`,
    /// `SEEDFUZZ_RNG_SEED`, `SEEDFUZZ_MAX_INPUT_LEN`, `SEEDFUZZ_CRASH_DIR`,
    /// `SEEDFUZZ_STOP_ON_FAILURE`. Unparseable values fall back to the
    /// default.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let trials = env_parse("SEEDFUZZ_TRIALS").unwrap_or(defaults.trials);

        let time_budget = env_parse::<u64>("SEEDFUZZ_TIME_BUDGET_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let workers = env_parse("SEEDFUZZ_WORKERS").unwrap_or(defaults.workers);

        let rng_seed = env_parse("SEEDFUZZ_RNG_SEED").unwrap_or(defaults.rng_seed);

        let max_input_len = env_parse("SEEDFUZZ_MAX_INPUT_LEN").unwrap_or(defaults.max_input_len);

        // Stopping on first failure stays on unless explicitly disabled
        let stop_on_first_failure = std::env::var("SEEDFUZZ_STOP_ON_FAILURE")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let crash_dir = std::env::var("SEEDFUZZ_CRASH_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Self {
            trials,
            time_budget,
            workers,
            rng_seed,
            max_input_len,
            stop_on_first_failure,
            crash_dir,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(HarnessError::InvalidConfig(
                "workers must be at least 1".into(),
            ));
        }
        if self.time_budget == Some(Duration::ZERO) {
            return Err(HarnessError::InvalidConfig(
                "time budget must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FuzzConfig::default();
        assert_eq!(config.trials, DEFAULT_TRIALS);
        assert_eq!(config.workers, 1);
        assert!(config.stop_on_first_failure);
        assert!(config.crash_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seeds_only() {
        let config = FuzzConfig::seeds_only();
        assert_eq!(config.trials, 0);
        assert_eq!(config.max_input_len, DEFAULT_MAX_INPUT_LEN);
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = FuzzConfig {
            workers: 0,
            ..FuzzConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(HarnessError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_time_budget() {
        let config = FuzzConfig {
            time_budget: Some(Duration::ZERO),
            ..FuzzConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_parse_ignores_garbage() {
        // Key chosen so no other test touches it.
        std::env::set_var("SEEDFUZZ_TEST_ONLY_GARBAGE", "not-a-number");
        assert_eq!(env_parse::<u64>("SEEDFUZZ_TEST_ONLY_GARBAGE"), None);
        std::env::set_var("SEEDFUZZ_TEST_ONLY_GARBAGE", " 12 ");
        assert_eq!(env_parse::<u64>("SEEDFUZZ_TEST_ONLY_GARBAGE"), Some(12));
        std::env::remove_var("SEEDFUZZ_TEST_ONLY_GARBAGE");
    }
}
