//! Fixed-value assertions and the platform-conditional expectation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed-value check that did not hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFailure {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.message, self.expected, self.actual
        )
    }
}

impl std::error::Error for AssertionFailure {}

pub type AssertResult = std::result::Result<(), AssertionFailure>;

pub fn assert_equal<T>(expected: T, actual: T, message: &str) -> AssertResult
where
    T: PartialEq + fmt::Debug,
{
    if expected == actual {
        return Ok(());
    }
    Err(AssertionFailure {
        message: message.to_string(),
        expected: format!("{expected:?}"),
        actual: format!("{actual:?}"),
    })
}

pub fn assert_empty<T>(value: T, message: &str) -> AssertResult
where
    T: AsRef<str>,
{
    let value = value.as_ref();
    if value.is_empty() {
        return Ok(());
    }
    Err(AssertionFailure {
        message: message.to_string(),
        expected: "empty value".to_string(),
        actual: format!("{value:?}"),
    })
}

/// Expected result of a value check that may differ on one platform family.
///
/// Disabled by default: `default` applies everywhere. When enabled,
/// `alt_platform` applies on the OS named by `alt_os` (as reported by
/// `std::env::consts::OS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformExpectation {
    pub default: i64,
    pub alt_platform: i64,
    pub alt_os: String,
    pub enabled: bool,
}

impl Default for PlatformExpectation {
    fn default() -> Self {
        Self {
            default: 1,
            alt_platform: 0,
            alt_os: "windows".to_string(),
            enabled: false,
        }
    }
}

impl PlatformExpectation {
    /// Defaults, with the toggle read from `SEEDFUZZ_PLATFORM_CONDITIONAL`
    /// and the alternate OS from `SEEDFUZZ_ALT_OS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let enabled = std::env::var("SEEDFUZZ_PLATFORM_CONDITIONAL")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        let alt_os = std::env::var("SEEDFUZZ_ALT_OS")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.alt_os);
        Self {
            enabled,
            alt_os,
            ..defaults
        }
    }

    pub fn expected_for(&self, os: &str) -> i64 {
        if self.enabled && os == self.alt_os {
            self.alt_platform
        } else {
            self.default
        }
    }

    /// Expected value on the platform this binary runs on.
    pub fn expected(&self) -> i64 {
        self.expected_for(std::env::consts::OS)
    }
}
