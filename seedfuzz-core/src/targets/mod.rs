//! Bundled packages and their registered tests.
//!
//! | Test            | Kind | Checks                                   |
//! |-----------------|------|------------------------------------------|
//! | `pkg::fuzz`     | fuzz | `pkg::fuzzable` never panics             |
//! | `pkg::value`    | unit | `pkg::value()` is empty                  |
//! | `sample::fuzz`  | fuzz | `sample::fuzzable` never panics          |
//! | `sample::value` | unit | `sample::value()` equals the expectation |

pub mod pkg;
pub mod sample;

use crate::error::Result;
use crate::expect::PlatformExpectation;
use crate::registry::TestRegistry;

/// Registry holding every bundled test.
pub fn builtin_registry(expectation: &PlatformExpectation) -> Result<TestRegistry> {
    let mut registry = TestRegistry::new();

    let expectation = expectation.clone();
    registry.register_unit(sample::VALUE_TEST, move || {
        sample::value_test(&expectation)
    })?;
    registry.register_fuzz(sample::fuzz_harness())?;

    registry.register_unit(pkg::VALUE_TEST, pkg::value_test)?;
    registry.register_fuzz(pkg::fuzz_harness())?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TestKind;

    #[test]
    fn test_builtin_registry_contents() {
        let registry = builtin_registry(&PlatformExpectation::default()).unwrap();

        let tests: Vec<_> = registry
            .iter()
            .map(|(name, case)| (name, case.kind()))
            .collect();
        assert_eq!(
            tests,
            [
                ("pkg::fuzz", TestKind::Fuzz),
                ("pkg::value", TestKind::Unit),
                ("sample::fuzz", TestKind::Fuzz),
                ("sample::value", TestKind::Unit),
            ]
        );
    }
}
