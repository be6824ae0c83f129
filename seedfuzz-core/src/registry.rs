//! Explicit test registry.
//!
//! Tests are registered by name into a [`TestRegistry`] built at startup and
//! handed to a [`Runner`](crate::runner::Runner). Nothing registers itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HarnessError, Result};
use crate::expect::AssertResult;
use crate::harness::FuzzHarness;

/// Boxed fixed-value test.
pub type UnitTestFn = Box<dyn Fn() -> AssertResult + Send + Sync>;

pub enum TestCase {
    Unit(UnitTestFn),
    Fuzz(FuzzHarness),
}

impl TestCase {
    pub fn kind(&self) -> TestKind {
        match self {
            Self::Unit(_) => TestKind::Unit,
            Self::Fuzz(_) => TestKind::Fuzz,
        }
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit(_) => f.write_str("Unit(..)"),
            Self::Fuzz(harness) => f.debug_tuple("Fuzz").field(harness).finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    Unit,
    Fuzz,
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit => write!(f, "unit"),
            Self::Fuzz => write!(f, "fuzz"),
        }
    }
}

#[derive(Debug, Default)]
pub struct TestRegistry {
    tests: BTreeMap<String, TestCase>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_unit<F>(&mut self, name: impl Into<String>, test: F) -> Result<()>
    where
        F: Fn() -> AssertResult + Send + Sync + 'static,
    {
        self.insert(name.into(), TestCase::Unit(Box::new(test)))
    }

    /// Register a fuzz harness under its own name.
    pub fn register_fuzz(&mut self, harness: FuzzHarness) -> Result<()> {
        self.insert(harness.name().to_string(), TestCase::Fuzz(harness))
    }

    fn insert(&mut self, name: String, case: TestCase) -> Result<()> {
        if self.tests.contains_key(&name) {
            return Err(HarnessError::DuplicateTest(name));
        }
        debug!(test = %name, kind = %case.kind(), "Registered test");
        self.tests.insert(name, case);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&TestCase> {
        self.tests
            .get(name)
            .ok_or_else(|| HarnessError::UnknownTest(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut TestCase> {
        self.tests
            .get_mut(name)
            .ok_or_else(|| HarnessError::UnknownTest(name.to_string()))
    }

    pub fn fuzz_harness(&self, name: &str) -> Result<&FuzzHarness> {
        match self.get(name)? {
            TestCase::Fuzz(harness) => Ok(harness),
            TestCase::Unit(_) => Err(HarnessError::NotAFuzzTest(name.to_string())),
        }
    }

    pub fn fuzz_harness_mut(&mut self, name: &str) -> Result<&mut FuzzHarness> {
        match self.get_mut(name)? {
            TestCase::Fuzz(harness) => Ok(harness),
            TestCase::Unit(_) => Err(HarnessError::NotAFuzzTest(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Tests in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TestCase)> {
        self.tests.iter().map(|(name, case)| (name.as_str(), case))
    }

    /// Tests whose name contains `filter`, or all tests when `filter` is `None`.
    pub fn matching<'a>(
        &'a self,
        filter: Option<&'a str>,
    ) -> impl Iterator<Item = (&'a str, &'a TestCase)> + 'a {
        self.iter()
            .filter(move |(name, _)| filter.map_or(true, |f| name.contains(f)))
    }
}
