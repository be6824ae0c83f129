//! The `sample` package.

use std::sync::Arc;

use crate::expect::{assert_equal, AssertResult, PlatformExpectation};
use crate::harness::FuzzHarness;
use crate::input::ByteSequence;
use crate::target::{FnTarget, Invocation};

pub const VALUE_TEST: &str = "sample::value";
pub const FUZZ_TEST: &str = "sample::fuzz";

/// Zero-argument value operation.
pub fn value() -> i64 {
    1
}

/// Length of `input`; the absent sequence counts as zero bytes.
pub fn fuzzable(input: Option<&[u8]>) -> usize {
    input.map_or(0, <[u8]>::len)
}

pub fn value_test(expectation: &PlatformExpectation) -> AssertResult {
    assert_equal(expectation.expected(), value(), "sample::value()")
}

pub fn fuzz_harness() -> FuzzHarness {
    let target = FnTarget::new(|input: Option<&[u8]>| {
        let _ = fuzzable(input);
        Invocation::Accepted
    });

    FuzzHarness::new(FUZZ_TEST, Arc::new(target))
        .with_seed(ByteSequence::absent())
        .with_seed(ByteSequence::empty())
        .with_seed(b"x")
}
