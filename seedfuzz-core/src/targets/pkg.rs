//! The `pkg` package.

use std::sync::Arc;

use crate::expect::{assert_empty, AssertResult};
use crate::harness::FuzzHarness;
use crate::input::ByteSequence;
use crate::target::{FnTarget, Invocation};

pub const VALUE_TEST: &str = "pkg::value";
pub const FUZZ_TEST: &str = "pkg::fuzz";

/// Zero-argument value operation. Always empty.
pub fn value() -> String {
    String::new()
}

/// Whether `input` is valid UTF-8. Absent input is treated as empty.
pub fn fuzzable(input: Option<&[u8]>) -> bool {
    std::str::from_utf8(input.unwrap_or_default()).is_ok()
}

pub fn value_test() -> AssertResult {
    assert_empty(value(), "pkg::value()")
}

pub fn fuzz_harness() -> FuzzHarness {
    let target = FnTarget::new(|input: Option<&[u8]>| {
        if fuzzable(input) {
            Invocation::Accepted
        } else {
            Invocation::rejected("not UTF-8")
        }
    });

    FuzzHarness::new(FUZZ_TEST, Arc::new(target))
        .with_seed(ByteSequence::absent())
        .with_seed(ByteSequence::empty())
        .with_seed(b"x")
}
