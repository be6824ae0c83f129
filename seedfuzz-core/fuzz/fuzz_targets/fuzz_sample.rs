#![no_main]

//! Fuzz target for sample::fuzzable()
//!
//! libFuzzer never hands out an absent input, so the first byte selects
//! between the absent sequence and the remaining bytes.
//!
//! Run with: cargo +nightly fuzz run fuzz_sample

use libfuzzer_sys::fuzz_target;
use seedfuzz_core::targets::sample;

fuzz_target!(|data: &[u8]| {
    let input = match data.split_first() {
        Some((0, _)) => None,
        Some((_, rest)) => Some(rest),
        None => Some(data),
    };
    let _ = sample::fuzzable(input);
});
