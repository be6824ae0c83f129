#![no_main]

//! Fuzz target for pkg::fuzzable()
//!
//! Run with: cargo +nightly fuzz run fuzz_pkg

use libfuzzer_sys::fuzz_target;
use seedfuzz_core::targets::pkg;

fuzz_target!(|data: &[u8]| {
    let input = match data.split_first() {
        Some((0, _)) => None,
        Some((_, rest)) => Some(rest),
        None => Some(data),
    };
    let _ = pkg::fuzzable(input);
});
