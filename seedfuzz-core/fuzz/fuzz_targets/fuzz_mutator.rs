#![no_main]

//! Fuzz target for the mutation engine
//!
//! The first 8 bytes seed the RNG, the next byte bounds the input length and
//! the rest becomes a seed. Mutated candidates must respect the bound.
//!
//! Run with: cargo +nightly fuzz run fuzz_mutator

use libfuzzer_sys::fuzz_target;
use seedfuzz_core::{ByteSequence, Mutator, SeedCorpus};

fuzz_target!(|data: &[u8]| {
    if data.len() < 9 {
        return;
    }
    let (head, rest) = data.split_at(8);
    let rng_seed = u64::from_le_bytes(head.try_into().unwrap());
    let max_len = usize::from(rest[0]);

    let corpus: SeedCorpus = [ByteSequence::absent(), ByteSequence::from(&rest[1..])]
        .into_iter()
        .collect();
    let mut mutator = Mutator::new(rng_seed, max_len);

    for _ in 0..16 {
        assert!(mutator.next_candidate(&corpus).len() <= max_len);
    }
});
