#![no_main]

//! Fuzz target for corpus entry decoding
//!
//! Malformed entry files must be reported as errors, never panic.
//! Anything that decodes must survive a re-encode.
//!
//! Run with: cargo +nightly fuzz run fuzz_corpus_entry

use libfuzzer_sys::fuzz_target;
use seedfuzz_core::corpus::{decode_entry, encode_entry};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = decode_entry(data) {
        let encoded = encode_entry(&input).expect("decoded entry must re-encode");
        let decoded = decode_entry(&encoded).expect("re-encoded entry must decode");
        assert_eq!(decoded, input);
    }
});
