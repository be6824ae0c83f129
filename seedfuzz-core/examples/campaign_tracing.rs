//! Example demonstrating campaign tracing and failure capture.
//!
//! Run with: cargo run -p seedfuzz-core --example campaign_tracing

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use seedfuzz_core::{ByteSequence, FnTarget, FuzzConfig, FuzzHarness, Invocation};
use tracing_subscriber::{fmt, EnvFilter};

/// Toy length-prefixed record parser with an off-by-one bug.
fn parse_record(input: Option<&[u8]>) -> Invocation {
    let Some((&len, body)) = input.and_then(<[u8]>::split_first) else {
        return Invocation::rejected("missing length prefix");
    };
    if usize::from(len) > body.len() + 1 {
        return Invocation::rejected("truncated record");
    }
    let _payload = &body[..usize::from(len)];
    Invocation::Accepted
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::new("seedfuzz_core=debug,info"))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    println!("=== seedfuzz campaign demo ===\n");

    let harness = FuzzHarness::new("demo::record", Arc::new(FnTarget::new(parse_record)))
        .with_seed(ByteSequence::absent())
        .with_seed(ByteSequence::empty())
        .with_seed(&[2u8, b'h', b'i']);

    let config = FuzzConfig {
        trials: 50_000,
        workers: 2,
        max_input_len: 16,
        ..FuzzConfig::default()
    };
    println!("Config: {config:?}\n");

    let report = match harness.run(&config, &AtomicBool::new(false)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Campaign error: {e}");
            return;
        }
    };

    println!("\nTrials: {} ({} accepted)", report.trials, report.accepted);
    for failure in &report.failures {
        println!("Failing input: {}", failure.input);
        println!("   Panic:        {}", failure.message);
        println!("   Seed literal: {}", failure.input.to_seed_literal());
    }
}
