//! List command implementation.

use anyhow::Result;
use colored::Colorize;
use seedfuzz_core::TestCase;
use serde_json::json;

use super::Output;
use crate::utils::{load_registry, print_json};

/// Execute the list command.
pub fn execute(output: Output, alt_platform_expectation: bool) -> Result<bool> {
    let registry = load_registry(alt_platform_expectation)?;

    if output.json() {
        let tests: Vec<_> = registry
            .iter()
            .map(|(name, case)| {
                let seeds = match case {
                    TestCase::Fuzz(harness) => Some(harness.corpus().len()),
                    TestCase::Unit(_) => None,
                };
                json!({ "name": name, "kind": case.kind(), "seeds": seeds })
            })
            .collect();
        print_json(&tests)?;
    } else if output.text() {
        for (name, case) in registry.iter() {
            match case {
                TestCase::Fuzz(harness) => println!(
                    "{:<16} {}  {}",
                    name,
                    "fuzz".cyan(),
                    format!("{} seeds", harness.corpus().len()).dimmed()
                ),
                TestCase::Unit(_) => println!("{:<16} {}", name, "unit".blue()),
            }
        }
    }

    Ok(true)
}
