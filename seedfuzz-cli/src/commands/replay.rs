//! Replay command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use seedfuzz_core::{corpus, Runner, TrialOutcome};
use serde_json::json;
use tracing::info;

use super::Output;
use crate::utils::{load_registry, print_json, run_blocking};

/// Execute the replay command.
pub async fn execute(
    output: Output,
    alt_platform_expectation: bool,
    name: String,
    file: PathBuf,
) -> Result<bool> {
    let registry = load_registry(alt_platform_expectation)?;

    let input = corpus::read_entry(&file)
        .with_context(|| format!("Failed to read corpus entry: {}", file.display()))?;
    info!(path = %file.display(), input = %input, "Read corpus entry");

    let test = name.clone();
    let replayed = input.clone();
    let outcome = run_blocking(move || Runner::default().replay(&registry, &test, &replayed))
        .await
        .with_context(|| format!("Cannot replay {name}"))?;

    if output.json() {
        print_json(&json!({ "test": name, "input": input, "result": outcome }))?;
    } else if output.text() {
        match &outcome {
            TrialOutcome::Completed { accepted } => {
                println!("{} {}", "PASS".green().bold(), name);
                println!("   {} {}", "Input:".dimmed(), input);
                println!(
                    "   {} {}",
                    "Target:".dimmed(),
                    if *accepted { "accepted" } else { "rejected" }
                );
            }
            TrialOutcome::Aborted { message, .. } => {
                println!("{} {}", "FAIL".red().bold(), name);
                println!("   {} {}", "Input:".dimmed(), input);
                println!("   {} {}", "Panic:".dimmed(), message);
            }
        }
    }

    Ok(outcome.is_completed())
}
