//! Common utility functions shared across CLI commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use seedfuzz_core::{builtin_registry, PlatformExpectation, TestRegistry};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the bundled registry with the requested platform toggle.
pub fn load_registry(alt_platform_expectation: bool) -> Result<TestRegistry> {
    let mut expectation = PlatformExpectation::from_env();
    expectation.enabled |= alt_platform_expectation;
    debug!(?expectation, "Resolved platform expectation");

    builtin_registry(&expectation).context("Failed to build test registry")
}

/// Raise the returned flag on Ctrl-C so running campaigns wind down.
pub fn install_interrupt_handler() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, stopping after in-flight trials");
            flag.store(true, Ordering::Relaxed);
        }
    });

    stop
}

/// Run blocking harness work off the async runtime.
pub async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> seedfuzz_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(work)
        .await
        .context("Harness task panicked")?;
    Ok(result?)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{json}");
    Ok(())
}

/// Format a millisecond duration for humans.
pub fn format_elapsed(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else {
        format!("{:.2}s", ms as f64 / 1_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0ms");
        assert_eq!(format_elapsed(999), "999ms");
        assert_eq!(format_elapsed(1_500), "1.50s");
    }

    #[test]
    fn test_load_registry() {
        let registry = load_registry(false).unwrap();
        assert_eq!(registry.len(), 4);
    }
}
