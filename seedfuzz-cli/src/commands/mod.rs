//! Command implementations.

pub mod fuzz;
pub mod list;
pub mod replay;

use colored::Colorize;
use seedfuzz_core::CampaignReport;

use crate::utils::format_elapsed;
use crate::OutputFormat;

/// How a command should report.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Output {
    /// Human-readable text should be printed.
    pub fn text(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Text
    }

    pub fn json(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Json
    }
}

/// Print the body of a campaign report (indented, text mode).
fn print_campaign(report: &CampaignReport) {
    println!(
        "   {} {} seeds, {} trials ({} accepted, {} rejected)",
        "Trials:".dimmed(),
        report.seeds,
        report.trials,
        report.accepted,
        report.rejected
    );
    println!(
        "   {} {}",
        "Elapsed:".dimmed(),
        format_elapsed(report.elapsed.as_millis() as u64)
    );
    if report.interrupted {
        println!("   {} {}", "Note:".dimmed(), "interrupted".yellow());
    }

    for failure in &report.failures {
        println!();
        println!("   {} {}", "Failing input:".red(), failure.input);
        println!("   {} {}", "Panic:".dimmed(), failure.message);
        println!("   {} {}", "Seed literal:".dimmed(), failure.input.to_seed_literal());
        if let Some(path) = &failure.saved_to {
            println!("   {} {}", "Saved to:".dimmed(), path.display());
        }
        if let Some(err) = &failure.save_error {
            println!("   {} {}", "Not saved:".yellow(), err);
        }
    }
}
