//! seedfuzz CLI - run registered tests and fuzz campaigns.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

mod commands;
mod exit_codes;
mod utils;

use exit_codes::ExitCode;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    #[default]
    Text,
    /// Pretty-printed JSON on stdout
    Json,
}

#[derive(Parser)]
#[command(name = "seedfuzz")]
#[command(author, version, about = "Seed-corpus fuzz harness and test runner", long_about = None)]
#[command(after_help = "Exit codes:
  0   All selected tests passed
  1   A test or trial failed
  64  Usage error (unknown test, invalid option)
  65  Malformed corpus entry
  66  Input file not found
  74  I/O error")]
struct Cli {
    /// Report format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Suppress human-readable output (exit code only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Expect the alternate value on the alternate platform
    #[arg(long, global = true)]
    alt_platform_expectation: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered tests
    List,

    /// Run registered tests; fuzz tests replay their seed corpus
    Test {
        /// Only run tests whose name contains FILTER
        #[arg(value_name = "FILTER")]
        filter: Option<String>,

        /// Mutated trials per fuzz test on top of the seeds
        #[arg(long, default_value_t = 0)]
        trials: u64,
    },

    /// Run a fuzz campaign for one fuzz test
    Fuzz {
        /// Registered fuzz test name (see `seedfuzz list`)
        #[arg(value_name = "NAME")]
        name: String,

        #[command(flatten)]
        options: commands::fuzz::FuzzOptions,
    },

    /// Run one trial on a stored corpus entry
    Replay {
        /// Registered fuzz test name
        #[arg(value_name = "NAME")]
        name: String,

        /// Corpus entry file (as written to --crash-dir)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    utils::init_tracing(cli.verbose);

    let output = commands::Output {
        format: cli.format,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::List => commands::list::execute(output, cli.alt_platform_expectation),
        Commands::Test { filter, trials } => {
            commands::test::execute(output, cli.alt_platform_expectation, filter, trials).await
        }
        Commands::Fuzz { name, options } => {
            commands::fuzz::execute(output, cli.alt_platform_expectation, name, options).await
        }
        Commands::Replay { name, file } => {
            commands::replay::execute(output, cli.alt_platform_expectation, name, file).await
        }
    };

    let exit = match result {
        Ok(true) => ExitCode::success(),
        Ok(false) => ExitCode::tests_failed(),
        Err(err) => ExitCode::from_anyhow(&err),
    };

    if let Some(message) = &exit.message {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }
    std::process::exit(exit.code);
}
