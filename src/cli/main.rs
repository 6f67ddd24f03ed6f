//! Image operation micro-benchmark CLI
//!
//! Runs one named image-processing primitive once on one input image and
//! prints the elapsed milliseconds of that single call.

use crate::{
    runner::BenchmarkRunner,
    tracing_config::{events, init_cli_tracing, spans},
};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

/// Time a single image-processing operation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "imgop-bench")]
pub struct Cli {
    /// Task to run (exact, case-sensitive; see --list-tasks)
    #[arg(value_name = "TASK")]
    pub task: Option<String>,

    /// Input image file
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Enable verbose logging on stderr (-v: INFO, -vv: DEBUG, -vvv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// List available tasks and exit
    #[arg(long)]
    pub list_tasks: bool,

    /// Print the operation parameters as JSON and exit
    #[arg(long)]
    pub show_config: bool,
}

/// Main entry point for the CLI application
pub fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_cli_tracing(cli.verbose) {
        eprintln!("Warning: failed to initialize tracing: {:#}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            events::invocation_failed(&*e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let runner = BenchmarkRunner::default();

    // Handle special flags that don't require inputs
    if cli.list_tasks {
        return list_tasks(&runner);
    }

    if cli.show_config {
        return show_config(&runner);
    }

    let sample = match (cli.task.as_deref(), cli.file.as_deref()) {
        (Some(task), Some(file)) => {
            let _span = spans::invocation(task, file).entered();
            debug!(backend = runner.backend_name(), "Dispatching benchmark unit");
            let sample = runner.run(task, file)?;
            events::measurement(task, sample.elapsed_ms());
            sample
        },
        (task, file) => runner.run_invocation(task, file)?,
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", sample).context("Failed to write measurement")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

fn list_tasks(runner: &BenchmarkRunner) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for unit in runner.registry().units() {
        writeln!(stdout, "{:<20} {}", unit.name(), unit.description())?;
    }
    Ok(())
}

fn show_config(runner: &BenchmarkRunner) -> Result<()> {
    let json = serde_json::to_string_pretty(runner.config())
        .context("Failed to serialize configuration")?;
    println!("{}", json);
    Ok(())
}
