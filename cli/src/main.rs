//! Pairwise CLI - Command-line interface for BPE vocabulary training.
//!
//! This is the main entry point for the `pairwise` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BenchmarkCommand, InspectCommand, PairsCommand, TrainCommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pairwise")]
#[command(about = "Learn BPE merge rules from a text corpus", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train merge rules from a directory of text files
    Train(TrainCommand),
    /// Show ranked pair frequencies of the initial vocabulary
    Pairs(PairsCommand),
    /// Print a saved model
    Inspect(InspectCommand),
    /// Time both training strategies on a corpus
    Benchmark(BenchmarkCommand),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(cmd) => commands::train::run(cmd)?,
        Commands::Pairs(cmd) => commands::pairs::run(cmd)?,
        Commands::Inspect(cmd) => commands::inspect::run(cmd)?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd)?,
    }

    Ok(())
}
