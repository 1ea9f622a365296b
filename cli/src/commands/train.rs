//! Train command implementation.

use clap::Parser;
use pairwise_training::Strategy;
use std::path::PathBuf;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Directory of .txt files to train on
    #[arg(short, long, default_value = "data")]
    pub data: PathBuf,

    /// JSON training configuration; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum number of merge iterations
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Minimum pair frequency for a merge
    #[arg(short, long)]
    pub min_frequency: Option<u64>,

    /// Count pairs and apply merges on multiple threads
    #[arg(short, long)]
    pub parallel: bool,

    /// Pair accounting strategy (rebuild or incremental)
    #[arg(short, long)]
    pub strategy: Option<Strategy>,

    /// Output directory for the trained model
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write vocab.txt and merges.txt
    #[arg(short, long, default_value_t = false)]
    pub text: bool,

    /// Skip printing the vocabulary and merge rules
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

use anyhow::Result as AnyhowResult;
use pairwise_io::{CorpusLoader, ModelLoader, ModelSaver};
use pairwise_training::{Trainer, TrainingConfig, TrainingConfigBuilder};
use std::time::Instant;
use tracing::debug;

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let base = match &cmd.config {
        Some(path) => ModelLoader::load_config(path)?,
        None => TrainingConfig::default(),
    };

    let mut builder = TrainingConfigBuilder::from_config(base);
    if let Some(iterations) = cmd.iterations {
        builder = builder.max_iterations(iterations);
    }
    if let Some(min_frequency) = cmd.min_frequency {
        builder = builder.min_frequency(min_frequency);
    }
    if cmd.parallel {
        builder = builder.parallel(true);
    }
    if let Some(strategy) = cmd.strategy {
        builder = builder.strategy(strategy);
    }
    let config = builder.build()?;
    debug!(?config, "Resolved training configuration");

    println!("Training merge rules...");
    println!("  Data: {}", cmd.data.display());
    println!("  Max iterations: {}", config.max_iterations);
    println!("  Min frequency: {}", config.min_frequency);
    println!("  Parallel: {}", config.parallel);
    println!("  Strategy: {}", config.strategy);
    println!();

    // Read training data
    let start = Instant::now();
    let corpus = CorpusLoader::load_dir(&cmd.data)?;
    println!(
        "Read {} bytes in {:.2}s",
        corpus.len(),
        start.elapsed().as_secs_f64()
    );

    // Train
    let start = Instant::now();
    let output = Trainer::new(config.clone())?.train(&corpus)?;
    println!(
        "Learned {} merges in {:.2}s",
        output.merges().len(),
        start.elapsed().as_secs_f64()
    );
    if let Some(reason) = output.stop_reason() {
        println!("Stopped: {}", reason);
    }
    println!();

    if !cmd.quiet {
        println!("Vocabulary:");
        for (sequence, frequency) in output.vocabulary().sorted_entries() {
            println!("  {}: {}", sequence, frequency);
        }
        println!();

        println!("Merge rules:");
        for (rank, rule) in output.merges().iter().enumerate() {
            println!("  {:>4}  {}", rank, rule);
        }
        println!();
    }

    // Save model
    if let Some(path) = &cmd.output {
        let saver = ModelSaver::new(&output, &config);
        saver.save(path)?;
        if cmd.text {
            saver.save_text(path)?;
        }
        println!("Model saved to {}", path.display());
    }

    Ok(())
}
