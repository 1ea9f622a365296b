//! Benchmark command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    /// Directory of .txt files to train on
    #[arg(short, long, default_value = "data")]
    pub data: PathBuf,

    /// Merge iterations per training run
    #[arg(short, long, default_value_t = 200)]
    pub iterations: usize,

    /// Number of timed runs per strategy
    #[arg(short, long, default_value_t = 5)]
    pub runs: usize,
}

use anyhow::{bail, Result as AnyhowResult};
use pairwise_io::CorpusLoader;
use pairwise_training::{Strategy, Trainer, TrainingConfig, TrainingOutput};
use std::time::{Duration, Instant};

pub fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    if cmd.runs == 0 {
        bail!("--runs must be at least 1");
    }

    let corpus = CorpusLoader::load_dir(&cmd.data)?;

    println!("Benchmarking training...");
    println!("  Corpus length: {} bytes", corpus.len());
    println!("  Iterations: {}", cmd.iterations);
    println!("  Runs: {}", cmd.runs);
    println!();

    let mut outputs = Vec::new();
    for (strategy, parallel) in [
        (Strategy::Rebuild, false),
        (Strategy::Rebuild, true),
        (Strategy::Incremental, false),
    ] {
        let config = TrainingConfig::builder()
            .max_iterations(cmd.iterations)
            .strategy(strategy)
            .parallel(parallel)
            .build()?;

        let (output, elapsed) = time_runs(&corpus, &config, cmd.runs)?;
        let avg_ms = elapsed.as_secs_f64() * 1000.0 / cmd.runs as f64;
        println!(
            "  {:<12} parallel={:<5}  avg {:>9.3}ms  ({} merges)",
            strategy.to_string(),
            parallel,
            avg_ms,
            output.merges().len()
        );
        outputs.push(output);
    }

    let agree = outputs.windows(2).all(|pair| pair[0] == pair[1]);
    println!();
    println!("Strategies agree: {}", agree);
    if !agree {
        bail!("training strategies produced different results");
    }

    Ok(())
}

fn time_runs(
    corpus: &str,
    config: &TrainingConfig,
    runs: usize,
) -> AnyhowResult<(TrainingOutput, Duration)> {
    // Warmup
    let mut output = Trainer::new(config.clone())?.train(corpus)?;

    let start = Instant::now();
    for _ in 0..runs {
        output = Trainer::new(config.clone())?.train(corpus)?;
    }
    Ok((output, start.elapsed()))
}
