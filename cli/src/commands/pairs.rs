//! Pairs command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Pairs command arguments.
#[derive(Parser)]
pub struct PairsCommand {
    /// Directory of .txt files to read
    #[arg(short, long, default_value = "data", conflicts_with = "file")]
    pub data: PathBuf,

    /// Read a single text file instead of a directory
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Only show the K most frequent pairs
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Also print character frequencies
    #[arg(short, long, default_value_t = false)]
    pub chars: bool,
}

use anyhow::Result as AnyhowResult;
use pairwise_io::CorpusLoader;
use pairwise_training::{CorpusSegmenter, PairCounter};

pub fn run(cmd: PairsCommand) -> AnyhowResult<()> {
    let corpus = match &cmd.file {
        Some(path) => CorpusLoader::load_file(path)?,
        None => CorpusLoader::load_dir(&cmd.data)?,
    };
    let vocab = CorpusSegmenter::segment(&corpus);
    let ranked = PairCounter::count(&vocab).ranked();

    println!(
        "{} words, {} distinct, {} pairs",
        vocab.total_frequency(),
        vocab.len(),
        ranked.len()
    );

    if cmd.chars {
        let mut chars: Vec<_> = CorpusSegmenter::character_counts(&corpus)
            .into_iter()
            .collect();
        chars.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        println!("Characters:");
        for (token, frequency) in &chars {
            println!("  {:?}: {}", token.as_str(), frequency);
        }
        println!("Pairs:");
    }

    let limit = cmd.top.unwrap_or(ranked.len());
    for (pair, frequency) in ranked.iter().take(limit) {
        println!("  {}: {}", pair, frequency);
    }

    Ok(())
}
