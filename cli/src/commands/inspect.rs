//! Inspect command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Inspect command arguments.
#[derive(Parser)]
pub struct InspectCommand {
    /// Directory containing model.json
    #[arg(short, long)]
    pub model: PathBuf,

    /// Print the token table
    #[arg(short, long, default_value_t = false)]
    pub tokens: bool,

    /// Look up the token with this id (repeatable)
    #[arg(short, long)]
    pub id: Vec<u32>,
}

use anyhow::Result as AnyhowResult;
use pairwise_io::ModelLoader;

pub fn run(cmd: InspectCommand) -> AnyhowResult<()> {
    let model = ModelLoader::load(&cmd.model)?;

    println!("Model {} (format {})", cmd.model.display(), model.version);
    println!("  Max iterations: {}", model.config.max_iterations);
    println!("  Strategy: {}", model.config.strategy);
    println!("  Merges: {}", model.merges.len());
    if let Some(reason) = &model.stop_reason {
        println!("  Stopped: {}", reason);
    }
    println!("  Words: {}", model.vocabulary.total_frequency());
    println!("  Distinct words: {}", model.vocabulary.len());
    println!("  Distinct tokens in use: {}", model.vocabulary.distinct_tokens().len());
    println!("  Token table size: {}", model.tokens.len());
    println!();

    // Every rule's operands and result must have an id in the table
    println!("Merge rules:");
    for (rank, rule) in model.merges.iter().enumerate() {
        let left = model.tokens.require_id(rule.pair.left.as_str())?;
        let right = model.tokens.require_id(rule.pair.right.as_str())?;
        let merged = model.tokens.require_id(rule.merged.as_str())?;
        println!("  {:>4}  {}  [{} {} -> {}]", rank, rule, left, right, merged);
    }

    if cmd.tokens {
        println!();
        println!("Tokens:");
        for (id, token) in model.tokens.iter() {
            println!("  {:>6}  {}", id, token);
        }
    }

    if !cmd.id.is_empty() {
        println!();
        for &id in &cmd.id {
            println!("  {:>6}  {}", id, model.tokens.require_token(id)?);
        }
    }

    Ok(())
}
