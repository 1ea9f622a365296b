//! Load functionality for trained models.
//!
//! This module reads models written by [`ModelSaver`](crate::ModelSaver)
//! and training configuration files.

use super::format::{SerializedModel, MERGES_TEXT_FILE, MODEL_FILE, VOCAB_TEXT_FILE};
use pairwise_core::{
    MergeRule, MergeRules, Pair, PairwiseError, Result, Token, TokenSequence, TokenTable,
    Vocabulary,
};
use pairwise_training::TrainingConfig;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A model read back from disk.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub version: String,
    pub config: TrainingConfig,
    pub iterations: usize,
    pub stop_reason: Option<String>,
    pub vocabulary: Vocabulary,
    pub merges: MergeRules,
    pub tokens: TokenTable,
}

/// Model loader - handles loading trained models.
pub struct ModelLoader;

impl ModelLoader {
    /// Load a model from a directory containing `model.json`.
    pub fn load(path: &Path) -> Result<LoadedModel> {
        let file_path = path.join(MODEL_FILE);
        let file = File::open(&file_path).map_err(|e| {
            PairwiseError::Load(format!(
                "Failed to open file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        let serialized: SerializedModel = serde_json::from_reader(reader)
            .map_err(|e| PairwiseError::Load(format!("Failed to deserialize model: {}", e)))?;

        Self::deserialize(serialized)
    }

    /// Load the plain-text pair (vocab.txt + merges.txt).
    pub fn load_text(path: &Path) -> Result<(Vocabulary, MergeRules)> {
        let vocab_path = path.join(VOCAB_TEXT_FILE);
        let content = std::fs::read_to_string(&vocab_path)
            .map_err(|e| PairwiseError::io(&vocab_path, e))?;

        let mut vocabulary = Vocabulary::new();
        for (line_num, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let (sequence, frequency) = line.rsplit_once('\t').ok_or_else(|| {
                PairwiseError::Load(format!(
                    "Invalid vocabulary line {}: '{}'",
                    line_num + 1,
                    line
                ))
            })?;
            let frequency: u64 = frequency.trim().parse().map_err(|_| {
                PairwiseError::Load(format!(
                    "Invalid frequency at line {}: '{}'",
                    line_num + 1,
                    frequency
                ))
            })?;
            vocabulary.add(TokenSequence::parse(sequence), frequency);
        }

        let merges = Self::load_merges_txt(&path.join(MERGES_TEXT_FILE))?;
        Ok((vocabulary, merges))
    }

    /// Load merge rules from a `merges.txt` file, one `left right` pair per
    /// line in rank order.
    pub fn load_merges_txt(path: &Path) -> Result<MergeRules> {
        let content = std::fs::read_to_string(path).map_err(|e| PairwiseError::io(path, e))?;

        let mut merges = MergeRules::new();
        for (line_num, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split(' ').collect();
            if parts.len() != 2 || parts.iter().any(|part| part.is_empty()) {
                return Err(PairwiseError::Load(format!(
                    "Invalid merge format at line {}: '{}'",
                    line_num + 1,
                    line
                )));
            }
            merges.push(MergeRule::new(Pair::new(parts[0], parts[1])));
        }

        Ok(merges)
    }

    /// Read a training configuration from a JSON file. Missing fields take
    /// their defaults; the result is validated.
    pub fn load_config(path: &Path) -> Result<TrainingConfig> {
        let file = File::open(path).map_err(|e| PairwiseError::io(path, e))?;
        let config: TrainingConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Deserialize from a serialized structure.
    fn deserialize(data: SerializedModel) -> Result<LoadedModel> {
        let vocabulary = data
            .vocabulary
            .into_iter()
            .map(|record| (TokenSequence::parse(&record.sequence), record.frequency))
            .collect();

        let mut merges = MergeRules::with_capacity(data.merges.len());
        for (index, merge) in data.merges.into_iter().enumerate() {
            if merge.rank as usize != index {
                return Err(PairwiseError::Load(format!(
                    "Merge rules out of order: rank {} at position {}",
                    merge.rank, index
                )));
            }

            let rule = MergeRule::new(Pair::new(
                Token::new(&merge.pair.0),
                Token::new(&merge.pair.1),
            ));
            if rule.merged.as_str() != merge.merged {
                return Err(PairwiseError::Load(format!(
                    "Merged token '{}' does not match pair '{}'",
                    merge.merged, rule.pair
                )));
            }
            merges.push(rule);
        }

        let mut tokens = TokenTable::with_capacity(data.tokens.len());
        for token in &data.tokens {
            tokens.add_token(token)?;
        }

        Ok(LoadedModel {
            version: data.version,
            config: data.config,
            iterations: data.iterations,
            stop_reason: data.stop_reason,
            vocabulary,
            merges,
            tokens,
        })
    }
}
