//! Save functionality for trained models.
//!
//! This module writes a training output to a directory, either as a single
//! JSON model file or as plain-text vocabulary and merge lists.

use super::format::{
    SerializedMerge, SerializedModel, VocabularyRecord, MERGES_TEXT_FILE, MODEL_FILE,
    VOCAB_TEXT_FILE,
};
use pairwise_core::{PairwiseError, Result};
use pairwise_training::{TrainingConfig, TrainingOutput};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Model saver - handles saving trained models.
pub struct ModelSaver<'a> {
    output: &'a TrainingOutput,
    config: &'a TrainingConfig,
}

impl<'a> ModelSaver<'a> {
    pub fn new(output: &'a TrainingOutput, config: &'a TrainingConfig) -> Self {
        Self { output, config }
    }

    /// Save the model to a directory as `model.json`.
    pub fn save(&self, path: &Path) -> Result<()> {
        create_dir(path)?;

        let file_path = path.join(MODEL_FILE);
        let writer = create_file(&file_path)?;
        let serialized = self.serialize()?;
        serde_json::to_writer_pretty(writer, &serialized)
            .map_err(|e| PairwiseError::Save(format!("Failed to serialize model: {}", e)))?;

        info!(path = %file_path.display(), merges = serialized.merges.len(), "Saved model");
        Ok(())
    }

    /// Save in plain text (vocab.txt + merges.txt).
    ///
    /// - `vocab.txt`: `<space-joined sequence>\t<frequency>`, most frequent first
    /// - `merges.txt`: `<left> <right>`, one rule per line in rank order
    pub fn save_text(&self, path: &Path) -> Result<()> {
        create_dir(path)?;

        let vocab_path = path.join(VOCAB_TEXT_FILE);
        let mut vocab_writer = create_file(&vocab_path)?;
        for (sequence, frequency) in self.output.vocabulary().sorted_entries() {
            writeln!(vocab_writer, "{}\t{}", sequence, frequency)
                .map_err(|e| PairwiseError::io(&vocab_path, e))?;
        }
        vocab_writer
            .flush()
            .map_err(|e| PairwiseError::io(&vocab_path, e))?;

        let merges_path = path.join(MERGES_TEXT_FILE);
        let mut merges_writer = create_file(&merges_path)?;
        for rule in self.output.merges() {
            writeln!(merges_writer, "{}", rule.pair)
                .map_err(|e| PairwiseError::io(&merges_path, e))?;
        }
        merges_writer
            .flush()
            .map_err(|e| PairwiseError::io(&merges_path, e))?;

        info!(path = %path.display(), "Saved text model");
        Ok(())
    }

    /// Serialize the model to a structure.
    pub fn serialize(&self) -> Result<SerializedModel> {
        let vocabulary = self
            .output
            .vocabulary()
            .sorted_entries()
            .into_iter()
            .map(|(sequence, frequency)| VocabularyRecord {
                sequence: sequence.to_string(),
                frequency,
            })
            .collect();

        let merges = self
            .output
            .merges()
            .iter()
            .enumerate()
            .map(|(rank, rule)| SerializedMerge {
                pair: (rule.pair.left.to_string(), rule.pair.right.to_string()),
                merged: rule.merged.to_string(),
                rank: rank as u32,
            })
            .collect();

        let tokens = self
            .output
            .token_table()?
            .iter()
            .map(|(_, token)| token.to_string())
            .collect();

        Ok(SerializedModel {
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: self.config.clone(),
            iterations: self.output.iterations(),
            stop_reason: self.output.stop_reason().map(|reason| reason.to_string()),
            vocabulary,
            merges,
            tokens,
        })
    }
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| {
        PairwiseError::Save(format!(
            "Failed to create directory {}: {}",
            path.display(),
            e
        ))
    })
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        PairwiseError::Save(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairwise_training::Trainer;

    #[test]
    fn test_serialize() {
        let config = TrainingConfig::builder().max_iterations(1).build().unwrap();
        let output = Trainer::new(config.clone()).unwrap().train("ab ab ab").unwrap();

        let serialized = ModelSaver::new(&output, &config).serialize().unwrap();

        assert_eq!(serialized.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(serialized.iterations, 1);
        assert_eq!(
            serialized.stop_reason.as_deref(),
            Some("iteration budget exhausted")
        );
        assert_eq!(
            serialized.vocabulary,
            vec![VocabularyRecord {
                sequence: "ab </w>".to_string(),
                frequency: 3,
            }]
        );
        assert_eq!(serialized.merges[0].merged, "ab");
        assert_eq!(serialized.tokens, vec!["</w>", "<unk>", "a", "b", "ab"]);
    }
}
