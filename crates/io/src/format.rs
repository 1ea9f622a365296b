//! Format definitions for model serialization.
//!
//! This module defines the data structures used for saving and loading
//! trained models. Token sequences use their space-joined text form.

use pairwise_training::TrainingConfig;
use serde::{Deserialize, Serialize};

/// File names inside a model directory.
pub const MODEL_FILE: &str = "model.json";
pub const VOCAB_TEXT_FILE: &str = "vocab.txt";
pub const MERGES_TEXT_FILE: &str = "merges.txt";

/// One word-form and its corpus frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    /// Tokens joined by a single space, e.g. `"ab </w>"`
    pub sequence: String,
    pub frequency: u64,
}

/// Merge rule for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedMerge {
    /// The pair of tokens being merged
    pub pair: (String, String),
    /// The token produced by the merge
    pub merged: String,
    /// The rank/priority of this merge
    pub rank: u32,
}

/// Complete model serialization format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Format version
    pub version: String,
    /// Configuration the model was trained with
    pub config: TrainingConfig,
    /// Number of merges applied
    pub iterations: usize,
    /// Why training stopped, if it stopped on its own
    pub stop_reason: Option<String>,
    /// Final vocabulary, most frequent first
    pub vocabulary: Vec<VocabularyRecord>,
    /// Merge rules in rank order
    pub merges: Vec<SerializedMerge>,
    /// Token table in id order
    pub tokens: Vec<String>,
}
