//! Pairwise-training - BPE training infrastructure
//!
//! This crate learns an ordered list of BPE merge rules from raw text.
//!
//! # Features
//!
//! - Whitespace segmentation with end-of-word sentinels
//! - Pair frequency counting with optional parallel processing
//! - Deterministic pair selection (frequency, then token order)
//! - Rebuild-per-iteration or incremental pair accounting
//!
//! # Example
//!
//! ```rust
//! use pairwise_training::{Trainer, TrainingConfig};
//!
//! let config = TrainingConfig::builder()
//!     .max_iterations(10)
//!     .build()?;
//!
//! let output = Trainer::new(config)?.train("low lower lowest")?;
//! for rule in output.merges() {
//!     println!("{}", rule);
//! }
//! # Ok::<(), pairwise_training::PairwiseError>(())
//! ```

pub use pairwise_core::{PairwiseError, Result};

// Training infrastructure
pub mod training;
pub use training::{
    CorpusSegmenter, MergeApplier, PairCounter, PairIndex, Step, StopReason, Strategy, Trainer,
    TrainerState, TrainingConfig, TrainingConfigBuilder, TrainingOutput,
};
