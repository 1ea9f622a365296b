//! Training infrastructure for BPE vocabularies.
//!
//! Segmentation, pair counting, merge application and the trainer loop
//! that drives them.

pub mod applier;
pub mod config;
pub mod counter;
pub mod incremental;
pub mod segmenter;
pub mod trainer;

pub use applier::MergeApplier;
pub use config::{Strategy, TrainingConfig, TrainingConfigBuilder};
pub use counter::PairCounter;
pub use incremental::PairIndex;
pub use segmenter::CorpusSegmenter;
pub use trainer::{Step, StopReason, Trainer, TrainerState, TrainingOutput};
