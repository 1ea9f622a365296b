//! Pairwise-io - Corpus loading and model persistence
//!
//! This crate is the file-system side of pairwise: it gathers a training
//! corpus from a data directory and saves or loads trained models.
//!
//! # Example
//!
//! ```rust,no_run
//! use pairwise_io::{CorpusLoader, ModelSaver};
//! use pairwise_training::{Trainer, TrainingConfig};
//! use std::path::Path;
//!
//! let corpus = CorpusLoader::load_dir(Path::new("data"))?;
//! let config = TrainingConfig::default();
//! let output = Trainer::new(config.clone())?.train(&corpus)?;
//! ModelSaver::new(&output, &config).save(Path::new("model"))?;
//! # Ok::<(), pairwise_core::PairwiseError>(())
//! ```

pub use pairwise_core::{PairwiseError, Result};

pub mod corpus;
pub use corpus::CorpusLoader;

pub mod format;
pub use format::{SerializedMerge, SerializedModel, VocabularyRecord};

pub mod load;
pub use load::{LoadedModel, ModelLoader};

pub mod save;
pub use save::ModelSaver;
