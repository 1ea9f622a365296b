//! Pairwise-core - Core data model for BPE vocabulary training
//!
//! This crate provides the data structures shared by the training
//! strategies and the persistence layer: tokens, word vocabularies, pair
//! frequency tables and ordered merge rules.
//!
//! # Features
//!
//! - Small-string-optimized tokens (`CompactString`) with cheap equality
//! - Deterministic pair ranking: frequency first, then token order
//! - Ordered merge rules with rank lookup
//! - Token table for id assignment of trained models
//!
//! # Example
//!
//! ```rust
//! use pairwise_core::{Pair, TokenSequence, Vocabulary};
//!
//! let mut vocab = Vocabulary::new();
//! vocab.increment(TokenSequence::from_word("low"));
//! vocab.increment(TokenSequence::from_word("low"));
//!
//! assert_eq!(vocab.get(&TokenSequence::parse("l o w </w>")), Some(2));
//! assert_eq!(Pair::new("l", "o").merged().as_str(), "lo");
//! ```

pub mod error;
pub use error::{PairwiseError, Result};

pub mod core;
pub use self::core::special::{self, END_OF_WORD, FORBIDDEN_WORDS, SPACE, UNKNOWN};
pub use self::core::{
    MergeCandidate, MergeRule, MergeRules, Pair, PairFrequencyTable, PairPriorityQueue, Token,
    TokenSequence, TokenTable, Vocabulary,
};
