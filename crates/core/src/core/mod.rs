//! Core BPE data model.
//!
//! Tokens, word vocabularies, pair frequency tables and merge rules, shared
//! by every training strategy.

pub mod merges;
pub mod pairs;
pub mod priority;
pub mod special;
pub mod table;
pub mod token;
pub mod vocab;

pub use merges::{MergeRule, MergeRules};
pub use pairs::{Pair, PairFrequencyTable};
pub use priority::{MergeCandidate, PairPriorityQueue};
pub use table::TokenTable;
pub use token::{Token, TokenSequence};
pub use vocab::Vocabulary;
