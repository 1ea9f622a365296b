//! Word vocabulary: token sequence -> corpus frequency.
//!
//! This is the state the trainer threads through every iteration. Each merge
//! produces a fresh `Vocabulary`; nothing is edited in place.

use super::token::{Token, TokenSequence};
use ahash::{AHashMap, AHashSet};

/// Mapping from word-form decomposition to occurrence count.
///
/// Invariants: every stored frequency is at least 1 and each token sequence
/// appears once. Adding an existing sequence sums the frequencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: AHashMap<TokenSequence, u64>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: AHashMap::with_capacity(capacity),
        }
    }

    /// Add `frequency` occurrences of a sequence. Zero is a no-op.
    pub fn add(&mut self, sequence: TokenSequence, frequency: u64) {
        if frequency == 0 {
            return;
        }
        *self.entries.entry(sequence).or_insert(0) += frequency;
    }

    /// Count one more occurrence of a sequence.
    #[inline]
    pub fn increment(&mut self, sequence: TokenSequence) {
        self.add(sequence, 1);
    }

    /// Fold another vocabulary into this one, keeping sequences unique.
    pub fn absorb(&mut self, other: Vocabulary) {
        for (sequence, frequency) in other.entries {
            self.add(sequence, frequency);
        }
    }

    #[inline]
    pub fn get(&self, sequence: &TokenSequence) -> Option<u64> {
        self.entries.get(sequence).copied()
    }

    /// Number of distinct word-forms.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TokenSequence, u64)> + '_ {
        self.entries.iter().map(|(seq, &freq)| (seq, freq))
    }

    /// Sum of all word frequencies (corpus word count).
    pub fn total_frequency(&self) -> u64 {
        self.entries.values().sum()
    }

    /// Every distinct token used across all sequences.
    pub fn distinct_tokens(&self) -> AHashSet<Token> {
        self.entries
            .keys()
            .flat_map(|seq| seq.iter().cloned())
            .collect()
    }

    /// Entries ordered by frequency descending, then sequence ascending.
    pub fn sorted_entries(&self) -> Vec<(&TokenSequence, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl FromIterator<(TokenSequence, u64)> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = (TokenSequence, u64)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut vocab = Self::with_capacity(iter.size_hint().0);
        for (sequence, frequency) in iter {
            vocab.add(sequence, frequency);
        }
        vocab
    }
}

impl IntoIterator for Vocabulary {
    type Item = (TokenSequence, u64);
    type IntoIter = std::collections::hash_map::IntoIter<TokenSequence, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
