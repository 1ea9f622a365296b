//! Adjacent token pairs and their aggregate frequencies.

use super::priority::MergeCandidate;
use super::token::Token;
use ahash::AHashMap;
use std::fmt;

/// An ordered pair of adjacent tokens.
///
/// Ordering compares `left` then `right` using [`Token`] ordering, which is
/// the tie-break used when two pairs share the highest frequency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    pub left: Token,
    pub right: Token,
}

impl Pair {
    pub fn new(left: impl Into<Token>, right: impl Into<Token>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// The token produced by merging this pair.
    #[inline]
    pub fn merged(&self) -> Token {
        self.left.concat(&self.right)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.left, self.right)
    }
}

/// Pair -> aggregate frequency across a vocabulary.
///
/// Derived fresh from the vocabulary; never carried across merges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairFrequencyTable {
    counts: AHashMap<Pair, u64>,
}

impl PairFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: AHashMap::with_capacity(capacity),
        }
    }

    /// Add `frequency` to a pair's running total.
    #[inline]
    pub fn add(&mut self, pair: Pair, frequency: u64) {
        *self.counts.entry(pair).or_insert(0) += frequency;
    }

    /// Fold another table into this one.
    pub fn absorb(&mut self, other: PairFrequencyTable) {
        if self.counts.len() < other.counts.len() {
            let mine = std::mem::replace(&mut self.counts, other.counts);
            for (pair, count) in mine {
                self.add(pair, count);
            }
        } else {
            for (pair, count) in other.counts {
                self.add(pair, count);
            }
        }
    }

    #[inline]
    pub fn get(&self, pair: &Pair) -> Option<u64> {
        self.counts.get(pair).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pair, u64)> + '_ {
        self.counts.iter().map(|(pair, &count)| (pair, count))
    }

    /// The highest-ranked pair: greatest frequency, ties going to the
    /// smallest pair.
    pub fn best(&self) -> Option<(&Pair, u64)> {
        self.iter().max_by(|a, b| MergeCandidate::rank(a.1, a.0, b.1, b.0))
    }

    /// All pairs ordered by frequency descending, then pair ascending.
    pub fn ranked(&self) -> Vec<(Pair, u64)> {
        let mut ranked: Vec<(Pair, u64)> = self
            .counts
            .iter()
            .map(|(pair, &count)| (pair.clone(), count))
            .collect();
        ranked.sort_unstable_by(|a, b| MergeCandidate::rank(b.1, &b.0, a.1, &a.0));
        ranked
    }
}

impl FromIterator<(Pair, u64)> for PairFrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Pair, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (pair, count) in iter {
            table.add(pair, count);
        }
        table
    }
}
