//! Pair counting for BPE training.
//!
//! Every adjacent pair inside a word contributes the word's full corpus
//! frequency. Counting is independent per vocabulary entry, so the parallel
//! path tallies entries on worker threads and sums the partial tables.

use pairwise_core::{Pair, PairFrequencyTable, TokenSequence, Vocabulary};
use rayon::prelude::*;

/// Counter for BPE pair frequencies.
pub struct PairCounter;

impl PairCounter {
    /// Count pairs sequentially or in parallel.
    pub fn count_with(vocab: &Vocabulary, parallel: bool) -> PairFrequencyTable {
        if parallel {
            Self::count_parallel(vocab)
        } else {
            Self::count(vocab)
        }
    }

    /// Count all pairs sequentially.
    pub fn count(vocab: &Vocabulary) -> PairFrequencyTable {
        let mut table = PairFrequencyTable::with_capacity(vocab.len());
        for (sequence, frequency) in vocab.iter() {
            Self::tally(&mut table, sequence, frequency);
        }
        table
    }

    /// Count all pairs in parallel.
    pub fn count_parallel(vocab: &Vocabulary) -> PairFrequencyTable {
        let entries: Vec<(&TokenSequence, u64)> = vocab.iter().collect();

        entries
            .par_iter()
            .fold(PairFrequencyTable::new, |mut table, &(sequence, frequency)| {
                Self::tally(&mut table, sequence, frequency);
                table
            })
            .reduce(PairFrequencyTable::new, |mut acc, table| {
                acc.absorb(table);
                acc
            })
    }

    /// Add one word's pairs, weighted by its frequency.
    #[inline]
    pub fn tally(table: &mut PairFrequencyTable, sequence: &TokenSequence, frequency: u64) {
        for (left, right) in sequence.windows() {
            table.add(Pair::new(left.clone(), right.clone()), frequency);
        }
    }
}
