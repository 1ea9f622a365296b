//! Incremental pair accounting.
//!
//! Instead of recounting every pair after each merge, the index keeps the
//! current pair counts, a priority queue, and for every pair the words it
//! occurs in. A merge only visits the words indexed under the merged pair:
//! their old pairs are subtracted, their rewritten pairs added, and the
//! queue is told about every count that changed.

use super::applier::MergeApplier;
use super::counter::PairCounter;
use ahash::{AHashMap, AHashSet};
use pairwise_core::{MergeCandidate, Pair, PairPriorityQueue, Token, TokenSequence, Vocabulary};

/// Words with their frequencies plus live pair counts.
pub struct PairIndex {
    /// Word -> current tokenized representation
    words: Vec<TokenSequence>,
    /// Word -> frequency count
    word_counts: Vec<u64>,
    /// Pair -> frequency count
    pair_counts: AHashMap<Pair, u64>,
    /// Pair -> words that may contain it; entries go stale after a merge
    /// and are checked before use
    pair_words: AHashMap<Pair, AHashSet<usize>>,
    /// Candidates ordered for selection
    queue: PairPriorityQueue,
}

impl PairIndex {
    /// Index a vocabulary.
    pub fn new(vocab: Vocabulary) -> Self {
        let table = PairCounter::count(&vocab);
        let mut queue = PairPriorityQueue::with_capacity(table.len());
        let mut pair_counts = AHashMap::with_capacity(table.len());

        for (pair, count) in table.iter() {
            queue.push(MergeCandidate::new(pair.clone(), count));
            pair_counts.insert(pair.clone(), count);
        }

        let (words, word_counts): (Vec<TokenSequence>, Vec<u64>) = vocab.into_iter().unzip();

        let mut pair_words: AHashMap<Pair, AHashSet<usize>> = AHashMap::with_capacity(table.len());
        for (idx, word) in words.iter().enumerate() {
            for (left, right) in word.windows() {
                pair_words
                    .entry(Pair::new(left.clone(), right.clone()))
                    .or_default()
                    .insert(idx);
            }
        }

        Self {
            words,
            word_counts,
            pair_counts,
            pair_words,
            queue,
        }
    }

    /// The pair that would be merged next, with its frequency.
    pub fn best(&mut self) -> Option<(Pair, u64)> {
        self.queue
            .peek()
            .map(|candidate| (candidate.pair.clone(), candidate.count))
    }

    /// Current count for a pair.
    pub fn count(&self, pair: &Pair) -> u64 {
        self.pair_counts.get(pair).copied().unwrap_or(0)
    }

    /// Merge a pair in every word that contains it.
    ///
    /// Returns the number of distinct words rewritten.
    pub fn merge(&mut self, pair: &Pair, merged: &Token) -> usize {
        let mut candidates: Vec<usize> = match self.pair_words.remove(pair) {
            Some(indices) => indices.into_iter().collect(),
            None => return 0,
        };
        candidates.sort_unstable();

        let mut deltas: AHashMap<Pair, i64> = AHashMap::new();
        let mut rewritten = 0;

        for idx in candidates {
            let word = &self.words[idx];
            if !word.contains_adjacent(&pair.left, &pair.right) {
                continue;
            }

            let count = self.word_counts[idx] as i64;
            for (left, right) in word.windows() {
                *deltas
                    .entry(Pair::new(left.clone(), right.clone()))
                    .or_insert(0) -= count;
            }

            let next = MergeApplier::merge_sequence(word, pair, merged);
            for (left, right) in next.windows() {
                let new_pair = Pair::new(left.clone(), right.clone());
                self.pair_words
                    .entry(new_pair.clone())
                    .or_default()
                    .insert(idx);
                *deltas.entry(new_pair).or_insert(0) += count;
            }

            self.words[idx] = next;
            rewritten += 1;
        }

        for (pair, delta) in deltas {
            if delta == 0 {
                continue;
            }

            let current = self.count(&pair) as i64;
            debug_assert!(
                current + delta >= 0,
                "pair {} count would drop below zero",
                pair
            );
            let new_count = (current + delta) as u64;

            if new_count > 0 {
                self.pair_counts.insert(pair.clone(), new_count);
            } else {
                self.pair_counts.remove(&pair);
            }
            self.queue.update(pair, new_count);
        }

        rewritten
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Materialize the current state as a vocabulary.
    pub fn vocabulary(&self) -> Vocabulary {
        self.words
            .iter()
            .cloned()
            .zip(self.word_counts.iter().copied())
            .collect()
    }

    /// Consume the index, returning its vocabulary.
    pub fn into_vocabulary(self) -> Vocabulary {
        self.words.into_iter().zip(self.word_counts).collect()
    }
}
