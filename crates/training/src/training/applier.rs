//! Merge application: collapse one pair everywhere in a vocabulary.

use pairwise_core::{Pair, Token, TokenSequence, Vocabulary};
use rayon::prelude::*;

/// Rewrites vocabularies by merging a chosen pair.
pub struct MergeApplier;

impl MergeApplier {
    /// Merge a pair sequentially or in parallel.
    pub fn apply_with(vocab: Vocabulary, pair: &Pair, parallel: bool) -> Vocabulary {
        if parallel {
            Self::apply_parallel(vocab, pair)
        } else {
            Self::apply(vocab, pair)
        }
    }

    /// Produce the vocabulary with every occurrence of `pair` merged.
    ///
    /// Frequencies carry over, and sequences that become identical are
    /// summed into one entry. A pair that never occurs leaves the content
    /// unchanged.
    pub fn apply(vocab: Vocabulary, pair: &Pair) -> Vocabulary {
        let merged = pair.merged();
        let mut result = Vocabulary::with_capacity(vocab.len());
        for (sequence, frequency) in vocab {
            result.add(Self::rewrite(sequence, pair, &merged), frequency);
        }
        result
    }

    /// Parallel [`apply`](Self::apply): entries are rewritten on worker
    /// threads and the partial vocabularies are folded back together.
    pub fn apply_parallel(vocab: Vocabulary, pair: &Pair) -> Vocabulary {
        let merged = pair.merged();
        let entries: Vec<(TokenSequence, u64)> = vocab.into_iter().collect();

        entries
            .into_par_iter()
            .fold(Vocabulary::new, |mut partial, (sequence, frequency)| {
                partial.add(Self::rewrite(sequence, pair, &merged), frequency);
                partial
            })
            .reduce(Vocabulary::new, |mut acc, partial| {
                if acc.len() < partial.len() {
                    let mut partial = partial;
                    partial.absorb(acc);
                    partial
                } else {
                    acc.absorb(partial);
                    acc
                }
            })
    }

    fn rewrite(sequence: TokenSequence, pair: &Pair, merged: &Token) -> TokenSequence {
        if sequence.contains_adjacent(&pair.left, &pair.right) {
            Self::merge_sequence(&sequence, pair, merged)
        } else {
            sequence
        }
    }

    /// Scan left to right, replacing each non-overlapping occurrence of
    /// `pair` with `merged`. The leftmost match always wins.
    pub fn merge_sequence(sequence: &TokenSequence, pair: &Pair, merged: &Token) -> TokenSequence {
        let tokens = sequence.tokens();
        let mut out = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            if i + 1 < tokens.len() && tokens[i] == pair.left && tokens[i + 1] == pair.right {
                out.push(merged.clone());
                i += 2;
            } else {
                out.push(tokens[i].clone());
                i += 1;
            }
        }

        TokenSequence::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> TokenSequence {
        TokenSequence::parse(text)
    }

    fn vocab(entries: &[(&str, u64)]) -> Vocabulary {
        entries.iter().map(|&(text, freq)| (seq(text), freq)).collect()
    }

    #[test]
    fn test_merge_sequence() {
        let merged = MergeApplier::merge_sequence(
            &seq("l o w </w>"),
            &Pair::new("l", "o"),
            &Token::new("lo"),
        );
        assert_eq!(merged, seq("lo w </w>"));
    }

    #[test]
    fn test_overlapping_occurrences_are_greedy() {
        let pair = Pair::new("a", "a");
        let merged = pair.merged();

        assert_eq!(
            MergeApplier::merge_sequence(&seq("a a a </w>"), &pair, &merged),
            seq("aa a </w>")
        );
        assert_eq!(
            MergeApplier::merge_sequence(&seq("a a a a </w>"), &pair, &merged),
            seq("aa aa </w>")
        );
    }

    #[test]
    fn test_alternating_pair() {
        let pair = Pair::new("a", "b");
        assert_eq!(
            MergeApplier::merge_sequence(&seq("a b a b </w>"), &pair, &pair.merged()),
            seq("ab ab </w>")
        );
    }

    #[test]
    fn test_apply_keeps_frequencies() {
        let before = vocab(&[("a b </w>", 3), ("b a </w>", 2)]);
        let after = MergeApplier::apply(before, &Pair::new("a", "b"));

        assert_eq!(after, vocab(&[("ab </w>", 3), ("b a </w>", 2)]));
    }

    #[test]
    fn test_collisions_are_summed() {
        let before = vocab(&[("a b </w>", 3), ("ab </w>", 2)]);
        let after = MergeApplier::apply(before, &Pair::new("a", "b"));

        assert_eq!(after.len(), 1);
        assert_eq!(after.get(&seq("ab </w>")), Some(5));
    }

    #[test]
    fn test_absent_pair_is_noop() {
        let before = vocab(&[("a b </w>", 3)]);
        let after = MergeApplier::apply(before.clone(), &Pair::new("x", "y"));
        assert_eq!(after, before);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let before = vocab(&[
            ("a b </w>", 3),
            ("ab </w>", 2),
            ("c a b a b </w>", 1),
            ("d </w>", 9),
        ]);
        let pair = Pair::new("a", "b");

        assert_eq!(
            MergeApplier::apply_parallel(before.clone(), &pair),
            MergeApplier::apply(before, &pair)
        );
    }
}
