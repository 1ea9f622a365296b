//! Corpus segmentation into the initial word vocabulary.

use ahash::AHashMap;
use pairwise_core::special::{self, is_forbidden_word};
use pairwise_core::{Token, TokenSequence, Vocabulary};

/// Splits raw text into words and words into character tokens.
pub struct CorpusSegmenter;

impl CorpusSegmenter {
    /// Words retained for training: whitespace-separated, forbidden literals
    /// removed.
    pub fn words(corpus: &str) -> impl Iterator<Item = &str> + '_ {
        corpus
            .split_whitespace()
            .filter(|word| !is_forbidden_word(word))
    }

    /// Build the initial vocabulary: each word becomes its characters plus
    /// the end-of-word sentinel, and repeats accumulate into one entry.
    ///
    /// An empty or whitespace-only corpus yields an empty vocabulary.
    pub fn segment(corpus: &str) -> Vocabulary {
        let mut vocab = Vocabulary::new();
        for word in Self::words(corpus) {
            vocab.increment(TokenSequence::from_word(word));
        }
        vocab
    }

    /// Character frequencies over the retained words.
    ///
    /// The sentinel tokens and the space are always present, with a count
    /// of zero unless the corpus produced them.
    pub fn character_counts(corpus: &str) -> AHashMap<Token, u64> {
        let mut counts: AHashMap<Token, u64> = AHashMap::new();
        for word in Self::words(corpus) {
            for ch in word.chars() {
                *counts.entry(Token::from_char(ch)).or_insert(0) += 1;
            }
        }
        for sentinel in special::FORBIDDEN_WORDS {
            counts.entry(Token::new(sentinel)).or_insert(0);
        }
        counts
    }
}
