//! Sentinel tokens and forbidden corpus words.

/// Marker appended to every word's initial token sequence.
pub const END_OF_WORD: &str = "</w>";

/// Reserved for symbols outside the learned token space. Training never
/// produces it.
pub const UNKNOWN: &str = "<unk>";

/// The single-space string.
pub const SPACE: &str = " ";

/// Literal words that are never treated as ordinary corpus words.
pub const FORBIDDEN_WORDS: [&str; 3] = [END_OF_WORD, UNKNOWN, SPACE];

/// Check whether a corpus word must be discarded.
#[inline]
pub fn is_forbidden_word(word: &str) -> bool {
    word.is_empty() || FORBIDDEN_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_words() {
        assert!(is_forbidden_word(""));
        assert!(is_forbidden_word("</w>"));
        assert!(is_forbidden_word("<unk>"));
        assert!(is_forbidden_word(" "));
        assert!(!is_forbidden_word("w"));
        assert!(!is_forbidden_word("a</w>"));
    }
}
