//! Tokens and token sequences.
//!
//! A [`Token`] is an immutable text fragment backed by a `CompactString`, so
//! the short fragments that dominate BPE training stay inline and compare
//! without touching the heap. A [`TokenSequence`] is one word-form's current
//! decomposition; merges produce new sequences instead of editing old ones.

use super::special::END_OF_WORD;
use compact_str::CompactString;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// An atomic text fragment. Equality and hashing are by exact content.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Token(CompactString);

/// Ordering unit for tokens: a character, or the end-of-word marker which
/// sorts after every character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Symbol {
    Char(char),
    EndOfWord,
}

impl Token {
    /// Create a token from text.
    pub fn new(text: &str) -> Self {
        Self(CompactString::new(text))
    }

    /// Create a single-character token.
    pub fn from_char(ch: char) -> Self {
        let mut buf = [0u8; 4];
        Self(CompactString::new(ch.encode_utf8(&mut buf)))
    }

    /// The end-of-word sentinel token.
    pub fn end_of_word() -> Self {
        Self::new(END_OF_WORD)
    }

    /// Concatenate two tokens into a new one.
    pub fn concat(&self, other: &Token) -> Self {
        let mut merged = CompactString::with_capacity(self.0.len() + other.0.len());
        merged.push_str(&self.0);
        merged.push_str(&other.0);
        Self(merged)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        let (body, closed) = match self.0.strip_suffix(END_OF_WORD) {
            Some(body) => (body, true),
            None => (self.as_str(), false),
        };
        body.chars()
            .map(Symbol::Char)
            .chain(closed.then_some(Symbol::EndOfWord))
    }
}

impl Ord for Token {
    fn cmp(&self, other: &Self) -> Ordering {
        self.symbols().cmp(other.symbols())
    }
}

impl PartialOrd for Token {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Token {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<char> for Token {
    fn from(ch: char) -> Self {
        Self::from_char(ch)
    }
}

/// Ordered decomposition of one word-form.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenSequence(Vec<Token>);

impl TokenSequence {
    /// Create a sequence from tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }

    /// Initial decomposition of a word: one token per character followed by
    /// the end-of-word sentinel.
    pub fn from_word(word: &str) -> Self {
        let mut tokens: Vec<Token> = word.chars().map(Token::from_char).collect();
        tokens.push(Token::end_of_word());
        Self(tokens)
    }

    /// Parse the external space-joined form, e.g. `"a b </w>"`.
    pub fn parse(text: &str) -> Self {
        Self(text.split(' ').filter(|t| !t.is_empty()).map(Token::new).collect())
    }

    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    /// Iterate over adjacent `(left, right)` token windows.
    pub fn windows(&self) -> impl Iterator<Item = (&Token, &Token)> + '_ {
        self.0.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Check whether the two tokens appear next to each other.
    pub fn contains_adjacent(&self, left: &Token, right: &Token) -> bool {
        self.windows().any(|(a, b)| a == left && b == right)
    }
}

impl fmt::Debug for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token.as_str())?;
        }
        Ok(())
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
