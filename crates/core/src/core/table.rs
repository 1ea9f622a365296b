//! Token table: id assignment for every token of a trained model.
//!
//! Training itself works on token text; the table gives each token a stable
//! `u32` id for persistence and inspection.

use super::merges::MergeRules;
use super::special::{END_OF_WORD, UNKNOWN};
use super::token::Token;
use super::vocab::Vocabulary;
use crate::error::{PairwiseError, Result};
use ahash::AHashMap;
use std::collections::BTreeSet;

/// Bidirectional token <-> id mapping.
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    /// Forward mapping: token -> ID
    ids: AHashMap<Token, u32>,
    /// Reverse mapping: ID -> token (IDs are dense)
    tokens: Vec<Token>,
}

impl TokenTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: AHashMap::with_capacity(capacity),
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Assign ids for a trained model: the sentinels first, then base tokens
    /// in token order, then merged tokens in rank order.
    pub fn from_training(vocab: &Vocabulary, merges: &MergeRules) -> Result<Self> {
        let merged: BTreeSet<&Token> = merges.iter().map(|rule| &rule.merged).collect();

        let mut base: BTreeSet<Token> = vocab
            .distinct_tokens()
            .into_iter()
            .filter(|token| !merged.contains(token))
            .collect();
        for rule in merges {
            for token in [&rule.pair.left, &rule.pair.right] {
                if !merged.contains(token) {
                    base.insert(token.clone());
                }
            }
        }

        let mut table = Self::with_capacity(base.len() + merges.len() + 2);
        table.add_token(END_OF_WORD)?;
        table.add_token(UNKNOWN)?;
        for token in &base {
            table.add_token(token.as_str())?;
        }
        for rule in merges {
            table.add_token(rule.merged.as_str())?;
        }

        Ok(table)
    }

    /// Add a token, returning its id.
    ///
    /// Known tokens keep their id. The empty token is rejected.
    pub fn add_token(&mut self, token: &str) -> Result<u32> {
        if token.is_empty() {
            return Err(PairwiseError::InvalidToken("token cannot be empty".to_string()));
        }

        if let Some(&id) = self.ids.get(token) {
            return Ok(id);
        }

        let id = u32::try_from(self.tokens.len()).map_err(|_| {
            PairwiseError::InvalidToken(format!("token table is full, cannot add {:?}", token))
        })?;
        let token = Token::new(token);
        self.ids.insert(token.clone(), id);
        self.tokens.push(token);

        Ok(id)
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.ids.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn token_of(&self, id: u32) -> Option<&str> {
        self.tokens.get(id as usize).map(Token::as_str)
    }

    /// Like [`token_of`](Self::token_of) but with an error for unknown ids.
    pub fn require_token(&self, id: u32) -> Result<&str> {
        self.token_of(id).ok_or(PairwiseError::UnknownTokenId(id))
    }

    /// Like [`id_of`](Self::id_of) but with an error for unknown tokens.
    pub fn require_id(&self, token: &str) -> Result<u32> {
        self.id_of(token)
            .ok_or_else(|| PairwiseError::UnknownToken(token.to_string()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over `(id, token)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (id as u32, token.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merges::MergeRule;
    use crate::core::pairs::Pair;
    use crate::core::token::TokenSequence;

    #[test]
    fn test_add_token() {
        let mut table = TokenTable::new();
        let id1 = table.add_token("hello").unwrap();
        let id2 = table.add_token("world").unwrap();

        assert_eq!(id1, 0);
        assert_eq!(id2, 1);
        assert_eq!(table.id_of("hello"), Some(0));
        assert_eq!(table.token_of(1), Some("world"));
        assert_eq!(table.token_of(2), None);
    }

    #[test]
    fn test_add_duplicate_token() {
        let mut table = TokenTable::new();
        let id1 = table.add_token("hello").unwrap();
        let id2 = table.add_token("hello").unwrap();

        assert_eq!(id1, id2);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut table = TokenTable::new();
        assert!(matches!(
            table.add_token(""),
            Err(PairwiseError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_require_unknown() {
        let table = TokenTable::new();
        assert!(matches!(
            table.require_token(7),
            Err(PairwiseError::UnknownTokenId(7))
        ));
        assert!(matches!(
            table.require_id("x"),
            Err(PairwiseError::UnknownToken(_))
        ));
    }

    #[test]
    fn test_from_training() {
        let vocab: Vocabulary = vec![(TokenSequence::parse("ab </w>"), 3)].into_iter().collect();
        let merges: MergeRules = vec![MergeRule::new(Pair::new("a", "b"))].into_iter().collect();

        let table = TokenTable::from_training(&vocab, &merges).unwrap();
        let tokens: Vec<&str> = table.iter().map(|(_, token)| token).collect();
        assert_eq!(tokens, vec!["</w>", "<unk>", "a", "b", "ab"]);
    }
}
