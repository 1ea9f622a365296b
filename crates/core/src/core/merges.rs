//! Merge rule management for BPE.
//!
//! Rules are kept in the order they were learned; a rule's index is its
//! rank (lower rank = learned earlier = higher priority).

use super::pairs::Pair;
use super::token::Token;
use ahash::AHashMap;
use std::fmt;

/// A learned `pair -> merged token` rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeRule {
    pub pair: Pair,
    pub merged: Token,
}

impl MergeRule {
    /// Build the rule for a pair; the merged token is the concatenation.
    pub fn new(pair: Pair) -> Self {
        let merged = pair.merged();
        Self { pair, merged }
    }
}

impl fmt::Display for MergeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pair, self.merged)
    }
}

/// Ordered merge rule list with pair -> rank lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRules {
    rules: Vec<MergeRule>,
    ranks: AHashMap<Pair, u32>,
}

impl MergeRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rules: Vec::with_capacity(capacity),
            ranks: AHashMap::with_capacity(capacity),
        }
    }

    /// Append a rule, returning its rank.
    ///
    /// A pair that already has a rule keeps its original rank and the new
    /// rule is dropped.
    pub fn push(&mut self, rule: MergeRule) -> u32 {
        if let Some(&rank) = self.ranks.get(&rule.pair) {
            return rank;
        }
        let rank = self.rules.len() as u32;
        self.ranks.insert(rule.pair.clone(), rank);
        self.rules.push(rule);
        rank
    }

    /// Get the rank of a pair, if it has been learned.
    #[inline]
    pub fn rank(&self, pair: &Pair) -> Option<u32> {
        self.ranks.get(pair).copied()
    }

    /// Get the rule learned at `rank`.
    #[inline]
    pub fn get(&self, rank: u32) -> Option<&MergeRule> {
        self.rules.get(rank as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

}

impl FromIterator<MergeRule> for MergeRules {
    fn from_iter<I: IntoIterator<Item = MergeRule>>(iter: I) -> Self {
        let mut rules = Self::new();
        for rule in iter {
            rules.push(rule);
        }
        rules
    }
}

impl<'a> IntoIterator for &'a MergeRules {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_ranks_in_order() {
        let mut rules = MergeRules::new();
        assert_eq!(rules.push(MergeRule::new(Pair::new("a", "b"))), 0);
        assert_eq!(rules.push(MergeRule::new(Pair::new("ab", "</w>"))), 1);

        assert_eq!(rules.rank(&Pair::new("a", "b")), Some(0));
        assert_eq!(rules.get(1).unwrap().merged.as_str(), "ab</w>");
        assert_eq!(rules.rank(&Pair::new("x", "y")), None);
    }

    #[test]
    fn test_duplicate_pair_keeps_rank() {
        let mut rules = MergeRules::new();
        rules.push(MergeRule::new(Pair::new("a", "b")));
        rules.push(MergeRule::new(Pair::new("c", "d")));
        assert_eq!(rules.push(MergeRule::new(Pair::new("a", "b"))), 0);
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_display() {
        let rule = MergeRule::new(Pair::new("a", "b"));
        assert_eq!(rule.to_string(), "a b -> ab");
    }
}
