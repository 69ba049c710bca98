//! Pattern records and their content hash.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::corpus::TokenId;

pub type PatternId = usize;

/// Deterministic hash of a token sequence, used as the table key.
///
/// `DefaultHasher::new()` uses fixed keys, so equal sequences hash equally
/// across runs and threads.
pub fn content_hash(tokens: &[TokenId]) -> u64 {
    let mut hasher = DefaultHasher::new();
    tokens.hash(&mut hasher);
    hasher.finish()
}

/// A mined candidate phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub tokens: Vec<TokenId>,
    pub hash: u64,
    /// Number of corpus occurrences counted by the miner.
    pub frequency: u64,
    /// Set by [`crate::table::PatternTable::normalize_probabilities`].
    pub probability: f64,
    /// Supervised quality label, when a truth set recognized this pattern.
    pub label: Option<bool>,
}

impl Pattern {
    pub fn new(tokens: Vec<TokenId>, frequency: u64) -> Self {
        let hash = content_hash(&tokens);
        Self {
            tokens,
            hash,
            frequency,
            probability: 0.0,
            label: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Drops the last token.
    pub fn left_truncation(&self) -> &[TokenId] {
        &self.tokens[..self.tokens.len().saturating_sub(1)]
    }

    /// Drops the first token.
    pub fn right_truncation(&self) -> &[TokenId] {
        &self.tokens[self.tokens.len().min(1)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_tokens_equal_hash() {
        let a = Pattern::new(vec![3, 1, 4], 2);
        let b = Pattern::new(vec![3, 1, 4], 9);
        assert_eq!(a.hash, b.hash);
        assert_ne!(a.hash, content_hash(&[3, 1]));
    }

    #[test]
    fn test_truncations() {
        let p = Pattern::new(vec![10, 20, 30], 1);
        assert_eq!(p.left_truncation(), &[10, 20]);
        assert_eq!(p.right_truncation(), &[20, 30]);

        let single = Pattern::new(vec![5], 1);
        assert!(single.left_truncation().is_empty());
        assert!(single.right_truncation().is_empty());
    }
}
