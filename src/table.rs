//! Pattern table: dense ids, hash index and occurrence end-offsets.
//!
//! The miner populates the table; the feature engine only annotates
//! probabilities and labels, and reads everything else.

use std::collections::HashMap;

use tracing::debug;

use crate::corpus::TokenId;
use crate::error::{FeatureError, Result};
use crate::pattern::{content_hash, Pattern, PatternId};

#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    patterns: Vec<Pattern>,
    index: HashMap<u64, PatternId>,
    ends: Vec<Vec<usize>>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern with its frequency and occurrence end-offsets.
    ///
    /// Inserting an already known token sequence returns the existing id and
    /// replaces its frequency and occurrences.
    pub fn insert(&mut self, tokens: Vec<TokenId>, frequency: u64, ends: Vec<usize>) -> PatternId {
        let hash = content_hash(&tokens);
        if let Some(&id) = self.index.get(&hash) {
            self.patterns[id].frequency = frequency;
            self.ends[id] = ends;
            return id;
        }
        let id = self.patterns.len();
        self.patterns.push(Pattern::new(tokens, frequency));
        self.ends.push(ends);
        self.index.insert(hash, id);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    #[inline]
    pub fn get(&self, id: PatternId) -> &Pattern {
        &self.patterns[id]
    }

    #[inline]
    pub fn get_mut(&mut self, id: PatternId) -> &mut Pattern {
        &mut self.patterns[id]
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// End-offsets (position of the last token) of every recorded occurrence.
    #[inline]
    pub fn ends(&self, id: PatternId) -> &[usize] {
        &self.ends[id]
    }

    pub fn id_of_hash(&self, hash: u64) -> Option<PatternId> {
        self.index.get(&hash).copied()
    }

    pub fn lookup(&self, tokens: &[TokenId]) -> Option<PatternId> {
        self.id_of_hash(content_hash(tokens))
    }

    /// Frequency of a token sequence, 0 when the miner never kept it.
    pub fn frequency_of(&self, tokens: &[TokenId]) -> u64 {
        self.lookup(tokens)
            .map_or(0, |id| self.patterns[id].frequency)
    }

    /// Every pattern longer than one token must have both of its truncations
    /// in the table.
    pub fn check_closure(&self) -> Result<()> {
        for (id, pattern) in self.patterns.iter().enumerate() {
            if pattern.len() <= 1 {
                continue;
            }
            if self.lookup(pattern.left_truncation()).is_none() {
                return Err(FeatureError::MissingTruncation { pattern: id, side: "left" });
            }
            if self.lookup(pattern.right_truncation()).is_none() {
                return Err(FeatureError::MissingTruncation { pattern: id, side: "right" });
            }
        }
        Ok(())
    }

    /// Rescale every frequency into a rate per length-`L` window:
    /// `probability = frequency / (total_tokens / L)`.
    pub fn normalize_probabilities(&mut self, total_tokens: usize) {
        let n = total_tokens as f64;
        for pattern in &mut self.patterns {
            pattern.probability = pattern.frequency as f64 / (n / pattern.len() as f64);
        }
        debug!(patterns = self.patterns.len(), total_tokens, "normalized pattern probabilities");
    }
}
