//! Errors raised while extracting features.
//!
//! Every variant except `ThreadPool` is a precondition violation by the miner or
//! tokenizer. None of them are recoverable: extraction stops and no partial
//! feature matrix is returned.

use crate::pattern::PatternId;
use crate::corpus::TokenId;

#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    #[error("pattern {pattern}: sub-pattern {side} of split at {split} is not in the table")]
    MissingSubPattern {
        pattern: PatternId,
        split: usize,
        side: &'static str,
    },

    #[error("pattern {pattern}: {side} truncation is not in the table")]
    MissingTruncation {
        pattern: PatternId,
        side: &'static str,
    },

    #[error("pattern {pattern}: context count for token {token} at position {position} is below its in-pattern count")]
    NegativeContextDiff {
        pattern: PatternId,
        position: usize,
        token: TokenId,
    },

    #[error("pattern {pattern}: occurrence ending at {end} does not match the token stream")]
    MalformedOccurrence { pattern: PatternId, end: usize },

    #[error("{what}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
