//! Per-pattern feature groups.
//!
//! Each group is a pure function of one pattern, the shared [`PatternTable`]
//! snapshot and the [`Corpus`]; none of them writes anything shared, so the
//! driver runs them for different patterns in parallel.

pub mod completeness;
pub mod lexical;
pub mod outside;
pub mod punctuation;
pub mod statistical;

pub use completeness::{extract_completeness, CompletenessFeatures};
pub use lexical::{extract_lexical, LexicalFeatures};
pub use outside::{context_window, extract_outside};
pub use punctuation::{extract_punctuation, PunctuationFeatures};
pub use statistical::{best_split, extract_statistical, StatisticalFeatures};

use crate::corpus::Corpus;
use crate::error::{FeatureError, Result};
use crate::pattern::PatternId;
use crate::table::PatternTable;

/// Start offset of the occurrence of `id` ending at `end`, after checking the
/// stream slice really spells the pattern.
pub(crate) fn occurrence_start(
    table: &PatternTable,
    corpus: &Corpus,
    id: PatternId,
    end: usize,
) -> Result<usize> {
    let tokens = &table.get(id).tokens;
    if tokens.is_empty() || end + 1 < tokens.len() || end >= corpus.len() {
        return Err(FeatureError::MalformedOccurrence { pattern: id, end });
    }
    let start = end + 1 - tokens.len();
    if corpus.tokens()[start..=end] != tokens[..] {
        return Err(FeatureError::MalformedOccurrence { pattern: id, end });
    }
    Ok(start)
}
