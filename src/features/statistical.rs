//! Statistical decomposition: how much more often a pattern appears than the
//! independent concatenation of its best-evidenced halves would predict.

use crate::error::{FeatureError, Result};
use crate::pattern::PatternId;
use crate::table::PatternTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticalFeatures {
    /// Winning left half (`AB`).
    pub left: PatternId,
    /// Winning right half (`CD`).
    pub right: PatternId,
    /// `p(pattern) / (p(AB) * p(CD))`
    pub f1: f64,
    /// `freq(pattern) / sqrt(freq(AB) * freq(CD))`
    pub f2: f64,
    /// `sqrt(freq) * ln(f1)`, not emitted.
    pub f3: f64,
    /// `freq * ln(f1)`
    pub f4: f64,
}

impl StatisticalFeatures {
    pub fn push_into(&self, out: &mut Vec<f64>) {
        out.push(self.f1);
        out.push(self.f2);
        out.push(self.f4);
    }
}

/// Find the split point maximizing `p(left) * p(right)`.
///
/// Returns `(left, right, split)`. Ties keep the earliest split. Both halves
/// must be in the table.
pub fn best_split(table: &PatternTable, id: PatternId) -> Result<(PatternId, PatternId, usize)> {
    let tokens = &table.get(id).tokens;
    let mut best = -1.0;
    let mut winner = None;
    for split in 1..tokens.len() {
        let left = table.lookup(&tokens[..split]).ok_or(FeatureError::MissingSubPattern {
            pattern: id,
            split,
            side: "left",
        })?;
        let right = table.lookup(&tokens[split..]).ok_or(FeatureError::MissingSubPattern {
            pattern: id,
            split,
            side: "right",
        })?;
        let score = table.get(left).probability * table.get(right).probability;
        if score > best {
            best = score;
            winner = Some((left, right, split));
        }
    }
    // single-token patterns have no split at all
    winner.ok_or(FeatureError::MissingSubPattern {
        pattern: id,
        split: 0,
        side: "both",
    })
}

/// Expects probabilities to be normalized already.
pub fn extract_statistical(table: &PatternTable, id: PatternId) -> Result<StatisticalFeatures> {
    let (left, right, _) = best_split(table, id)?;
    let pattern = table.get(id);
    let (ab, cd) = (table.get(left), table.get(right));

    let freq = pattern.frequency as f64;
    let f1 = pattern.probability / ab.probability / cd.probability;
    let f2 = freq / (ab.frequency as f64).sqrt() / (cd.frequency as f64).sqrt();
    let f3 = freq.sqrt() * f1.ln();
    let f4 = freq * f1.ln();

    Ok(StatisticalFeatures {
        left,
        right,
        f1,
        f2,
        f3,
        f4,
    })
}
