//! Surface cues: quoting, dashes, parentheses and capitalization around each
//! occurrence, as ratios over all occurrences.

use crate::corpus::Corpus;
use crate::error::Result;
use crate::features::occurrence_start;
use crate::pattern::PatternId;
use crate::table::PatternTable;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PunctuationFeatures {
    pub quote: f64,
    pub dash: f64,
    pub parenthesis: f64,
    pub first_capitalized: f64,
    /// Every token fully upper-case. Not emitted.
    pub all_capitalized: f64,
}

impl PunctuationFeatures {
    pub fn push_into(&self, out: &mut Vec<f64>) {
        out.push(self.quote);
        out.push(self.dash);
        out.push(self.parenthesis);
        out.push(self.first_capitalized);
    }
}

pub fn extract_punctuation(table: &PatternTable, corpus: &Corpus, id: PatternId) -> Result<PunctuationFeatures> {
    let ends = table.ends(id);
    if ends.is_empty() {
        return Ok(PunctuationFeatures::default());
    }

    let (mut quote, mut dash, mut parenthesis, mut all_cap, mut all_upper) = (0u64, 0u64, 0u64, 0u64, 0u64);
    for &end in ends {
        let start = occurrence_start(table, corpus, id, end)?;

        if (start..end).any(|pos| corpus.marks(pos).dash_after) {
            dash += 1;
        }
        if (start..=end).all(|pos| corpus.marks(pos).first_capital) {
            all_cap += 1;
        }
        if (start..=end).all(|pos| corpus.marks(pos).all_capital) {
            all_upper += 1;
        }

        let (first, last) = (corpus.marks(start), corpus.marks(end));
        if first.quote_before && last.quote_after {
            quote += 1;
        }
        if first.parenthesis_before && last.parenthesis_after {
            parenthesis += 1;
        }
    }

    let n = ends.len() as f64;
    Ok(PunctuationFeatures {
        quote: quote as f64 / n,
        dash: dash as f64 / n,
        parenthesis: parenthesis as f64 / n,
        first_capitalized: all_cap as f64 / n,
        all_capitalized: all_upper as f64 / n,
    })
}
