//! Completeness: is the pattern's frequency stable against its length-1
//! truncations and its length+1 extensions?

use crate::corpus::Corpus;
use crate::pattern::PatternId;
use crate::table::PatternTable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletenessFeatures {
    /// `freq / max(freq, freq(left truncation), freq(right truncation))`
    pub sub: f64,
    /// Largest frequency of a one-token extension, over `freq`.
    pub super_: f64,
}

impl CompletenessFeatures {
    pub fn push_into(&self, out: &mut Vec<f64>) {
        out.push(self.sub);
        out.push(self.super_);
    }
}

pub fn extract_completeness(table: &PatternTable, corpus: &Corpus, id: PatternId) -> CompletenessFeatures {
    let pattern = table.get(id);
    let tokens = &pattern.tokens;
    let len = tokens.len();
    let freq = pattern.frequency as f64;

    let sub_freq = freq
        .max(table.frequency_of(pattern.left_truncation()) as f64)
        .max(table.frequency_of(pattern.right_truncation()) as f64);

    let mut super_freq = 0.0_f64;
    let mut extended = Vec::with_capacity(len + 1);
    for &end in table.ends(id) {
        if end + 1 < len || end >= corpus.len() {
            continue;
        }
        let start = end + 1 - len;
        // the token before the occurrence must not open a sentence
        if start >= 2 && !corpus.is_sentence_end(start - 2) {
            let before = start - 1;
            super_freq = super_freq.max(table.frequency_of(&corpus.tokens()[before..=end]) as f64);
        }
        if !corpus.is_sentence_end(end) && end + 1 < corpus.len() {
            extended.clear();
            extended.extend_from_slice(tokens);
            extended.push(corpus.token(end + 1));
            super_freq = super_freq.max(table.frequency_of(&extended) as f64);
        }
    }

    CompletenessFeatures {
        sub: freq / sub_freq,
        super_: super_freq / freq,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::fixture;

    #[test]
    fn test_sub_is_dominated_by_truncations() {
        let fx = fixture(&["new york city", "new york state", "new york"], 3);
        let id = fx.id_of("new york");
        let features = extract_completeness(&fx.table, &fx.corpus, id);
        // "new" and "york" each occur 3 times, as often as the bigram
        assert_eq!(features.sub, 1.0);

        let city = fx.id_of("york city");
        let features = extract_completeness(&fx.table, &fx.corpus, city);
        assert!((features.sub - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_super_uses_right_extension() {
        let fx = fixture(&["new york city", "new york city", "new york"], 3);
        let id = fx.id_of("new york");
        let features = extract_completeness(&fx.table, &fx.corpus, id);
        // "new york city" occurs twice out of three
        assert!((features.super_ - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_super_uses_left_extension() {
        let fx = fixture(&["in the big apple", "of the big apple", "the big apple"], 3);
        let id = fx.id_of("big apple");
        let features = extract_completeness(&fx.table, &fx.corpus, id);
        // reached through the first occurrence; "the big apple" has frequency 3
        assert_eq!(features.super_, 1.0);
    }

    #[test]
    fn test_occurrence_at_stream_start_has_no_left_extension() {
        let fx = fixture(&["alpha beta gamma"], 3);
        let id = fx.id_of("alpha beta");
        let features = extract_completeness(&fx.table, &fx.corpus, id);
        assert_eq!(features.sub, 1.0);
        assert_eq!(features.super_, 1.0);

        let tail = fx.id_of("beta gamma");
        let features = extract_completeness(&fx.table, &fx.corpus, tail);
        // "gamma" closes the stream, and "alpha" opens it
        assert_eq!(features.super_, 0.0);
    }

    #[test]
    fn test_extension_does_not_cross_sentence_end() {
        let fx = fixture(&["a b", "a b"], 3);
        let id = fx.id_of("a b");
        let features = extract_completeness(&fx.table, &fx.corpus, id);
        assert_eq!(features.super_, 0.0);
        assert!(features.sub <= 1.0);
    }
}
