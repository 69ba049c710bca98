//! Outside-context diversity: how often the pattern's own tokens reappear in
//! the surrounding sentences, weighted by idf.

use std::collections::HashMap;
use std::ops::Range;

use crate::corpus::{Corpus, TokenId};
use crate::error::{FeatureError, Result};
use crate::features::occurrence_start;
use crate::pattern::PatternId;
use crate::table::PatternTable;

/// Half-open stream range around the occurrence `[start, end]`.
///
/// The left edge moves back until `sentences` sentence ends have been crossed
/// (the boundary right before `start` counts, and so does the stream start);
/// the right edge moves forward the same way starting at `end`. Both edges
/// land just after a sentence end.
pub fn context_window(corpus: &Corpus, start: usize, end: usize, sentences: usize) -> Range<usize> {
    let mut lo = start;
    let mut crossed = 0;
    while crossed < sentences {
        if lo == 0 {
            break;
        }
        if corpus.is_sentence_end(lo - 1) {
            crossed += 1;
            if crossed == sentences {
                break;
            }
        }
        lo -= 1;
    }

    let mut hi = end;
    crossed = 0;
    while hi < corpus.len() && crossed < sentences {
        if corpus.is_sentence_end(hi) {
            crossed += 1;
        }
        hi += 1;
    }

    lo..hi.max(end + 1)
}

fn counts(tokens: impl IntoIterator<Item = TokenId>) -> HashMap<TokenId, u64> {
    let mut map = HashMap::new();
    for token in tokens {
        *map.entry(token).or_insert(0) += 1;
    }
    map
}

/// `stat_outside` for one pattern.
pub fn extract_outside(
    table: &PatternTable,
    corpus: &Corpus,
    id: PatternId,
    sentences: usize,
) -> Result<f64> {
    let tokens = &table.get(id).tokens;
    let local = counts(tokens.iter().copied());
    let mut outside = vec![0.0; tokens.len()];
    let mut total = 0.0;

    for &end in table.ends(id) {
        let start = occurrence_start(table, corpus, id, end)?;
        let window = context_window(corpus, start, end, sentences);
        let context = counts(corpus.tokens()[window].iter().copied());

        total += 1.0;
        for (position, token) in tokens.iter().enumerate() {
            let seen = context.get(token).copied().unwrap_or(0);
            let own = local[token];
            if seen < own {
                return Err(FeatureError::NegativeContextDiff {
                    pattern: id,
                    position,
                    token: *token,
                });
            }
            outside[position] += (seen - own) as f64;
        }
    }

    let lexicon = corpus.lexicon();
    let (mut sum, mut norm) = (0.0, 0.0);
    for (position, token) in tokens.iter().enumerate() {
        let idf = lexicon.idf(*token);
        sum += outside[position] * idf;
        norm += idf;
    }
    if total > 0.0 {
        sum /= total;
    }
    Ok(sum / norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Lexicon;
    use crate::testutil::fixture;

    #[test]
    fn test_window_spans_neighbor_sentences() {
        // sentences: [0,1] [2,3,4] [5,6] [7,8]
        let fx = fixture(&["a b", "c d e", "f g", "h i"], 1);
        let corpus = &fx.corpus;
        // occurrence at 3..=3: own sentence start counts as the first crossing
        assert_eq!(context_window(corpus, 3, 3, 2), 0..7);
        assert_eq!(context_window(corpus, 5, 6, 2), 2..9);
        assert_eq!(context_window(corpus, 3, 3, 1), 2..5);
    }

    #[test]
    fn test_window_clipped_at_stream_edges() {
        let fx = fixture(&["a b c"], 1);
        assert_eq!(context_window(&fx.corpus, 0, 1, 2), 0..3);
        assert_eq!(context_window(&fx.corpus, 1, 2, 2), 0..3);
    }

    #[test]
    fn test_window_always_encloses_occurrence() {
        let fx = fixture(&["a b", "c d e", "f g", "h i"], 1);
        for start in 0..fx.corpus.len() {
            for end in start..fx.corpus.len() {
                let window = context_window(&fx.corpus, start, end, 2);
                assert!(window.start <= start && window.end > end);
            }
        }
    }

    #[test]
    fn test_outside_counts_repeated_tokens() {
        let mut fx = fixture(&["x a b x", "a b y", "z"], 2);
        let n = fx.vocab.len();
        let lexicon = Lexicon::new(Default::default(), Default::default(), vec![1.0; n]);
        fx.corpus = fx.corpus.with_lexicon(lexicon);

        let id = fx.id_of("a b");
        // both windows hold two copies of each of a and b
        let value = extract_outside(&fx.table, &fx.corpus, id, 2).unwrap();
        assert!((value - 1.0).abs() < 1e-12);

        let zid = fx.id_of("z");
        let single = extract_outside(&fx.table, &fx.corpus, zid, 2).unwrap();
        assert_eq!(single, 0.0);
    }

    #[test]
    fn test_idf_weights_positions() {
        let mut fx = fixture(&["a b a"], 2);
        let (a, b) = (fx.vocab["a"], fx.vocab["b"]);
        let mut idf = vec![0.0; 2];
        idf[a as usize] = 3.0;
        idf[b as usize] = 1.0;
        fx.corpus = fx.corpus.with_lexicon(Lexicon::new(Default::default(), Default::default(), idf));

        // "a b" once: context a=2, b=1; outside = [1, 0]
        let id = fx.id_of("a b");
        let value = extract_outside(&fx.table, &fx.corpus, id, 2).unwrap();
        assert!((value - 3.0 / 4.0).abs() < 1e-12);
    }
}
