//! Stopword and idf cues from the token sequence alone.

use crate::corpus::{Lexicon, TokenId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalFeatures {
    pub first_stopword: f64,
    pub last_stopword: f64,
    pub stopword_ratio: f64,
    pub avg_idf: f64,
}

impl LexicalFeatures {
    pub fn push_into(&self, out: &mut Vec<f64>) {
        out.push(self.first_stopword);
        out.push(self.last_stopword);
        out.push(self.stopword_ratio);
        out.push(self.avg_idf);
    }
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Digits count as stopwords everywhere except at the last position.
pub fn extract_lexical(tokens: &[TokenId], lexicon: &Lexicon) -> LexicalFeatures {
    let stop_or_digit = |t: TokenId| lexicon.is_stopword(t) || lexicon.is_digit(t);
    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            return LexicalFeatures {
                first_stopword: 0.0,
                last_stopword: 0.0,
                stopword_ratio: 0.0,
                avg_idf: 0.0,
            };
        }
    };

    let stops = tokens.iter().filter(|&&t| stop_or_digit(t)).count();
    let idf: f64 = tokens.iter().map(|&t| lexicon.idf(t)).sum();
    let n = tokens.len() as f64;

    LexicalFeatures {
        first_stopword: flag(stop_or_digit(first)),
        last_stopword: flag(lexicon.is_stopword(last)),
        stopword_ratio: stops as f64 / n,
        avg_idf: idf / n,
    }
}
