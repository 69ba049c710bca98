//! Read-only corpus model handed in by the tokenizer.
//!
//! Holds the token stream, sentence boundaries, per-position surface marks
//! (capitalization, adjacent punctuation) and the lexicon tables (stopwords,
//! digit-like tokens, idf). Feature routines take a `&Corpus` explicitly
//! instead of reaching for globals.

use std::collections::HashSet;

use crate::error::{FeatureError, Result};

pub type TokenId = u32;

/// Surface cues recorded by the tokenizer for one stream position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceMarks {
    pub first_capital: bool,
    pub all_capital: bool,
    pub dash_after: bool,
    pub quote_before: bool,
    pub quote_after: bool,
    pub parenthesis_before: bool,
    pub parenthesis_after: bool,
}

/// Corpus-wide per-token tables.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    stopwords: HashSet<TokenId>,
    digits: HashSet<TokenId>,
    idf: Vec<f64>,
}

impl Lexicon {
    pub fn new(stopwords: HashSet<TokenId>, digits: HashSet<TokenId>, idf: Vec<f64>) -> Self {
        Self {
            stopwords,
            digits,
            idf,
        }
    }

    #[inline]
    pub fn is_stopword(&self, token: TokenId) -> bool {
        self.stopwords.contains(&token)
    }

    #[inline]
    pub fn is_digit(&self, token: TokenId) -> bool {
        self.digits.contains(&token)
    }

    /// Unknown tokens carry no weight.
    #[inline]
    pub fn idf(&self, token: TokenId) -> f64 {
        self.idf.get(token as usize).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct Corpus {
    tokens: Vec<TokenId>,
    sentence_ends: Vec<bool>,
    marks: Vec<SurfaceMarks>,
    lexicon: Lexicon,
}

impl Corpus {
    /// Build a corpus from a token stream and its sentence-end flags.
    ///
    /// Surface marks start out all-false and the lexicon empty; attach them with
    /// [`Corpus::with_marks`] and [`Corpus::with_lexicon`].
    pub fn new(tokens: Vec<TokenId>, sentence_ends: Vec<bool>) -> Result<Self> {
        if sentence_ends.len() != tokens.len() {
            return Err(FeatureError::LengthMismatch {
                what: "sentence ends",
                expected: tokens.len(),
                actual: sentence_ends.len(),
            });
        }
        let marks = vec![SurfaceMarks::default(); tokens.len()];
        Ok(Self {
            tokens,
            sentence_ends,
            marks,
            lexicon: Lexicon::default(),
        })
    }

    /// Concatenate pre-split sentences into one stream.
    pub fn from_sentences(sentences: &[Vec<TokenId>]) -> Self {
        let mut tokens = Vec::new();
        let mut sentence_ends = Vec::new();
        for sentence in sentences.iter().filter(|s| !s.is_empty()) {
            tokens.extend_from_slice(sentence);
            sentence_ends.resize(tokens.len(), false);
            if let Some(last) = sentence_ends.last_mut() {
                *last = true;
            }
        }
        let marks = vec![SurfaceMarks::default(); tokens.len()];
        Self {
            tokens,
            sentence_ends,
            marks,
            lexicon: Lexicon::default(),
        }
    }

    pub fn with_marks(mut self, marks: Vec<SurfaceMarks>) -> Result<Self> {
        if marks.len() != self.tokens.len() {
            return Err(FeatureError::LengthMismatch {
                what: "surface marks",
                expected: self.tokens.len(),
                actual: marks.len(),
            });
        }
        self.marks = marks;
        Ok(self)
    }

    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Total number of tokens in the stream.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn token(&self, pos: usize) -> TokenId {
        self.tokens[pos]
    }

    #[inline]
    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    /// The last stream position always closes a sentence.
    #[inline]
    pub fn is_sentence_end(&self, pos: usize) -> bool {
        pos + 1 == self.tokens.len() || self.sentence_ends.get(pos).copied().unwrap_or(false)
    }

    #[inline]
    pub fn marks(&self, pos: usize) -> SurfaceMarks {
        self.marks[pos]
    }

    #[inline]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sentences_marks_ends() {
        let corpus = Corpus::from_sentences(&[vec![1, 2, 3], vec![], vec![4, 5]]);
        assert_eq!(corpus.len(), 5);
        assert!(!corpus.is_sentence_end(0));
        assert!(corpus.is_sentence_end(2));
        assert!(!corpus.is_sentence_end(3));
        assert!(corpus.is_sentence_end(4));
    }

    #[test]
    fn test_stream_end_is_sentence_end() {
        let corpus = Corpus::new(vec![7, 8, 9], vec![false; 3]).unwrap();
        assert!(!corpus.is_sentence_end(1));
        assert!(corpus.is_sentence_end(2));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        assert!(matches!(
            Corpus::new(vec![1, 2], vec![false]),
            Err(FeatureError::LengthMismatch { expected: 2, actual: 1, .. })
        ));
        let corpus = Corpus::new(vec![1, 2], vec![false, true]).unwrap();
        assert!(corpus.with_marks(vec![SurfaceMarks::default()]).is_err());
    }

    #[test]
    fn test_lexicon_lookups() {
        let lexicon = Lexicon::new([1].into_iter().collect(), [2].into_iter().collect(), vec![0.0, 0.5, 1.5]);
        assert!(lexicon.is_stopword(1));
        assert!(!lexicon.is_stopword(2));
        assert!(lexicon.is_digit(2));
        assert_eq!(lexicon.idf(2), 1.5);
        assert_eq!(lexicon.idf(99), 0.0);
    }
}
