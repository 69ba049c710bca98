//! Small corpora and exhaustive n-gram tables for unit tests.

use std::collections::HashMap;

use crate::corpus::{Corpus, TokenId};
use crate::table::PatternTable;

pub(crate) struct Fixture {
    pub corpus: Corpus,
    pub table: PatternTable,
    pub vocab: HashMap<String, TokenId>,
}

impl Fixture {
    /// Whitespace-separated words to token ids.
    pub fn ids(&self, phrase: &str) -> Vec<TokenId> {
        phrase.split_whitespace().map(|w| self.vocab[w]).collect()
    }

    pub fn id_of(&self, phrase: &str) -> usize {
        self.table.lookup(&self.ids(phrase)).expect("phrase not in table")
    }
}

/// Tokenize one string per sentence and record every n-gram up to `max_len`
/// that stays inside a sentence.
pub(crate) fn fixture(sentences: &[&str], max_len: usize) -> Fixture {
    let mut vocab: HashMap<String, TokenId> = HashMap::new();
    let tokenized: Vec<Vec<TokenId>> = sentences
        .iter()
        .map(|s| {
            s.split_whitespace()
                .map(|w| {
                    let next = vocab.len() as TokenId;
                    *vocab.entry(w.to_string()).or_insert(next)
                })
                .collect()
        })
        .collect();
    let corpus = Corpus::from_sentences(&tokenized);

    let mut order: Vec<Vec<TokenId>> = Vec::new();
    let mut ends: HashMap<Vec<TokenId>, Vec<usize>> = HashMap::new();
    for len in 1..=max_len {
        let mut offset = 0;
        for sentence in &tokenized {
            for start in 0..sentence.len().saturating_sub(len - 1) {
                let gram = sentence[start..start + len].to_vec();
                let entry = ends.entry(gram.clone()).or_insert_with(|| {
                    order.push(gram);
                    Vec::new()
                });
                entry.push(offset + start + len - 1);
            }
            offset += sentence.len();
        }
    }

    let mut table = PatternTable::new();
    for gram in order {
        let occurrences = ends.remove(&gram).unwrap_or_default();
        table.insert(gram, occurrences.len() as u64, occurrences);
    }

    Fixture { corpus, table, vocab }
}
