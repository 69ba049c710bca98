//! Batch driver: normalizes probabilities, then computes every pattern's
//! feature row in parallel.

use std::collections::HashMap;

use lazy_static::lazy_static;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::ExtractionConfig;
use crate::corpus::{Corpus, TokenId};
use crate::error::Result;
use crate::features::{
    extract_completeness, extract_lexical, extract_outside, extract_punctuation, extract_statistical,
};
use crate::pattern::PatternId;
use crate::table::PatternTable;

/// Column names of every non-empty feature row, in order.
pub const FEATURE_NAMES: [&str; 14] = [
    "stat_f1",
    "stat_f2",
    "stat_f4",
    "stat_outside",
    "stopwords_1st",
    "stopwords_last",
    "stopwords_ratio",
    "avg_idf",
    "punc_quote",
    "punc_dash",
    "punc_parenthesis",
    "first_capitalized",
    "complete_sub",
    "complete_super",
];

/// Columns appended by [`augment`].
pub const AUGMENTED_NAMES: [&str; 2] = ["aug_f1", "aug_f4"];

lazy_static! {
    static ref FEATURE_INDEX: HashMap<&'static str, usize> = FEATURE_NAMES
        .iter()
        .chain(AUGMENTED_NAMES.iter())
        .enumerate()
        .map(|(i, name)| (*name, i))
        .collect();
}

/// One row per pattern id. Single-token patterns have empty rows and must be
/// skipped by the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<&'static str>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, id: PatternId) -> &[f64] {
        &self.rows[id]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Named column of one row; `None` for empty rows and unknown names.
    pub fn value(&self, id: PatternId, name: &str) -> Option<f64> {
        let column = *FEATURE_INDEX.get(name)?;
        if column >= self.names.len() {
            return None;
        }
        self.rows.get(id)?.get(column).copied()
    }

    /// Rows that carry features, with their pattern ids.
    pub fn non_trivial_rows(&self) -> impl Iterator<Item = (PatternId, &[f64])> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_empty())
            .map(|(id, row)| (id, row.as_slice()))
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

/// Run `op` on a dedicated pool when the config asks for one.
fn run_in_pool<T, F>(config: &ExtractionConfig, op: F) -> Result<T>
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
            debug!(threads, "built extraction thread pool");
            Ok(pool.install(op))
        }
        None => Ok(op()),
    }
}

/// Feature row of a single pattern. Probabilities must already be normalized.
pub fn extract_pattern(
    table: &PatternTable,
    corpus: &Corpus,
    id: PatternId,
    config: &ExtractionConfig,
) -> Result<Vec<f64>> {
    let pattern = table.get(id);
    if pattern.len() <= 1 {
        return Ok(Vec::new());
    }

    let statistical = extract_statistical(table, id)?;
    let outside = extract_outside(table, corpus, id, config.context_sentences)?;
    let punctuation = extract_punctuation(table, corpus, id)?;
    let lexical = extract_lexical(&pattern.tokens, corpus.lexicon());
    let completeness = extract_completeness(table, corpus, id);

    let mut row = Vec::with_capacity(FEATURE_NAMES.len());
    statistical.push_into(&mut row);
    row.push(outside);
    lexical.push_into(&mut row);
    punctuation.push_into(&mut row);
    completeness.push_into(&mut row);
    Ok(row)
}

/// Compute the feature matrix for the whole table.
///
/// Writes normalized probabilities into the table first; after that the
/// table is only read. Any precondition violation aborts the whole run.
pub fn extract(table: &mut PatternTable, corpus: &Corpus, config: &ExtractionConfig) -> Result<FeatureMatrix> {
    table.check_closure()?;
    table.normalize_probabilities(corpus.len());

    let table: &PatternTable = table;
    info!(patterns = table.len(), tokens = corpus.len(), "extracting features");
    let rows = run_in_pool(config, || {
        (0..table.len())
            .into_par_iter()
            .with_min_len(config.chunk_size)
            .map(|id| extract_pattern(table, corpus, id, config))
            .collect::<Result<Vec<_>>>()
    })??;

    let non_trivial = rows.iter().filter(|row| !row.is_empty()).count();
    info!(non_trivial, "feature extraction complete");
    Ok(FeatureMatrix {
        names: FEATURE_NAMES.to_vec(),
        rows,
    })
}

/// External segmentation model consulted by [`augment`].
pub trait SegmentationModel: Sync {
    /// Probability of the best segmentation of `tokens` into known patterns.
    fn best_segmentation_probability(&self, tokens: &[TokenId]) -> f64;

    /// The model's own probability for pattern `id`.
    fn pattern_probability(&self, id: PatternId) -> f64;
}

/// Append `aug_f1` and `aug_f4` to every non-empty row.
pub fn augment<M: SegmentationModel>(
    matrix: &mut FeatureMatrix,
    table: &PatternTable,
    model: &M,
    config: &ExtractionConfig,
) -> Result<()> {
    let rows = &mut matrix.rows;
    run_in_pool(config, || {
        rows.par_iter_mut()
            .enumerate()
            .with_min_len(config.chunk_size)
            .filter(|(id, _)| table.get(*id).len() > 1)
            .for_each(|(id, row)| {
                let pattern = table.get(id);
                let (mut f1, mut f4) = (0.0_f64, 0.0_f64);
                if pattern.frequency > 0 {
                    let best = model.best_segmentation_probability(&pattern.tokens);
                    let probability = model.pattern_probability(id);
                    if best > 1e-9 {
                        f1 = probability / best;
                        f4 = probability * f1.ln();
                    } else {
                        f1 = 1e100;
                        f4 = 1e100;
                    }
                }
                row.push(f1);
                row.push(f4);
            })
    })?;
    matrix.names.extend_from_slice(&AUGMENTED_NAMES);
    Ok(())
}

/// [`extract`] followed by [`augment`].
pub fn extract_augmented<M: SegmentationModel>(
    table: &mut PatternTable,
    corpus: &Corpus,
    model: &M,
    config: &ExtractionConfig,
) -> Result<FeatureMatrix> {
    let mut matrix = extract(table, corpus, config)?;
    augment(&mut matrix, table, model, config)?;
    Ok(matrix)
}
