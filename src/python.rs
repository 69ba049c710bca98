//! Python bindings.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{ExtractionConfig, PATTERN_CHUNK_SIZE};
use crate::corpus::{Corpus, Lexicon, SurfaceMarks, TokenId};
use crate::error::FeatureError;
use crate::extract::{extract, FEATURE_NAMES};
use crate::table::PatternTable;
use crate::truth::{recognize, TruthPattern};

impl From<FeatureError> for PyErr {
    fn from(err: FeatureError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// (first_capital, all_capital, dash_after, quote_before, quote_after,
///  parenthesis_before, parenthesis_after)
type MarkTuple = (bool, bool, bool, bool, bool, bool, bool);

#[pyclass(name = "Corpus")]
struct PyCorpus {
    inner: Corpus,
}

#[pymethods]
impl PyCorpus {
    #[new]
    #[pyo3(signature = (tokens, sentence_ends, stopwords=Vec::new(), digits=Vec::new(), idf=Vec::new(), marks=None))]
    fn new(
        tokens: Vec<TokenId>,
        sentence_ends: Vec<bool>,
        stopwords: Vec<TokenId>,
        digits: Vec<TokenId>,
        idf: Vec<f64>,
        marks: Option<Vec<MarkTuple>>,
    ) -> PyResult<Self> {
        let lexicon = Lexicon::new(stopwords.into_iter().collect(), digits.into_iter().collect(), idf);
        let mut corpus = Corpus::new(tokens, sentence_ends)?.with_lexicon(lexicon);
        if let Some(marks) = marks {
            let marks = marks
                .into_iter()
                .map(|m| SurfaceMarks {
                    first_capital: m.0,
                    all_capital: m.1,
                    dash_after: m.2,
                    quote_before: m.3,
                    quote_after: m.4,
                    parenthesis_before: m.5,
                    parenthesis_after: m.6,
                })
                .collect();
            corpus = corpus.with_marks(marks)?;
        }
        Ok(Self { inner: corpus })
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

#[pyclass(name = "PatternTable")]
struct PyPatternTable {
    inner: PatternTable,
}

#[pymethods]
impl PyPatternTable {
    #[new]
    fn new() -> Self {
        Self {
            inner: PatternTable::new(),
        }
    }

    /// Register a mined pattern; returns its id.
    fn insert(&mut self, tokens: Vec<TokenId>, frequency: u64, ends: Vec<usize>) -> usize {
        self.inner.insert(tokens, frequency, ends)
    }

    fn lookup(&self, tokens: Vec<TokenId>) -> Option<usize> {
        self.inner.lookup(&tokens)
    }

    fn probability(&self, id: usize) -> PyResult<f64> {
        self.check_id(id)?;
        Ok(self.inner.get(id).probability)
    }

    fn label(&self, id: usize) -> PyResult<Option<bool>> {
        self.check_id(id)?;
        Ok(self.inner.get(id).label)
    }

    /// Label patterns found in `truth` (a list of `(tokens, label)`).
    /// Returns how many were found.
    fn recognize(&mut self, truth: Vec<(Vec<TokenId>, bool)>) -> usize {
        let truth: Vec<TruthPattern> = truth
            .into_iter()
            .map(|(tokens, label)| TruthPattern::new(tokens, label))
            .collect();
        recognize(&mut self.inner, &truth)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

impl PyPatternTable {
    fn check_id(&self, id: usize) -> PyResult<()> {
        if id >= self.inner.len() {
            return Err(PyValueError::new_err(format!("unknown pattern id {}", id)));
        }
        Ok(())
    }
}

/// Compute feature rows for every pattern.
/// Returns: (rows indexed by pattern id, feature names)
#[pyfunction]
#[pyo3(signature = (table, corpus, chunk_size=PATTERN_CHUNK_SIZE, threads=None))]
fn extract_features(
    mut table: PyRefMut<'_, PyPatternTable>,
    corpus: PyRef<'_, PyCorpus>,
    chunk_size: usize,
    threads: Option<usize>,
) -> PyResult<(Vec<Vec<f64>>, Vec<String>)> {
    let mut config = ExtractionConfig::default().with_chunk_size(chunk_size);
    if let Some(threads) = threads {
        config = config.with_threads(threads);
    }
    let matrix = extract(&mut table.inner, &corpus.inner, &config)?;
    let names = matrix.names().iter().map(|n| n.to_string()).collect();
    Ok((matrix.into_rows(), names))
}

#[pyfunction]
fn feature_names() -> Vec<&'static str> {
    FEATURE_NAMES.to_vec()
}

#[pymodule]
fn phrase_features(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(extract_features, m)?)?;
    m.add_function(wrap_pyfunction!(feature_names, m)?)?;
    m.add_class::<PyCorpus>()?;
    m.add_class::<PyPatternTable>()?;
    Ok(())
}
