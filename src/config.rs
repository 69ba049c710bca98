//! Extraction settings.

/// Patterns handed to one rayon task at a time.
pub const PATTERN_CHUNK_SIZE: usize = 100;

/// Sentence ends crossed on each side when building an outside-context window.
pub const CONTEXT_SENTENCES: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub chunk_size: usize,
    /// Size of a dedicated pool for this run; `None` uses rayon's global pool.
    pub threads: Option<usize>,
    pub context_sentences: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            chunk_size: PATTERN_CHUNK_SIZE,
            threads: None,
            context_sentences: CONTEXT_SENTENCES,
        }
    }
}

impl ExtractionConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_context_sentences(mut self, sentences: usize) -> Self {
        self.context_sentences = sentences;
        self
    }
}
