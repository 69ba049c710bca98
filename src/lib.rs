//! Feature extraction for mined phrase candidates.
//!
//! Given a token corpus and the table of patterns a frequent-pattern miner
//! produced, computes a fixed-width feature row per multi-token pattern for a
//! downstream quality classifier:
//! - statistical decomposition (best binary split, likelihood ratios)
//! - outside-context diversity over neighboring sentences
//! - stopword and idf cues
//! - punctuation and capitalization around occurrences
//! - completeness against truncations and one-token extensions
//!
//! Extraction normalizes probabilities once, then computes rows in parallel
//! with rayon over a read-only table snapshot.

pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod features;
pub mod pattern;
pub mod table;
pub mod truth;

#[cfg(feature = "python")]
mod python;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::ExtractionConfig;
pub use corpus::{Corpus, Lexicon, SurfaceMarks, TokenId};
pub use error::{FeatureError, Result};
pub use extract::{
    augment, extract, extract_augmented, extract_pattern, FeatureMatrix, SegmentationModel, AUGMENTED_NAMES,
    FEATURE_NAMES,
};
pub use pattern::{Pattern, PatternId};
pub use table::PatternTable;
pub use truth::{recognize, TruthPattern};
