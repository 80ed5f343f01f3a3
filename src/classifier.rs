//! Waste category classification from noisy detector labels.
//!
//! Labels are matched against per-category keyword tables in a fixed
//! priority order; unmatched, ignored or low-confidence labels yield `None`.

mod category;
mod classify;
mod config;
mod matching;

pub use category::{Category, Color};
pub use classify::{ClassificationResult, WasteClassifier};
pub use config::{
    ClassifierConfig, DirectMapping, FusionRule, KeywordTable, MatchFactors, OverrideTerms,
    normalize_label,
};
pub use matching::{MatchKind, fuzzy_match, positional_similarity};
