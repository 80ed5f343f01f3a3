//! Comparing carried items against a scanned bin.

mod matcher;
mod scan;

pub use matcher::{BinMatchResult, MatchOutcome, match_bin};
pub use scan::ScannedBin;
