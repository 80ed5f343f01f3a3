use serde::{Deserialize, Serialize};

use crate::classifier::Category;
use crate::tracker::CarriedItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    Perfect,
    Partial,
    None,
    EmptyInventory,
}

/// Result of holding the carried items up against one bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinMatchResult {
    pub outcome: MatchOutcome,
    pub bin: Category,
    pub matching_items: Vec<CarriedItem>,
    pub non_matching_items: Vec<CarriedItem>,
    pub message: String,
}

impl BinMatchResult {
    /// Whether confirming this result would dispose anything.
    pub fn has_matches(&self) -> bool {
        !self.matching_items.is_empty()
    }
}

/// Partition `carried` by whether each item belongs in a `bin` bin.
pub fn match_bin(carried: &[CarriedItem], bin: Category) -> BinMatchResult {
    let (matching_items, non_matching_items): (Vec<CarriedItem>, Vec<CarriedItem>) =
        carried.iter().cloned().partition(|item| item.category == bin);

    let outcome = if carried.is_empty() {
        MatchOutcome::EmptyInventory
    } else if non_matching_items.is_empty() {
        MatchOutcome::Perfect
    } else if matching_items.is_empty() {
        MatchOutcome::None
    } else {
        MatchOutcome::Partial
    };

    let message = match outcome {
        MatchOutcome::EmptyInventory => {
            "You're not carrying anything. Pick up some waste first!".to_string()
        }
        MatchOutcome::Perfect => format!(
            "Perfect match! {} for the {} bin.",
            item_count(matching_items.len()),
            bin
        ),
        MatchOutcome::Partial => format!(
            "{} for the {} bin; {} belong elsewhere.",
            item_count(matching_items.len()),
            bin,
            item_count(non_matching_items.len())
        ),
        MatchOutcome::None => format!(
            "None of your {} belong in the {} bin.",
            item_count(non_matching_items.len()),
            bin
        ),
    };

    BinMatchResult {
        outcome,
        bin,
        matching_items,
        non_matching_items,
        message,
    }
}

fn item_count(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{n} items")
    }
}
