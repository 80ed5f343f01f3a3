//! Keyword matching primitives used by the classifier.

use serde::{Deserialize, Serialize};

/// How a label matched a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Substring,
    Compound,
    Fuzzy,
}

/// Strongest way `label` matches `keyword`, if it does at all.
///
/// Both arguments are expected to be normalized already.
pub fn match_keyword(
    label: &str,
    keyword: &str,
    fuzzy_similarity: f32,
    exclusions: &[[String; 2]],
) -> Option<MatchKind> {
    if label == keyword {
        return Some(MatchKind::Exact);
    }
    if keyword.len() >= 3 && label.contains(keyword) {
        return Some(MatchKind::Substring);
    }
    if compound_match(label, keyword) {
        return Some(MatchKind::Compound);
    }
    if fuzzy_match(label, keyword, fuzzy_similarity, exclusions) {
        return Some(MatchKind::Fuzzy);
    }
    None
}

/// A space-separated part of at least 3 chars equals, or sits inside, a keyword of 4+ chars.
pub fn compound_match(label: &str, keyword: &str) -> bool {
    if keyword.len() < 4 || !label.contains(' ') {
        return false;
    }
    label
        .split(' ')
        .filter(|part| part.len() >= 3)
        .any(|part| part == keyword || keyword.contains(part))
}

/// Conservative same-position character comparison.
///
/// Only keywords of 4+ chars whose length is within 2 of the label are
/// considered, and pairs listed in `exclusions` never match.
pub fn fuzzy_match(
    label: &str,
    keyword: &str,
    min_similarity: f32,
    exclusions: &[[String; 2]],
) -> bool {
    if keyword.len() < 4 || label.len().abs_diff(keyword.len()) > 2 {
        return false;
    }
    if is_excluded(label, keyword, exclusions) {
        return false;
    }
    positional_similarity(label, keyword) >= min_similarity
}

fn is_excluded(a: &str, b: &str, exclusions: &[[String; 2]]) -> bool {
    exclusions
        .iter()
        .any(|[x, y]| (x == a && y == b) || (x == b && y == a))
}

/// Fraction of positions, over the longer string, holding the same character.
pub fn positional_similarity(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    let same = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    same as f32 / longest as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclusions() -> Vec<[String; 2]> {
        vec![["glass".to_string(), "grass".to_string()]]
    }

    #[test]
    fn test_exact_and_substring() {
        assert_eq!(match_keyword("bottle", "bottle", 0.85, &[]), Some(MatchKind::Exact));
        assert_eq!(
            match_keyword("water bottle", "bottle", 0.85, &[]),
            Some(MatchKind::Substring)
        );
    }

    #[test]
    fn test_compound_part_inside_keyword() {
        // "phon" is not a substring hit of the label, but sits inside the keyword.
        assert!(compound_match("old phon", "phone"));
        assert_eq!(match_keyword("old phon", "phone", 0.85, &[]), Some(MatchKind::Compound));
        assert!(!compound_match("phon", "phone"));
    }

    #[test]
    fn test_compound_ignores_short_keywords() {
        assert!(!compound_match("tin can", "can"));
    }

    #[test]
    fn test_fuzzy_requires_high_similarity() {
        assert!(fuzzy_match("batterys", "battery", 0.85, &[]));
        assert!(!fuzzy_match("bottle", "battle", 0.85, &[]));
    }

    #[test]
    fn test_fuzzy_length_gate() {
        assert!(!fuzzy_match("bat", "battery", 0.0, &[]));
        assert!(!fuzzy_match("cup", "cub", 0.0, &[]));
    }

    #[test]
    fn test_exclusion_pairs_never_match() {
        // 4 of 5 positions agree; a permissive threshold would accept it.
        assert!(fuzzy_match("grass", "glass", 0.8, &[]));
        assert!(!fuzzy_match("grass", "glass", 0.8, &exclusions()));
        assert!(!fuzzy_match("glass", "grass", 0.8, &exclusions()));
        assert_eq!(match_keyword("grass", "glass", 0.8, &exclusions()), None);
    }

    #[test]
    fn test_positional_similarity() {
        assert!((positional_similarity("abcd", "abcx") - 0.75).abs() < 1e-6);
        assert!((positional_similarity("abc", "abcde") - 0.6).abs() < 1e-6);
    }
}
