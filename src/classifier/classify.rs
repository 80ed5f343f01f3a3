//! Label to waste category classification.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::classifier::config::{ClassifierConfig, FusionRule, normalize_label};
use crate::classifier::matching::{MatchKind, match_keyword};
use crate::classifier::Category;
use crate::detection::Label;
use crate::error::ConfigError;

/// Outcome of a successful classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    /// Derived from the raw label confidence and the match kind.
    pub confidence: f32,
    pub matched_keyword: String,
    pub kind: MatchKind,
    /// The label text that produced the match, as given.
    pub label: String,
}

#[derive(Debug, Clone)]
struct Candidate {
    category: Category,
    rank: usize,
    confidence: f32,
    keyword: String,
    kind: MatchKind,
}

/// Deterministic, stateless waste classifier built from a [`ClassifierConfig`].
#[derive(Debug, Clone)]
pub struct WasteClassifier {
    config: ClassifierConfig,
    ignored: HashSet<String>,
    direct: HashMap<String, Category>,
}

impl Default for WasteClassifier {
    fn default() -> Self {
        Self::build(ClassifierConfig::default())
    }
}

impl WasteClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ClassifierConfig) -> Self {
        let config = config.normalized();
        let ignored = config.ignored_labels.iter().cloned().collect();
        let direct = config
            .direct_mappings
            .iter()
            .map(|m| (m.label.clone(), m.category))
            .collect();
        Self {
            config,
            ignored,
            direct,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one label. `None` means "nothing to report", not an error.
    pub fn classify(&self, label: &str, confidence: f32) -> Option<ClassificationResult> {
        if !(confidence >= self.config.min_confidence) {
            return None;
        }
        let normalized = normalize_label(label);
        if normalized.is_empty() || self.ignored.contains(&normalized) {
            return None;
        }

        if let Some(&category) = self.direct.get(&normalized) {
            return Some(ClassificationResult {
                category,
                confidence: confidence * self.config.factors.exact,
                matched_keyword: normalized,
                kind: MatchKind::Exact,
                label: label.to_string(),
            });
        }

        let mut candidates = Vec::new();
        if normalized.contains(' ') {
            self.compound_overrides(&normalized, confidence, &mut candidates);
        }
        self.keyword_scan(&normalized, confidence, &self.config.priority, &mut candidates);

        candidates.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then_with(|| b.confidence.total_cmp(&a.confidence))
        });
        candidates.into_iter().next().map(|c| ClassificationResult {
            category: c.category,
            confidence: c.confidence,
            matched_keyword: c.keyword,
            kind: c.kind,
            label: label.to_string(),
        })
    }

    /// Classify every label reported for one detection event.
    ///
    /// The fusion rule wins when both of its labels are present, whatever
    /// their confidences. Otherwise labels are tried from most to least
    /// confident and the first one that classifies is returned.
    pub fn classify_batch(&self, labels: &[Label]) -> Option<ClassificationResult> {
        if let Some(result) = self.fuse(labels) {
            return Some(result);
        }

        let mut ordered: Vec<&Label> = labels.iter().collect();
        ordered.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        ordered
            .into_iter()
            .find_map(|l| self.classify(&l.text, l.confidence))
    }

    fn fuse(&self, labels: &[Label]) -> Option<ClassificationResult> {
        let FusionRule {
            labels: [first, second],
            category,
            confidence,
        } = self.config.fusion.as_ref()?;
        if labels.len() < 2 {
            return None;
        }
        let present: HashSet<String> = labels.iter().map(|l| normalize_label(&l.text)).collect();
        if !(present.contains(first) && present.contains(second)) {
            return None;
        }
        Some(ClassificationResult {
            category: *category,
            confidence: *confidence,
            matched_keyword: format!("{first}+{second}"),
            kind: MatchKind::Exact,
            label: labels
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Compound labels carrying a category's telltale term get that
    /// category considered even when no keyword of it matches verbatim.
    fn compound_overrides(&self, label: &str, confidence: f32, out: &mut Vec<Candidate>) {
        let terms = &self.config.overrides;
        let routed = [
            (Category::Hazardous, &terms.hazardous),
            (Category::ElectronicWaste, &terms.electronic),
            (Category::Organic, &terms.organic),
        ];

        let mut higher_term_present = false;
        for (category, list) in routed {
            let Some(term) = list.iter().find(|t| label.contains(t.as_str())) else {
                continue;
            };
            if category != Category::Organic {
                higher_term_present = true;
            }
            let before = out.len();
            self.keyword_scan(label, confidence, &[category], out);
            if out.len() == before {
                out.push(self.candidate(category, confidence, term, MatchKind::Compound));
            }
            if category == Category::Hazardous {
                return;
            }
        }

        if higher_term_present {
            return;
        }
        if let Some(term) = terms
            .container
            .iter()
            .find(|t| label.split(' ').any(|part| part == t.as_str()))
        {
            out.push(self.candidate(Category::Recyclable, confidence, term, MatchKind::Compound));
        }
    }

    fn keyword_scan(
        &self,
        label: &str,
        confidence: f32,
        categories: &[Category],
        out: &mut Vec<Candidate>,
    ) {
        for &category in categories {
            for keyword in self.config.keywords.get(category) {
                if let Some(kind) = match_keyword(
                    label,
                    keyword,
                    self.config.fuzzy_similarity,
                    &self.config.fuzzy_exclusions,
                ) {
                    out.push(self.candidate(category, confidence, keyword, kind));
                }
            }
        }
    }

    fn candidate(
        &self,
        category: Category,
        confidence: f32,
        keyword: &str,
        kind: MatchKind,
    ) -> Candidate {
        let factors = &self.config.factors;
        let factor = match kind {
            MatchKind::Exact => factors.exact,
            MatchKind::Substring => factors.substring,
            MatchKind::Compound => factors.compound,
            MatchKind::Fuzzy => factors.fuzzy,
        };
        Candidate {
            category,
            rank: self.rank(category),
            confidence: confidence * factor,
            keyword: keyword.to_string(),
            kind,
        }
    }

    fn rank(&self, category: Category) -> usize {
        self.config
            .priority
            .iter()
            .position(|c| *c == category)
            .unwrap_or(self.config.priority.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> WasteClassifier {
        WasteClassifier::default()
    }

    #[test]
    fn test_low_confidence_is_rejected() {
        let c = classifier();
        for conf in [0.0, 0.1, 0.29, 0.2999] {
            assert!(c.classify("bottle", conf).is_none());
            assert!(c.classify("battery", conf).is_none());
        }
        assert!(c.classify("bottle", 0.30).is_some());
    }

    #[test]
    fn test_nan_confidence_is_rejected() {
        assert!(classifier().classify("bottle", f32::NAN).is_none());
    }

    #[test]
    fn test_ignored_labels_always_rejected() {
        let c = classifier();
        assert!(c.classify("Place", 1.0).is_none());
        assert!(c.classify("  PERSON ", 1.0).is_none());
    }

    #[test]
    fn test_direct_mappings() {
        let c = classifier();
        let r = c.classify("Home good", 0.8).unwrap();
        assert_eq!(r.category, Category::Recyclable);
        assert_eq!(r.kind, MatchKind::Exact);
        assert!((r.confidence - 0.8 * 0.95).abs() < 1e-6);

        assert_eq!(c.classify("Food", 0.6).unwrap().category, Category::Organic);
        assert_eq!(c.classify("Plant", 0.6).unwrap().category, Category::Organic);
    }

    #[test]
    fn test_match_kinds_and_confidence() {
        let c = classifier();

        let exact = c.classify("laptop", 1.0).unwrap();
        assert_eq!(exact.category, Category::ElectronicWaste);
        assert_eq!(exact.kind, MatchKind::Exact);
        assert!((exact.confidence - 0.95).abs() < 1e-6);

        let sub = c.classify("newspapers", 1.0).unwrap();
        assert_eq!(sub.category, Category::Recyclable);
        assert_eq!(sub.kind, MatchKind::Substring);
        assert!((sub.confidence - 0.85).abs() < 1e-6);

        let fuzzy = c.classify("calculater", 1.0).unwrap();
        assert_eq!(fuzzy.category, Category::ElectronicWaste);
        assert_eq!(fuzzy.kind, MatchKind::Fuzzy);
        assert!((fuzzy.confidence - 0.65).abs() < 1e-6);
    }

    #[test]
    fn test_priority_favors_hazardous_over_electronic() {
        let r = classifier().classify("phone battery", 0.9).unwrap();
        assert_eq!(r.category, Category::Hazardous);
    }

    #[test]
    fn test_priority_favors_electronic_over_recyclable() {
        let r = classifier().classify("laptop box", 0.9).unwrap();
        assert_eq!(r.category, Category::ElectronicWaste);
    }

    #[test]
    fn test_priority_favors_recyclable_over_organic() {
        let r = classifier().classify("banana box", 0.9).unwrap();
        assert_eq!(r.category, Category::Recyclable);

        let r = classifier().classify("fruit jar", 0.9).unwrap();
        assert_eq!(r.category, Category::Recyclable);
    }

    #[test]
    fn test_hazard_term_routes_compound_label() {
        let r = classifier().classify("toxic sludge", 0.8).unwrap();
        assert_eq!(r.category, Category::Hazardous);
        assert_eq!(r.matched_keyword, "toxic");
    }

    #[test]
    fn test_override_term_without_keyword_still_counts() {
        // "hazard" is a routing term but not a Hazardous keyword.
        let r = classifier().classify("hazard drum", 0.8).unwrap();
        assert_eq!(r.category, Category::Hazardous);
        assert_eq!(r.kind, MatchKind::Compound);
    }

    #[test]
    fn test_container_heuristic() {
        let r = classifier().classify("drink can", 0.8).unwrap();
        assert_eq!(r.category, Category::Recyclable);
    }

    #[test]
    fn test_unknown_label_has_no_category() {
        assert!(classifier().classify("sofa", 0.99).is_none());
        assert!(classifier().classify("", 0.99).is_none());
    }

    #[test]
    fn test_exclusion_pair_does_not_cross_categories() {
        let c = classifier();
        assert_eq!(c.classify("grass", 0.9).unwrap().category, Category::Organic);
        assert_eq!(c.classify("glass", 0.9).unwrap().category, Category::Recyclable);
    }

    #[test]
    fn test_deterministic() {
        let c = classifier();
        for label in ["phone battery", "banana box", "plastic bottle", "calculater"] {
            assert_eq!(c.classify(label, 0.77), c.classify(label, 0.77));
        }
    }

    #[test]
    fn test_fusion_overrides_everything() {
        let c = classifier();
        let labels = vec![Label::new("Home good", 0.05), Label::new("Fashion good", 0.1)];
        let r = c.classify_batch(&labels).unwrap();
        assert_eq!(r.category, Category::ElectronicWaste);
        assert!((r.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_batch_uses_most_confident_classifiable_label() {
        let c = classifier();
        let labels = vec![
            Label::new("banana", 0.5),
            Label::new("sofa", 0.99),
            Label::new("bottle", 0.7),
        ];
        let r = c.classify_batch(&labels).unwrap();
        assert_eq!(r.category, Category::Recyclable);
        assert_eq!(r.label, "bottle");
    }

    #[test]
    fn test_single_label_never_fuses() {
        let c = classifier();
        let r = c.classify_batch(&[Label::new("Home good", 0.8)]).unwrap();
        assert_eq!(r.category, Category::Recyclable);
    }
}
