//! Keyword tables and thresholds for the waste classifier.

use serde::{Deserialize, Serialize};

use crate::classifier::Category;
use crate::error::ConfigError;

/// Upstream label that maps straight to a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectMapping {
    pub label: String,
    pub category: Category,
}

/// Two labels reported together for one object that override every other rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionRule {
    pub labels: [String; 2],
    pub category: Category,
    pub confidence: f32,
}

/// Confidence multipliers per match kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchFactors {
    pub exact: f32,
    pub substring: f32,
    pub compound: f32,
    pub fuzzy: f32,
}

impl Default for MatchFactors {
    fn default() -> Self {
        Self {
            exact: 0.95,
            substring: 0.85,
            compound: 0.75,
            fuzzy: 0.65,
        }
    }
}

/// Terms that route compound labels to a category before the generic scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideTerms {
    pub hazardous: Vec<String>,
    pub electronic: Vec<String>,
    pub organic: Vec<String>,
    pub container: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTable {
    pub recyclable: Vec<String>,
    pub organic: Vec<String>,
    pub electronic_waste: Vec<String>,
    pub hazardous: Vec<String>,
}

impl KeywordTable {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Recyclable => &self.recyclable,
            Category::Organic => &self.organic,
            Category::ElectronicWaste => &self.electronic_waste,
            Category::Hazardous => &self.hazardous,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Recyclable => &mut self.recyclable,
            Category::Organic => &mut self.organic,
            Category::ElectronicWaste => &mut self.electronic_waste,
            Category::Hazardous => &mut self.hazardous,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Labels below this confidence are rejected outright.
    pub min_confidence: f32,
    /// Minimum positional character agreement for a fuzzy match.
    pub fuzzy_similarity: f32,
    pub factors: MatchFactors,
    /// Most important first.
    pub priority: Vec<Category>,
    pub ignored_labels: Vec<String>,
    pub direct_mappings: Vec<DirectMapping>,
    pub fusion: Option<FusionRule>,
    pub keywords: KeywordTable,
    /// Word pairs that must never fuzzy-match each other.
    pub fuzzy_exclusions: Vec<[String; 2]>,
    pub overrides: OverrideTerms,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for OverrideTerms {
    fn default() -> Self {
        Self {
            hazardous: words(&[
                "hazard", "hazardous", "chemical", "toxic", "poison", "flammable", "corrosive",
                "battery",
            ]),
            electronic: words(&[
                "electronic", "electric", "device", "phone", "computer", "digital", "charger",
            ]),
            organic: words(&[
                "organic", "compost", "food", "fruit", "vegetable", "peel", "leftover",
            ]),
            container: words(&[
                "bottle", "container", "jar", "can", "carton", "box", "cup", "packaging",
            ]),
        }
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            recyclable: words(&[
                "bottle", "plastic", "can", "aluminum", "tin can", "glass", "jar", "paper",
                "cardboard", "carton", "newspaper", "magazine", "box", "container", "cup",
                "packaging", "envelope", "metal",
            ]),
            organic: words(&[
                "food", "fruit", "apple", "banana", "orange", "vegetable", "peel", "bread",
                "leaf", "leaves", "plant", "grass", "coffee grounds", "eggshell", "compost",
                "tea bag", "flower",
            ]),
            electronic_waste: words(&[
                "phone", "smartphone", "mobile phone", "laptop", "computer", "tablet",
                "keyboard", "mouse", "charger", "cable", "headphones", "earbuds", "remote",
                "circuit", "television", "monitor", "camera", "speaker", "electronic",
                "calculator", "router",
            ]),
            hazardous: words(&[
                "battery", "batteries", "paint", "chemical", "pesticide", "bleach", "aerosol",
                "solvent", "motor oil", "medicine", "syringe", "lighter", "fluorescent",
                "thermometer", "insecticide", "toxic", "acid",
            ]),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.30,
            fuzzy_similarity: 0.85,
            factors: MatchFactors::default(),
            priority: vec![
                Category::Hazardous,
                Category::ElectronicWaste,
                Category::Recyclable,
                Category::Organic,
            ],
            ignored_labels: words(&[
                "place", "person", "room", "indoor", "outdoor", "sky", "floor", "wall",
            ]),
            direct_mappings: vec![
                DirectMapping {
                    label: "home good".into(),
                    category: Category::Recyclable,
                },
                DirectMapping {
                    label: "packaged goods".into(),
                    category: Category::Recyclable,
                },
                DirectMapping {
                    label: "food".into(),
                    category: Category::Organic,
                },
                DirectMapping {
                    label: "plant".into(),
                    category: Category::Organic,
                },
            ],
            fusion: Some(FusionRule {
                labels: ["home good".into(), "fashion good".into()],
                category: Category::ElectronicWaste,
                confidence: 0.9,
            }),
            keywords: KeywordTable::default(),
            fuzzy_exclusions: vec![
                ["glass".into(), "grass".into()],
                ["cable".into(), "table".into()],
                ["paper".into(), "pager".into()],
                ["battery".into(), "buttery".into()],
            ],
            overrides: OverrideTerms::default(),
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "classifier.min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        if !(0.0..=1.0).contains(&self.fuzzy_similarity) {
            return Err(ConfigError::Invalid(format!(
                "classifier.fuzzy_similarity must be within [0, 1], got {}",
                self.fuzzy_similarity
            )));
        }
        let f = &self.factors;
        for (name, value) in [
            ("exact", f.exact),
            ("substring", f.substring),
            ("compound", f.compound),
            ("fuzzy", f.fuzzy),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "classifier.factors.{name} must be within [0, 1], got {value}"
                )));
            }
        }
        for category in Category::ALL {
            if !self.priority.contains(&category) {
                return Err(ConfigError::Invalid(format!(
                    "classifier.priority is missing {category}"
                )));
            }
        }
        if self.priority.len() != Category::ALL.len() {
            return Err(ConfigError::Invalid(
                "classifier.priority lists a category more than once".into(),
            ));
        }
        Ok(())
    }

    /// Lower-cased, trimmed copy of every table.
    pub(crate) fn normalized(&self) -> Self {
        let norm = |list: &[String]| -> Vec<String> {
            list.iter()
                .map(|s| normalize_label(s))
                .filter(|s| !s.is_empty())
                .collect()
        };
        let mut out = self.clone();
        for category in Category::ALL {
            let normalized = norm(self.keywords.get(category));
            *out.keywords.get_mut(category) = normalized;
        }
        out.ignored_labels = norm(&self.ignored_labels);
        out.overrides = OverrideTerms {
            hazardous: norm(&self.overrides.hazardous),
            electronic: norm(&self.overrides.electronic),
            organic: norm(&self.overrides.organic),
            container: norm(&self.overrides.container),
        };
        for mapping in &mut out.direct_mappings {
            mapping.label = normalize_label(&mapping.label);
        }
        if let Some(rule) = &mut out.fusion {
            rule.labels = [normalize_label(&rule.labels[0]), normalize_label(&rule.labels[1])];
        }
        for pair in &mut out.fuzzy_exclusions {
            *pair = [normalize_label(&pair[0]), normalize_label(&pair[1])];
        }
        out
    }
}

/// Lower-case and collapse internal whitespace.
pub fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        ClassifierConfig::default().validate().unwrap();
    }

    #[test]
    fn test_priority_must_cover_all_categories() {
        let config = ClassifierConfig {
            priority: vec![Category::Hazardous, Category::Organic],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("  Plastic   BOTTLE "), "plastic bottle");
    }
}
