//! Vehicle brand extraction

use crate::config::FeatureConfig;
use serde::{Serialize, Serializer};
use std::fmt;

/// Label for a make that is recorded as not specified
pub const UNSPECIFIED_BRAND: &str = "UNSPECIFIED";

/// Label for a make that matches no known brand
pub const OTHER_BRAND: &str = "OTHER";

/// Brand of the vehicle involved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CarBrand {
    /// Canonical brand name as spelled in the brand list
    Known(String),
    Unspecified,
    Other,
}

impl CarBrand {
    pub fn as_str(&self) -> &str {
        match self {
            CarBrand::Known(name) => name,
            CarBrand::Unspecified => UNSPECIFIED_BRAND,
            CarBrand::Other => OTHER_BRAND,
        }
    }
}

impl fmt::Display for CarBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CarBrand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Ordered brand matcher; list order breaks ties between overlapping names
#[derive(Debug, Clone)]
pub struct BrandClassifier {
    /// (canonical, lowercased) pairs
    brands: Vec<(String, String)>,
    unspecified: String,
}

impl BrandClassifier {
    /// Create a classifier from an ordered brand list and the "not specified" sentinel
    pub fn new(brands: &[String], unspecified: &str) -> Self {
        Self {
            brands: brands
                .iter()
                .map(|brand| (brand.clone(), brand.to_lowercase()))
                .collect(),
            unspecified: unspecified.to_string(),
        }
    }

    pub fn from_config(config: &FeatureConfig) -> Self {
        Self::new(&config.car_brands, &config.unspecified_vehicle)
    }

    /// Extract the brand from a free-text vehicle make
    pub fn classify(&self, text: Option<&str>) -> CarBrand {
        let Some(text) = text.filter(|t| *t != self.unspecified) else {
            return CarBrand::Unspecified;
        };
        let text = text.to_lowercase();

        self.brands
            .iter()
            .find(|(_, lowered)| text.contains(lowered.as_str()))
            .map(|(canonical, _)| CarBrand::Known(canonical.clone()))
            .unwrap_or(CarBrand::Other)
    }
}

impl Default for BrandClassifier {
    fn default() -> Self {
        Self::from_config(&FeatureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_casing() {
        let classifier = BrandClassifier::default();
        assert_eq!(classifier.classify(Some("ŠKODA OCTAVIA")).as_str(), "Škoda");
        assert_eq!(classifier.classify(Some("bmw x5")).as_str(), "BMW");
        assert_eq!(classifier.classify(Some("Iveco Daily")).as_str(), "IVECO");
        assert_eq!(classifier.classify(Some("LAND ROVER Defender")).as_str(), "Land Rover");
    }

    #[test]
    fn test_unspecified() {
        let classifier = BrandClassifier::default();
        assert_eq!(classifier.classify(Some("Neuvedeno")), CarBrand::Unspecified);
        assert_eq!(classifier.classify(None), CarBrand::Unspecified);
    }

    #[test]
    fn test_sentinel_match_is_exact() {
        let classifier = BrandClassifier::default();
        assert_eq!(classifier.classify(Some("neuvedeno")), CarBrand::Other);
        assert_eq!(classifier.classify(Some("Neuvedeno ")), CarBrand::Other);
    }

    #[test]
    fn test_other() {
        let classifier = BrandClassifier::default();
        assert_eq!(classifier.classify(Some("Tatra 613")), CarBrand::Other);
        assert_eq!(classifier.classify(Some("")), CarBrand::Other);
    }

    #[test]
    fn test_list_order_breaks_ties() {
        // "Kia" appears before "Nissan"; text containing both resolves to the earlier entry
        let classifier = BrandClassifier::default();
        assert_eq!(classifier.classify(Some("Nissan / Kia")).as_str(), "Kia");

        let reordered = BrandClassifier::new(&["Seat".to_string(), "Seat Leon".to_string()], "-");
        assert_eq!(reordered.classify(Some("seat leon")).as_str(), "Seat");
    }
}
