//! Place-type classification

use crate::config::FeatureConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse type of the violation location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceType {
    Square,
    Tunnel,
    MainStreet,
    Other,
}

impl PlaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceType::Square => "square",
            PlaceType::Tunnel => "tunnel",
            PlaceType::MainStreet => "main_street",
            PlaceType::Other => "other",
        }
    }
}

impl fmt::Display for PlaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, first-match-wins place classifier.
///
/// Priority: square marker, tunnel marker, then main streets in list order.
#[derive(Debug, Clone)]
pub struct PlaceClassifier {
    square_marker: String,
    tunnel_marker: String,
    main_streets: Vec<String>,
}

impl PlaceClassifier {
    /// Create a classifier from explicit lookup tables
    pub fn new(square_marker: &str, tunnel_marker: &str, main_streets: &[String]) -> Self {
        Self {
            square_marker: square_marker.to_lowercase(),
            tunnel_marker: tunnel_marker.to_lowercase(),
            main_streets: main_streets.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    /// Create a classifier from the feature configuration
    pub fn from_config(config: &FeatureConfig) -> Self {
        Self::new(
            &config.square_marker,
            &config.tunnel_marker,
            &config.main_streets,
        )
    }

    /// Classify a place description; missing text is `Other`
    pub fn classify(&self, text: Option<&str>) -> PlaceType {
        let Some(text) = text else {
            return PlaceType::Other;
        };
        let text = text.to_lowercase();

        if text.contains(&self.square_marker) {
            PlaceType::Square
        } else if text.contains(&self.tunnel_marker) {
            PlaceType::Tunnel
        } else if self.main_streets.iter().any(|street| text.contains(street)) {
            PlaceType::MainStreet
        } else {
            PlaceType::Other
        }
    }
}

impl Default for PlaceClassifier {
    fn default() -> Self {
        Self::from_config(&FeatureConfig::default())
    }
}
