//! Lookup tables and source column identifiers

use serde::{Deserialize, Serialize};

/// Names of the source columns agreed with the data loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    /// Violation date (ISO-like)
    pub date: String,
    /// Violation time, `HH:MM` or `HH:MM:SS`
    pub time: String,
    /// Administrative district
    pub district: String,
    /// Free-text place description
    pub place: String,
    /// Vehicle make
    pub vehicle: String,
    /// Statute citation
    pub statute: String,
    /// Firm-vs-person flag
    pub firm: String,
    /// Reporting party (training data only)
    pub label: String,
    /// Country of registration (analysis only)
    pub country: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            date: "DATSK".to_string(),
            time: "CASSK".to_string(),
            district: "PRAHA".to_string(),
            place: "MISTOSK".to_string(),
            vehicle: "TOVZN".to_string(),
            statute: "PRAVFOR".to_string(),
            firm: "FIRMA".to_string(),
            label: "OZNAM".to_string(),
            country: "MPZ".to_string(),
        }
    }
}

/// Feature derivation configuration.
///
/// List order is significant: it is the tie-break when several entries
/// match the same text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Word marking a square
    pub square_marker: String,
    /// Word marking a tunnel
    pub tunnel_marker: String,
    /// Arterial roads and highway codes
    pub main_streets: Vec<String>,
    /// Known vehicle brands, in match priority
    pub car_brands: Vec<String>,
    /// Vehicle make meaning "not specified"
    pub unspecified_vehicle: String,
    /// Firm flag value meaning "yes"
    pub firm_marker: String,
    /// Source column identifiers
    pub columns: SourceColumns,
}

const MAIN_STREETS: &[&str] = &[
    "Evropská",
    "Plzeňská",
    "Strakonická",
    "Jižní spojka",
    "Štěrboholská",
    "5. května",
    "Wilsonova",
    "Argentinská",
    "Chodovská",
    "Liberecká",
    "Karlovarská",
    "Sokolovská",
    "Poděbradská",
    "Průmyslová",
    "Veleslavínská",
    "D1",
    "D0",
    "D5",
    "D8",
    "D10",
    "D11",
    "okruh",
    "spojka",
    "radiála",
];

const CAR_BRANDS: &[&str] = &[
    "Škoda",
    "Volkswagen",
    "Hyundai",
    "Toyota",
    "Kia",
    "Peugeot",
    "Dacia",
    "Renault",
    "Ford",
    "Mercedes",
    "BMW",
    "Audi",
    "Volvo",
    "Opel",
    "Mazda",
    "Suzuki",
    "Fiat",
    "Citroën",
    "Seat",
    "Honda",
    "Nissan",
    "IVECO",
    "Land Rover",
    "Porsche",
    "Mitsubishi",
];

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            square_marker: "náměstí".to_string(),
            tunnel_marker: "tunel".to_string(),
            main_streets: MAIN_STREETS.iter().map(|s| s.to_string()).collect(),
            car_brands: CAR_BRANDS.iter().map(|s| s.to_string()).collect(),
            unspecified_vehicle: "Neuvedeno".to_string(),
            firm_marker: "ANO".to_string(),
            columns: SourceColumns::default(),
        }
    }
}
