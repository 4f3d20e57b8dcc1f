//! Violation Feature Engine
//!
//! Deterministic normalization of raw traffic-violation records into the
//! frozen categorical schema consumed by the violation classifier.

mod brand;
mod collapse;
mod config;
mod district;
mod error;
mod pipeline;
mod place;
mod statute;
mod table;
mod temporal;

pub use brand::{BrandClassifier, CarBrand, OTHER_BRAND, UNSPECIFIED_BRAND};
pub use collapse::{CategoryFrequencyTable, RareCategoryCollapser};
pub use config::{FeatureConfig, SourceColumns};
pub use district::{normalize_district, OTHER_DISTRICT};
pub use error::{FeatureError, Result};
pub use pipeline::{DerivedRecord, FeaturePipeline};
pub use place::{PlaceClassifier, PlaceType};
pub use statute::{LawCode, StatuteParser, StatuteToken, OTHER_LAW};
pub use table::{
    ColumnLayout, FeatureColumn, FeatureRecord, FeatureTable, FeatureValue, RawRecord, RawTable,
    LABEL_COLUMN,
};
pub use temporal::{
    is_workday, parse_date, parse_hour, DayTime, Season, TemporalFeatures, MISSING_HOUR,
};
