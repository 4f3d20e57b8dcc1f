//! Correlation Projector
//!
//! Analysis-only consumer of the feature pipeline. It adds diagnostic
//! columns, collapses rare categories and label-encodes everything on its own
//! copy; the frozen feature table it returns is the pipeline's, untouched.

use crate::encoding::LabelEncoding;
use crate::matrix::CorrelationMatrix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};
use violation_features::{
    DerivedRecord, FeaturePipeline, FeatureTable, RareCategoryCollapser, RawTable, Result,
};

/// Column order of the correlation matrix
pub const CORRELATION_COLUMNS: [&str; 13] = [
    "YEAR",
    "MONTH_NUM",
    "HOUR",
    "WORKDAY",
    "SEASON",
    "DAY_TIME",
    "PRAGUE_DISTRICT",
    "PLACE_TYPE",
    "COUNTRY",
    "CAR_BRAND",
    "IS_FIRM",
    "LAW_CODE",
    "WHO_RAW",
];

/// Projector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Collapse threshold for vehicle brands
    pub brand_threshold: f64,
    /// Collapse threshold for statute codes
    pub law_threshold: f64,
    /// Collapse threshold for countries of registration
    pub country_threshold: f64,
    /// Label replacing collapsed values
    pub catch_all: String,
    /// Fill for a missing country or reporting party
    pub missing_fill: String,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            brand_threshold: 0.01,
            law_threshold: 0.001,
            country_threshold: 0.001,
            catch_all: "OTHER".to_string(),
            missing_fill: "UNKNOWN".to_string(),
        }
    }
}

/// Result of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Frozen-schema output, identical to [`FeaturePipeline::process`]
    pub features: FeatureTable,
    /// Pearson matrix over the encoded diagnostic columns
    pub matrix: CorrelationMatrix,
    /// Encodings of the categorical columns, by column name
    pub encodings: BTreeMap<String, LabelEncoding>,
    /// Encoded diagnostic columns in matrix order
    #[serde(skip)]
    encoded: Vec<(String, Vec<f64>)>,
}

impl AnalysisReport {
    /// Encoded values of one diagnostic column
    pub fn series(&self, column: &str) -> Option<&[f64]> {
        self.encoded
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, values)| values.as_slice())
    }

    /// A categorical column mapped back through its encoding
    pub fn decode(&self, column: &str) -> Option<Vec<&str>> {
        let encoding = self.encodings.get(column)?;
        self.series(column)?
            .iter()
            .map(|&code| encoding.value(code as usize))
            .collect()
    }
}

enum ColumnData {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

/// Builds correlation diagnostics over derived features
#[derive(Debug, Clone)]
pub struct CorrelationProjector {
    config: ProjectorConfig,
    brand: RareCategoryCollapser,
    law: RareCategoryCollapser,
    country: RareCategoryCollapser,
}

impl CorrelationProjector {
    /// Create a projector; thresholds must lie in `[0, 1)`
    pub fn new(config: ProjectorConfig) -> Result<Self> {
        let projector = Self {
            brand: RareCategoryCollapser::new(config.brand_threshold, &config.catch_all)?,
            law: RareCategoryCollapser::new(config.law_threshold, &config.catch_all)?,
            country: RareCategoryCollapser::new(config.country_threshold, &config.catch_all)?,
            config,
        };
        debug!(
            "Collapsing into {:?} at thresholds brand={} law={} country={}",
            projector.brand.catch_all(),
            projector.brand.threshold(),
            projector.law.threshold(),
            projector.country.threshold()
        );
        Ok(projector)
    }

    /// Run the pipeline over a table and correlate the result
    pub fn analyze(&self, pipeline: &FeaturePipeline, table: &RawTable) -> Result<AnalysisReport> {
        let (layout, derived) = pipeline.derive_all(table)?;
        info!(
            "Analyzing {} violation rows (label column: {}, country column: {})",
            derived.len(),
            layout.has_label(),
            layout.has_country()
        );

        let features = FeatureTable::new(
            derived.iter().map(|d| d.features.clone()).collect(),
            layout.has_label(),
        );
        let (encoded, encodings) = self.encode(&derived, layout.has_label(), layout.has_country());

        Ok(AnalysisReport {
            features,
            matrix: CorrelationMatrix::compute(&encoded),
            encodings,
            encoded,
        })
    }

    /// Encode derived rows into numeric series in [`CORRELATION_COLUMNS`] order.
    ///
    /// `WHO_RAW` and `COUNTRY` take part only when their source columns exist.
    pub fn encode(
        &self,
        derived: &[DerivedRecord],
        has_label: bool,
        has_country: bool,
    ) -> (Vec<(String, Vec<f64>)>, BTreeMap<String, LabelEncoding>) {
        let mut columns = self.diagnostic_columns(derived, has_label, has_country);

        let mut encodings = BTreeMap::new();
        let mut series = Vec::with_capacity(columns.len());
        for name in CORRELATION_COLUMNS {
            let Some(data) = columns.remove(name) else {
                continue;
            };
            let values = match data {
                ColumnData::Numeric(values) => values,
                ColumnData::Categorical(values) => {
                    let (encoding, codes) = LabelEncoding::fit_transform(&values);
                    debug!("Encoded {} into {} codes", name, encoding.len());
                    encodings.insert(name.to_string(), encoding);
                    codes.into_iter().map(|code| code as f64).collect()
                }
            };
            series.push((name.to_string(), values));
        }

        (series, encodings)
    }

    fn diagnostic_columns(
        &self,
        derived: &[DerivedRecord],
        has_label: bool,
        has_country: bool,
    ) -> BTreeMap<&'static str, ColumnData> {
        let mut columns = BTreeMap::new();
        columns.insert("YEAR", numeric(derived, |d| d.temporal.year as f64));
        columns.insert("MONTH_NUM", numeric(derived, |d| d.temporal.month as f64));
        columns.insert("HOUR", numeric(derived, |d| d.temporal.hour as f64));
        columns.insert("WORKDAY", numeric(derived, |d| d.temporal.workday as f64));
        columns.insert("IS_FIRM", numeric(derived, |d| d.features.is_firm as f64));
        columns.insert("SEASON", text(derived, |d| d.features.season.to_string()));
        columns.insert("DAY_TIME", text(derived, |d| d.features.day_time.to_string()));
        columns.insert("PRAGUE_DISTRICT", text(derived, |d| d.features.prague_district.clone()));
        columns.insert("PLACE_TYPE", text(derived, |d| d.features.place_type.to_string()));

        let brands: Vec<Option<String>> = derived
            .iter()
            .map(|d| Some(d.features.car_brand.to_string()))
            .collect();
        columns.insert("CAR_BRAND", ColumnData::Categorical(self.brand.collapse(&brands)));

        let laws: Vec<Option<String>> = derived
            .iter()
            .map(|d| Some(d.features.law_code.to_string()))
            .collect();
        columns.insert("LAW_CODE", ColumnData::Categorical(self.law.collapse(&laws)));

        if has_country {
            let countries: Vec<Option<String>> = derived
                .iter()
                .map(|d| Some(self.filled(d.country.as_deref())))
                .collect();
            columns.insert("COUNTRY", ColumnData::Categorical(self.country.collapse(&countries)));
        }

        if has_label {
            let labels = derived
                .iter()
                .map(|d| self.filled(d.features.label.as_deref()))
                .collect();
            columns.insert("WHO_RAW", ColumnData::Categorical(labels));
        }

        columns
    }

    fn filled(&self, value: Option<&str>) -> String {
        value.unwrap_or(&self.config.missing_fill).to_string()
    }
}

fn numeric(derived: &[DerivedRecord], f: impl Fn(&DerivedRecord) -> f64) -> ColumnData {
    ColumnData::Numeric(derived.iter().map(f).collect())
}

fn text(derived: &[DerivedRecord], f: impl Fn(&DerivedRecord) -> String) -> ColumnData {
    ColumnData::Categorical(derived.iter().map(f).collect())
}
