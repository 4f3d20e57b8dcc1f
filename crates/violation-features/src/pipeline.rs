//! Feature pipeline
//!
//! Single source of truth for feature derivation. The frozen output and the
//! analysis path both go through [`FeaturePipeline::derive`].

use crate::brand::BrandClassifier;
use crate::config::FeatureConfig;
use crate::district::normalize_district;
use crate::error::{FeatureError, Result};
use crate::place::PlaceClassifier;
use crate::statute::StatuteParser;
use crate::table::{ColumnLayout, FeatureRecord, FeatureTable, RawRecord, RawTable};
use crate::temporal::{parse_date, TemporalFeatures, MISSING_HOUR};
use tracing::{debug, info};

/// Everything derived from one raw row.
///
/// `features` is the frozen-schema row; the remaining fields are only
/// consumed by diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedRecord {
    pub features: FeatureRecord,
    pub temporal: TemporalFeatures,
    /// Country of registration as recorded, if the column exists
    pub country: Option<String>,
}

/// Applies every transform to a raw table in a fixed order
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    config: FeatureConfig,
    place: PlaceClassifier,
    brand: BrandClassifier,
    statute: StatuteParser,
}

impl FeaturePipeline {
    /// Build a pipeline from explicit lookup tables
    pub fn new(config: FeatureConfig) -> Result<Self> {
        Ok(Self {
            place: PlaceClassifier::from_config(&config),
            brand: BrandClassifier::from_config(&config),
            statute: StatuteParser::new()?,
            config,
        })
    }

    /// Resolve the source columns of a table
    pub fn layout(&self, table: &RawTable) -> Result<ColumnLayout> {
        ColumnLayout::resolve(table, &self.config.columns)
    }

    /// Derive all features of one row.
    ///
    /// Only an invalid date is an error; every other field falls back to
    /// its transform's default.
    pub fn derive(&self, row: usize, record: &RawRecord<'_>) -> Result<DerivedRecord> {
        let date = record
            .date
            .and_then(parse_date)
            .ok_or_else(|| FeatureError::InvalidDate {
                row,
                value: record.date.map(str::to_string),
            })?;

        let temporal = TemporalFeatures::extract(date, record.time);

        let features = FeatureRecord {
            season: temporal.season,
            day_time: temporal.day_time,
            prague_district: normalize_district(record.district),
            place_type: self.place.classify(record.place),
            car_brand: self.brand.classify(record.vehicle),
            law_code: self.statute.parse(record.statute),
            is_firm: self.firm_flag(record.firm),
            label: record.label.map(str::to_string),
        };

        Ok(DerivedRecord {
            features,
            temporal,
            country: record.country.map(str::to_string),
        })
    }

    /// Derive every row of a table, failing on the first structural error
    pub fn derive_all(&self, table: &RawTable) -> Result<(ColumnLayout, Vec<DerivedRecord>)> {
        let layout = self.layout(table)?;
        let derived = table
            .rows()
            .iter()
            .enumerate()
            .map(|(row, cells)| self.derive(row, &layout.record(cells)))
            .collect::<Result<Vec<_>>>()?;

        let missing_time = derived
            .iter()
            .filter(|d| d.temporal.hour == MISSING_HOUR)
            .count();
        debug!(
            "Derived {} rows, {} without a usable time",
            derived.len(),
            missing_time
        );

        Ok((layout, derived))
    }

    /// Produce the frozen feature table; the input table is left untouched
    pub fn process(&self, table: &RawTable) -> Result<FeatureTable> {
        let (layout, derived) = self.derive_all(table)?;
        info!(
            "Processed {} violation rows (label column: {})",
            derived.len(),
            layout.has_label()
        );

        Ok(FeatureTable::new(
            derived.into_iter().map(|d| d.features).collect(),
            layout.has_label(),
        ))
    }

    fn firm_flag(&self, value: Option<&str>) -> u8 {
        u8::from(value == Some(self.config.firm_marker.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::CarBrand;
    use crate::place::PlaceType;
    use crate::statute::LawCode;
    use crate::table::FeatureValue;
    use crate::temporal::{DayTime, Season};

    const HEADER: [&str; 8] = [
        "DATSK", "CASSK", "PRAHA", "MISTOSK", "TOVZN", "PRAVFOR", "FIRMA", "OZNAM",
    ];

    fn row(cells: [Option<&str>; 8]) -> Vec<Option<String>> {
        cells.iter().map(|c| c.map(str::to_string)).collect()
    }

    fn sample_table() -> RawTable {
        let mut table = RawTable::new(HEADER);
        table
            .push_row(row([
                Some("2024-01-15"),
                Some("07:30:00"),
                Some("praha 5"),
                Some("Karlovo náměstí"),
                Some("ŠKODA FABIA"),
                Some("§ 125c odst. 1 písm. k)"),
                Some("ANO"),
                Some("MPP"),
            ]))
            .unwrap();
        table
            .push_row(row([
                Some("2024-07-06"),
                None,
                Some("Praha - Řeporyje"),
                None,
                Some("Neuvedeno"),
                None,
                Some("NE"),
                Some("PČR"),
            ]))
            .unwrap();
        table
    }

    #[test]
    fn test_process_frozen_values() {
        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        let output = pipeline.process(&sample_table()).unwrap();
        assert_eq!(output.len(), 2);
        assert!(output.has_label());

        let first = &output.records()[0];
        assert_eq!(first.season, Season::Winter);
        assert_eq!(first.day_time, DayTime::Morning);
        assert_eq!(first.prague_district, "Praha 5");
        assert_eq!(first.place_type, PlaceType::Square);
        assert_eq!(first.car_brand, CarBrand::Known("Škoda".to_string()));
        assert_eq!(first.law_code.to_string(), "125c/k");
        assert_eq!(first.is_firm, 1);
        assert_eq!(first.label.as_deref(), Some("MPP"));

        let second = &output.records()[1];
        assert_eq!(second.season, Season::Summer);
        assert_eq!(second.day_time, DayTime::None);
        assert_eq!(second.prague_district, "Praha - Ostatní");
        assert_eq!(second.place_type, PlaceType::Other);
        assert_eq!(second.car_brand, CarBrand::Unspecified);
        assert_eq!(second.law_code, LawCode::Other);
        assert_eq!(second.is_firm, 0);
    }

    #[test]
    fn test_rows_follow_column_order() {
        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        let output = pipeline.process(&sample_table()).unwrap();
        let rows = output.rows();
        assert_eq!(rows[0].len(), output.columns().len());
        assert_eq!(rows[0][0], FeatureValue::Text("winter".to_string()));
        assert_eq!(rows[0][6], FeatureValue::Flag(1));
        assert_eq!(rows[0][7], FeatureValue::Text("MPP".to_string()));
    }

    #[test]
    fn test_label_absent_from_output_when_absent_from_input() {
        let mut table = RawTable::new(HEADER[..7].iter().copied());
        table
            .push_row(row([
                Some("2024-03-01"),
                Some("12:00"),
                Some("Praha 1"),
                Some("Evropská"),
                Some("Tesla"),
                Some("16"),
                None,
                None,
            ])[..7]
                .to_vec())
            .unwrap();

        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        let output = pipeline.process(&table).unwrap();
        assert!(!output.has_label());
        assert_eq!(output.columns().len(), 7);
        assert_eq!(output.rows()[0].len(), 7);
        assert_eq!(output.records()[0].is_firm, 0);
        assert_eq!(output.records()[0].car_brand, CarBrand::Other);
    }

    #[test]
    fn test_missing_mandatory_column_is_fatal() {
        let table = RawTable::new(vec!["DATSK", "CASSK", "PRAHA", "MISTOSK", "TOVZN", "FIRMA"]);
        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        let err = pipeline.process(&table).unwrap_err();
        assert!(matches!(err, FeatureError::MissingColumn(ref name) if name == "PRAVFOR"));
    }

    #[test]
    fn test_missing_time_and_place_columns_are_fatal() {
        let mut table = RawTable::new(vec!["DATSK", "PRAHA", "TOVZN", "PRAVFOR", "FIRMA"]);
        table
            .push_row(vec![
                Some("2024-01-01".into()),
                Some("Praha 5".into()),
                Some("Kia".into()),
                Some("§ 4".into()),
                Some("NE".into()),
            ])
            .unwrap();
        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        let err = pipeline.process(&table).unwrap_err();
        assert!(matches!(err, FeatureError::MissingColumn(ref name) if name == "CASSK"));
    }

    #[test]
    fn test_invalid_date_is_fatal() {
        let mut table = sample_table();
        table
            .push_row(row([
                Some("not a date"),
                Some("10:00"),
                None,
                None,
                None,
                None,
                None,
                None,
            ]))
            .unwrap();
        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        let err = pipeline.process(&table).unwrap_err();
        assert!(matches!(err, FeatureError::InvalidDate { row: 2, .. }));
    }

    #[test]
    fn test_input_table_unchanged() {
        let table = sample_table();
        let before = table.clone();
        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        pipeline.process(&table).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_firm_flag_exact_match() {
        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        assert_eq!(pipeline.firm_flag(Some("ANO")), 1);
        assert_eq!(pipeline.firm_flag(Some("ano")), 0);
        assert_eq!(pipeline.firm_flag(Some("NE")), 0);
        assert_eq!(pipeline.firm_flag(Some("")), 0);
        assert_eq!(pipeline.firm_flag(None), 0);
    }
}
