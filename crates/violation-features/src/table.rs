//! Raw input table and frozen feature output

use crate::brand::CarBrand;
use crate::config::SourceColumns;
use crate::error::{FeatureError, Result};
use crate::place::PlaceType;
use crate::statute::LawCode;
use crate::temporal::{DayTime, Season};
use serde::{Deserialize, Serialize};

/// In-memory table of raw violation rows, one citation per row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Create an empty table with the given header
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; its width must match the header
    pub fn push_row(&mut self, row: Vec<Option<String>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(FeatureError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Borrowed view of the fields of one raw row that the pipeline consumes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub date: Option<&'a str>,
    pub time: Option<&'a str>,
    pub district: Option<&'a str>,
    pub place: Option<&'a str>,
    pub vehicle: Option<&'a str>,
    pub statute: Option<&'a str>,
    pub firm: Option<&'a str>,
    pub label: Option<&'a str>,
    pub country: Option<&'a str>,
}

/// Column positions resolved once per run
#[derive(Debug, Clone, Copy)]
pub struct ColumnLayout {
    date: usize,
    time: usize,
    district: usize,
    place: usize,
    vehicle: usize,
    statute: usize,
    firm: usize,
    label: Option<usize>,
    country: Option<usize>,
}

impl ColumnLayout {
    /// Resolve the source columns; any missing mandatory column is fatal.
    ///
    /// Only the label and country columns may be absent.
    pub fn resolve(table: &RawTable, names: &SourceColumns) -> Result<Self> {
        let required = |name: &str| {
            table
                .column_index(name)
                .ok_or_else(|| FeatureError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            date: required(&names.date)?,
            time: required(&names.time)?,
            district: required(&names.district)?,
            place: required(&names.place)?,
            vehicle: required(&names.vehicle)?,
            statute: required(&names.statute)?,
            firm: required(&names.firm)?,
            label: table.column_index(&names.label),
            country: table.column_index(&names.country),
        })
    }

    /// Whether the label column is present
    pub fn has_label(&self) -> bool {
        self.label.is_some()
    }

    /// Whether the country column is present
    pub fn has_country(&self) -> bool {
        self.country.is_some()
    }

    /// View one raw row through this layout
    pub fn record<'a>(&self, row: &'a [Option<String>]) -> RawRecord<'a> {
        let cell = move |index: usize| row.get(index).and_then(|v| v.as_deref());
        RawRecord {
            date: cell(self.date),
            time: cell(self.time),
            district: cell(self.district),
            place: cell(self.place),
            vehicle: cell(self.vehicle),
            statute: cell(self.statute),
            firm: cell(self.firm),
            label: self.label.and_then(cell),
            country: self.country.and_then(cell),
        }
    }
}

/// Columns of the frozen output schema, in contract order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    Season,
    DayTime,
    PragueDistrict,
    PlaceType,
    CarBrand,
    LawCode,
    IsFirm,
}

impl FeatureColumn {
    /// The frozen column order
    pub const FROZEN: [FeatureColumn; 7] = [
        FeatureColumn::Season,
        FeatureColumn::DayTime,
        FeatureColumn::PragueDistrict,
        FeatureColumn::PlaceType,
        FeatureColumn::CarBrand,
        FeatureColumn::LawCode,
        FeatureColumn::IsFirm,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureColumn::Season => "SEASON",
            FeatureColumn::DayTime => "DAY_TIME",
            FeatureColumn::PragueDistrict => "PRAGUE_DISTRICT",
            FeatureColumn::PlaceType => "PLACE_TYPE",
            FeatureColumn::CarBrand => "CAR_BRAND",
            FeatureColumn::LawCode => "LAW_CODE",
            FeatureColumn::IsFirm => "IS_FIRM",
        }
    }
}

/// Name of the optional label column in the output
pub const LABEL_COLUMN: &str = "LABEL";

/// One cell of the feature table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Text(String),
    Flag(u8),
    Missing,
}

/// One row of the frozen schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRecord {
    pub season: Season,
    pub day_time: DayTime,
    pub prague_district: String,
    pub place_type: PlaceType,
    pub car_brand: CarBrand,
    pub law_code: LawCode,
    /// 1 when the offender is a firm
    pub is_firm: u8,
    /// Reporting party, training data only
    pub label: Option<String>,
}

impl FeatureRecord {
    /// Value of a frozen column as a string token
    pub fn text(&self, column: FeatureColumn) -> String {
        match column {
            FeatureColumn::Season => self.season.as_str().to_string(),
            FeatureColumn::DayTime => self.day_time.as_str().to_string(),
            FeatureColumn::PragueDistrict => self.prague_district.clone(),
            FeatureColumn::PlaceType => self.place_type.as_str().to_string(),
            FeatureColumn::CarBrand => self.car_brand.as_str().to_string(),
            FeatureColumn::LawCode => self.law_code.to_string(),
            FeatureColumn::IsFirm => self.is_firm.to_string(),
        }
    }

    /// Value of a frozen column as a table cell
    pub fn value(&self, column: FeatureColumn) -> FeatureValue {
        match column {
            FeatureColumn::IsFirm => FeatureValue::Flag(self.is_firm),
            other => FeatureValue::Text(self.text(other)),
        }
    }
}

/// Output of the pipeline: frozen columns plus an optional label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureTable {
    records: Vec<FeatureRecord>,
    has_label: bool,
}

impl FeatureTable {
    pub fn new(records: Vec<FeatureRecord>, has_label: bool) -> Self {
        Self { records, has_label }
    }

    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    pub fn has_label(&self) -> bool {
        self.has_label
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names in contract order
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> =
            FeatureColumn::FROZEN.iter().map(FeatureColumn::name).collect();
        if self.has_label {
            columns.push(LABEL_COLUMN);
        }
        columns
    }

    /// Cells of every row, aligned with [`FeatureTable::columns`]
    pub fn rows(&self) -> Vec<Vec<FeatureValue>> {
        self.records
            .iter()
            .map(|record| {
                let mut row: Vec<FeatureValue> = FeatureColumn::FROZEN
                    .iter()
                    .map(|&column| record.value(column))
                    .collect();
                if self.has_label {
                    row.push(match &record.label {
                        Some(label) => FeatureValue::Text(label.clone()),
                        None => FeatureValue::Missing,
                    });
                }
                row
            })
            .collect()
    }
}

impl Serialize for FeatureTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("FeatureTable", 2)?;
        state.serialize_field("columns", &self.columns())?;
        state.serialize_field("rows", &self.rows())?;
        state.end()
    }
}
