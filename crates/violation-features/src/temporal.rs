//! Temporal Feature Extraction
//!
//! Calendar and time-of-day buckets derived from the violation date and the
//! separately recorded violation time.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hour used when the time field is missing or unparseable
pub const MISSING_HOUR: i8 = -1;

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

/// Meteorological season of the violation month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Bucket a calendar month (1-12)
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part of the day the violation happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayTime {
    /// Time was not recorded
    None,
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayTime {
    /// Bucket an hour; [`MISSING_HOUR`] is its own bucket
    pub fn from_hour(hour: i8) -> Self {
        match hour {
            MISSING_HOUR => DayTime::None,
            6..=11 => DayTime::Morning,
            12..=17 => DayTime::Afternoon,
            18..=21 => DayTime::Evening,
            _ => DayTime::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayTime::None => "none",
            DayTime::Morning => "morning",
            DayTime::Afternoon => "afternoon",
            DayTime::Evening => "evening",
            DayTime::Night => "night",
        }
    }
}

impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1 for Monday-Friday (weekday 0-4), 0 for the weekend
pub fn is_workday(weekday: u32) -> u8 {
    if weekday < 5 {
        1
    } else {
        0
    }
}

/// Parse an ISO-like violation date.
///
/// Returns `None` when no accepted layout matches; callers treat that as a
/// broken input contract.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(datetime) = parse_date_time(value) {
        return Some(datetime.date());
    }
    None
}

/// Parse the hour of a violation time leniently.
///
/// Anything unparseable, including a missing or blank field, yields
/// [`MISSING_HOUR`].
pub fn parse_hour(value: Option<&str>) -> i8 {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return MISSING_HOUR;
    };

    let hour = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .map(|time| time.hour())
        .or_else(|| parse_date_time(value).map(|datetime| datetime.hour()));

    match hour {
        Some(hour) => hour as i8,
        None => MISSING_HOUR,
    }
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|datetime| datetime.naive_local())
        })
}

/// Temporal features of one violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalFeatures {
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
    /// 0 = Monday ... 6 = Sunday
    pub weekday: u32,
    /// 0-23, or [`MISSING_HOUR`]
    pub hour: i8,
    pub season: Season,
    pub day_time: DayTime,
    /// 1 on business days
    pub workday: u8,
}

impl TemporalFeatures {
    /// Derive all temporal buckets from a parsed date and a raw time field
    pub fn extract(date: NaiveDate, time: Option<&str>) -> Self {
        let month = date.month();
        let weekday = date.weekday().num_days_from_monday();
        let hour = parse_hour(time);

        Self {
            year: date.year(),
            month,
            weekday,
            hour,
            season: Season::from_month(month),
            day_time: DayTime::from_hour(hour),
            workday: is_workday(weekday),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_season_boundaries() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(9), Season::Autumn);
        assert_eq!(Season::from_month(11), Season::Autumn);
    }

    #[test]
    fn test_day_time_boundaries() {
        assert_eq!(DayTime::from_hour(MISSING_HOUR), DayTime::None);
        assert_eq!(DayTime::from_hour(0), DayTime::Night);
        assert_eq!(DayTime::from_hour(5), DayTime::Night);
        assert_eq!(DayTime::from_hour(6), DayTime::Morning);
        assert_eq!(DayTime::from_hour(12), DayTime::Afternoon);
        assert_eq!(DayTime::from_hour(18), DayTime::Evening);
        assert_eq!(DayTime::from_hour(21), DayTime::Evening);
        assert_eq!(DayTime::from_hour(22), DayTime::Night);
        assert_eq!(DayTime::from_hour(23), DayTime::Night);
    }

    #[test]
    fn test_parse_hour_formats() {
        assert_eq!(parse_hour(Some("07:45")), 7);
        assert_eq!(parse_hour(Some("23:59:59")), 23);
        assert_eq!(parse_hour(Some(" 14:30:00 ")), 14);
        assert_eq!(parse_hour(Some("2024-03-01 18:10:00")), 18);
    }

    #[test]
    fn test_parse_hour_degrades_to_sentinel() {
        assert_eq!(parse_hour(None), MISSING_HOUR);
        assert_eq!(parse_hour(Some("")), MISSING_HOUR);
        assert_eq!(parse_hour(Some("   ")), MISSING_HOUR);
        assert_eq!(parse_hour(Some("25:00")), MISSING_HOUR);
        assert_eq!(parse_hour(Some("noon")), MISSING_HOUR);
    }

    #[test]
    fn test_parse_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 17);
        assert_eq!(parse_date("2024-05-17"), expected);
        assert_eq!(parse_date("2024-05-17 08:00:00"), expected);
        assert_eq!(parse_date("2024-05-17T08:00:00"), expected);
        assert_eq!(parse_date("2024-05-17T08:00:00+02:00"), expected);
        assert_eq!(parse_date("17.5.2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_extract_weekend_morning() {
        // 2024-06-15 is a Saturday
        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let features = TemporalFeatures::extract(date, Some("09:15"));
        assert_eq!(features.year, 2024);
        assert_eq!(features.month, 6);
        assert_eq!(features.weekday, 5);
        assert_eq!(features.workday, 0);
        assert_eq!(features.season, Season::Summer);
        assert_eq!(features.day_time, DayTime::Morning);
    }

    #[test]
    fn test_extract_missing_time() {
        // 2024-01-08 is a Monday
        let date = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
        let features = TemporalFeatures::extract(date, None);
        assert_eq!(features.hour, MISSING_HOUR);
        assert_eq!(features.day_time, DayTime::None);
        assert_eq!(features.workday, 1);
    }

    proptest! {
        #[test]
        fn prop_season_is_total(month in 1u32..=12) {
            let season = Season::from_month(month);
            let expected = match month {
                12 | 1 | 2 => Season::Winter,
                3 | 4 | 5 => Season::Spring,
                6 | 7 | 8 => Season::Summer,
                _ => Season::Autumn,
            };
            prop_assert_eq!(season, expected);
        }

        #[test]
        fn prop_day_time_is_total(hour in -1i8..=23) {
            let bucket = DayTime::from_hour(hour);
            prop_assert_eq!(bucket == DayTime::None, hour == MISSING_HOUR);
            if (6..12).contains(&hour) {
                prop_assert_eq!(bucket, DayTime::Morning);
            } else if (12..18).contains(&hour) {
                prop_assert_eq!(bucket, DayTime::Afternoon);
            } else if (18..22).contains(&hour) {
                prop_assert_eq!(bucket, DayTime::Evening);
            } else if hour != MISSING_HOUR {
                prop_assert_eq!(bucket, DayTime::Night);
            }
        }

        #[test]
        fn prop_parsed_hour_in_range(h in 0u32..24, m in 0u32..60) {
            let text = format!("{:02}:{:02}", h, m);
            prop_assert_eq!(parse_hour(Some(text.as_str())), h as i8);
        }
    }
}
