//! Rare-category collapsing
//!
//! Frequencies are computed over the exact column being collapsed and are
//! dropped afterwards, so two runs over different datasets may collapse
//! different values.

use crate::error::{FeatureError, Result};
use std::collections::HashMap;
use tracing::debug;

/// Relative frequency of each observed value within one column
#[derive(Debug, Clone, Default)]
pub struct CategoryFrequencyTable {
    /// Distinct values in first-seen order with their counts
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
    /// Number of non-missing values
    total: usize,
}

impl CategoryFrequencyTable {
    /// Count the non-missing values of a column
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut table = Self::default();
        for value in values.into_iter().flatten() {
            match table.index.get(value) {
                Some(&slot) => table.counts[slot].1 += 1,
                None => {
                    table.index.insert(value.to_string(), table.counts.len());
                    table.counts.push((value.to_string(), 1));
                }
            }
            table.total += 1;
        }
        table
    }

    /// Number of non-missing values counted
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn count(&self, value: &str) -> usize {
        self.index
            .get(value)
            .map(|&slot| self.counts[slot].1)
            .unwrap_or(0)
    }

    /// Relative frequency of a value; 0.0 when unseen or the column is empty
    pub fn frequency(&self, value: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(value) as f64 / self.total as f64
    }

    /// Values with their relative frequencies, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        let total = self.total as f64;
        self.counts
            .iter()
            .map(move |(value, count)| (value.as_str(), *count as f64 / total))
    }
}

/// Replaces values at or below a relative-frequency threshold with a catch-all label
#[derive(Debug, Clone)]
pub struct RareCategoryCollapser {
    threshold: f64,
    catch_all: String,
}

impl RareCategoryCollapser {
    /// Create a collapser; `threshold` must lie in `[0, 1)`
    pub fn new(threshold: f64, catch_all: &str) -> Result<Self> {
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            return Err(FeatureError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            catch_all: catch_all.to_string(),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn catch_all(&self) -> &str {
        &self.catch_all
    }

    /// Whether a value survives collapsing under the given frequencies
    pub fn keeps(&self, frequencies: &CategoryFrequencyTable, value: &str) -> bool {
        frequencies.frequency(value) > self.threshold
    }

    /// Collapse a column against its own frequencies.
    ///
    /// Missing values do not count towards the frequencies and come out as
    /// the catch-all label.
    pub fn collapse<S: AsRef<str>>(&self, column: &[Option<S>]) -> Vec<String> {
        let frequencies = CategoryFrequencyTable::from_values(column.iter().map(cell));

        let mut collapsed = 0usize;
        let output = column
            .iter()
            .map(|value| match cell(value) {
                Some(value) if self.keeps(&frequencies, value) => value.to_string(),
                _ => {
                    collapsed += 1;
                    self.catch_all.clone()
                }
            })
            .collect();

        debug!(
            "Collapsed {} of {} values ({} distinct) at threshold {}",
            collapsed,
            column.len(),
            frequencies.len(),
            self.threshold
        );
        output
    }
}

fn cell<S: AsRef<str>>(value: &Option<S>) -> Option<&str> {
    value.as_ref().map(|v| v.as_ref())
}
