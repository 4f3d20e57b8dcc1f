//! Label Encoding
//!
//! Immutable value-to-code bijection built once per column per run.

use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Codes assigned to the distinct values of one column in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEncoding {
    values: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelEncoding {
    /// Build the mapping from a column
    pub fn fit<I, S>(column: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut encoding = Self::default();
        for value in column {
            encoding.assign(value.as_ref());
        }
        encoding
    }

    /// Build the mapping and encode the same column with it.
    ///
    /// Codes are assigned in the same pass, so the output is always as long
    /// as the input.
    pub fn fit_transform<S: AsRef<str>>(column: &[S]) -> (Self, Vec<usize>) {
        let mut encoding = Self::default();
        let codes = column
            .iter()
            .map(|value| encoding.assign(value.as_ref()))
            .collect();
        (encoding, codes)
    }

    fn assign(&mut self, value: &str) -> usize {
        if let Some(&code) = self.index.get(value) {
            return code;
        }
        let code = self.values.len();
        self.index.insert(value.to_string(), code);
        self.values.push(value.to_string());
        code
    }

    /// Code of a value, if it was seen while fitting
    pub fn code(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Value behind a code
    pub fn value(&self, code: usize) -> Option<&str> {
        self.values.get(code).map(String::as_str)
    }

    /// Distinct values ordered by code
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for LabelEncoding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_codes() {
        let column = ["jablko", "banán", "hruška", "jablko"];
        let (encoding, codes) = LabelEncoding::fit_transform(&column);
        assert_eq!(codes, vec![0, 1, 2, 0]);
        assert_eq!(encoding.values(), ["jablko", "banán", "hruška"]);
        assert_eq!(encoding.len(), 3);
    }

    #[test]
    fn test_bijection() {
        let encoding = LabelEncoding::fit(["MPP", "PČR", "MPP"]);
        for (code, value) in encoding.values().iter().enumerate() {
            assert_eq!(encoding.code(value), Some(code));
            assert_eq!(encoding.value(code), Some(value.as_str()));
        }
        assert_eq!(encoding.code("unknown"), None);
        assert_eq!(encoding.value(2), None);
    }

    #[test]
    fn test_codes_align_with_input() {
        let column = vec!["", "x", "", "y", "x"];
        let (encoding, codes) = LabelEncoding::fit_transform(&column);
        assert_eq!(codes.len(), column.len());
        for (value, code) in column.iter().zip(&codes) {
            assert_eq!(encoding.value(*code), Some(*value));
        }
    }

    #[test]
    fn test_empty_column() {
        let column: Vec<String> = Vec::new();
        let (encoding, codes) = LabelEncoding::fit_transform(&column);
        assert!(encoding.is_empty());
        assert!(codes.is_empty());
    }
}
