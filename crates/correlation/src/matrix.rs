//! Pearson Correlation Matrix

use serde::Serialize;

/// Pearson correlation coefficient of two equally long series.
///
/// NaN when the series are shorter than two values, differ in length, or
/// either has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;

    for (&a, &b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return f64::NAN;
    }

    (covariance / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Square matrix of pairwise correlations between named numeric columns
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of columns
    pub fn compute(columns: &[(String, Vec<f64>)]) -> Self {
        let values = columns
            .iter()
            .map(|(_, x)| columns.iter().map(|(_, y)| pearson(x, y)).collect())
            .collect();

        Self {
            columns: columns.iter().map(|(name, _)| name.clone()).collect(),
            values,
        }
    }

    /// Column names, shared by rows and columns
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Matrix rows aligned with [`CorrelationMatrix::columns`]
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}
