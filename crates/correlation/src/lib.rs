//! Correlation Diagnostics
//!
//! Label encoding and Pearson correlation over derived violation features.
//! Output is for exploratory analysis only and never feeds back into the
//! frozen feature schema.

mod encoding;
mod matrix;
mod projector;

pub use encoding::LabelEncoding;
pub use matrix::{pearson, CorrelationMatrix};
pub use projector::{AnalysisReport, CorrelationProjector, ProjectorConfig, CORRELATION_COLUMNS};
