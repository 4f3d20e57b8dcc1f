//! Layered settings: defaults, optional file, then `VIOLATIONS__*` variables

use config::{Config, ConfigError, Environment, File};
use correlation::ProjectorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use violation_features::FeatureConfig;

/// Runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Feature lookup tables and source column names
    pub features: FeatureConfig,
    /// Correlation diagnostics
    pub analysis: ProjectorConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            features: FeatureConfig::default(),
            analysis: ProjectorConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings; a given file must exist
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder
            .add_source(Environment::with_prefix("VIOLATIONS").separator("__"))
            .build()?
            .try_deserialize()
    }
}
