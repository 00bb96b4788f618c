//! Configuration types for the catalog insights pipeline.
//!
//! Every field has a default that reproduces a plain run in the current
//! directory, so a config only needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default primary data source (CSV).
pub const DEFAULT_PRIMARY_SOURCE: &str = "Netflix Dataset.csv";

/// Default fallback data source (spreadsheet).
pub const DEFAULT_FALLBACK_SOURCE: &str = "Netflix Dataset.xlsx";

/// Earliest year shown in the yearly distribution report.
pub const DEFAULT_YEAR_FLOOR: i32 = 2008;

/// Number of entries kept by the genre and country rankings.
pub const DEFAULT_TOP_K: usize = 10;

/// Placeholder substituted for a missing country.
pub const MISSING_SENTINEL: &str = "Missing";

/// Configuration for the insights pipeline.
///
/// Use [`InsightsConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_insights::config::InsightsConfig;
///
/// let config = InsightsConfig::builder()
///     .primary_source("data/catalog.csv")
///     .output_dir("charts")
///     .top_k(5)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    /// Source loaded when it exists.
    /// Default: "Netflix Dataset.csv"
    pub primary_source: PathBuf,

    /// Source loaded only when the primary is absent.
    /// Default: "Netflix Dataset.xlsx"
    pub fallback_source: PathBuf,

    /// Directory the chart images and JSON report are written to.
    /// Default: "."
    pub output_dir: PathBuf,

    /// Years before this are left out of the yearly distribution view.
    /// Default: 2008
    pub year_floor: i32,

    /// Length of the genre and country rankings.
    /// Default: 10
    pub top_k: usize,

    /// Value written into empty `Country` cells and excluded from the
    /// country ranking.
    /// Default: "Missing"
    pub missing_sentinel: String,

    /// Whether to render the three chart images.
    /// Default: true
    pub render_charts: bool,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            primary_source: PathBuf::from(DEFAULT_PRIMARY_SOURCE),
            fallback_source: PathBuf::from(DEFAULT_FALLBACK_SOURCE),
            output_dir: PathBuf::from("."),
            year_floor: DEFAULT_YEAR_FLOOR,
            top_k: DEFAULT_TOP_K,
            missing_sentinel: MISSING_SENTINEL.to_string(),
            render_charts: true,
        }
    }
}

impl InsightsConfig {
    /// Create a new configuration builder.
    pub fn builder() -> InsightsConfigBuilder {
        InsightsConfigBuilder::default()
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing fields take their default values. The result is validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: InsightsConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| crate::error::CatalogError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Convert this configuration back into a builder, e.g. to apply
    /// command-line overrides on top of a config file.
    pub fn to_builder(&self) -> InsightsConfigBuilder {
        InsightsConfigBuilder {
            primary_source: Some(self.primary_source.clone()),
            fallback_source: Some(self.fallback_source.clone()),
            output_dir: Some(self.output_dir.clone()),
            year_floor: Some(self.year_floor),
            top_k: Some(self.top_k),
            missing_sentinel: Some(self.missing_sentinel.clone()),
            render_charts: Some(self.render_charts),
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK(self.top_k));
        }

        if self.missing_sentinel.trim().is_empty() {
            return Err(ConfigValidationError::EmptySentinel);
        }

        if self.primary_source.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptySourcePath(
                "primary_source".to_string(),
            ));
        }

        if self.fallback_source.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptySourcePath(
                "fallback_source".to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top_k: {0} (must be at least 1)")]
    InvalidTopK(usize),

    #[error("Missing-value sentinel must not be empty")]
    EmptySentinel,

    #[error("Source path '{0}' must not be empty")]
    EmptySourcePath(String),
}

/// Builder for [`InsightsConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct InsightsConfigBuilder {
    primary_source: Option<PathBuf>,
    fallback_source: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    year_floor: Option<i32>,
    top_k: Option<usize>,
    missing_sentinel: Option<String>,
    render_charts: Option<bool>,
}

impl InsightsConfigBuilder {
    /// Set the primary data source.
    pub fn primary_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.primary_source = Some(path.into());
        self
    }

    /// Set the fallback data source, used only when the primary is absent.
    pub fn fallback_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_source = Some(path.into());
        self
    }

    /// Set the output directory for charts and reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the earliest year shown in the yearly distribution.
    pub fn year_floor(mut self, year: i32) -> Self {
        self.year_floor = Some(year);
        self
    }

    /// Set the number of entries kept by the rankings.
    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Set the placeholder used for missing countries.
    pub fn missing_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.missing_sentinel = Some(sentinel.into());
        self
    }

    /// Enable or disable chart rendering.
    pub fn render_charts(mut self, render: bool) -> Self {
        self.render_charts = Some(render);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `InsightsConfig` or an error if validation fails.
    pub fn build(self) -> Result<InsightsConfig, ConfigValidationError> {
        let config = InsightsConfig {
            primary_source: self
                .primary_source
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PRIMARY_SOURCE)),
            fallback_source: self
                .fallback_source
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FALLBACK_SOURCE)),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            year_floor: self.year_floor.unwrap_or(DEFAULT_YEAR_FLOOR),
            top_k: self.top_k.unwrap_or(DEFAULT_TOP_K),
            missing_sentinel: self
                .missing_sentinel
                .unwrap_or_else(|| MISSING_SENTINEL.to_string()),
            render_charts: self.render_charts.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InsightsConfig::default();
        assert_eq!(config.primary_source, PathBuf::from("Netflix Dataset.csv"));
        assert_eq!(config.fallback_source, PathBuf::from("Netflix Dataset.xlsx"));
        assert_eq!(config.year_floor, 2008);
        assert_eq!(config.top_k, 10);
        assert_eq!(config.missing_sentinel, "Missing");
        assert!(config.render_charts);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = InsightsConfig::builder()
            .primary_source("a.csv")
            .fallback_source("b.xlsx")
            .output_dir("out")
            .year_floor(2015)
            .top_k(3)
            .render_charts(false)
            .build()
            .unwrap();

        assert_eq!(config.primary_source, PathBuf::from("a.csv"));
        assert_eq!(config.fallback_source, PathBuf::from("b.xlsx"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.year_floor, 2015);
        assert_eq!(config.top_k, 3);
        assert!(!config.render_charts);
    }

    #[test]
    fn test_validation_rejects_zero_top_k() {
        let result = InsightsConfig::builder().top_k(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidTopK(0)
        ));
    }

    #[test]
    fn test_validation_rejects_blank_sentinel() {
        let result = InsightsConfig::builder().missing_sentinel("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptySentinel
        ));
    }

    #[test]
    fn test_to_builder_keeps_values() {
        let config = InsightsConfig::builder().top_k(4).build().unwrap();
        let rebuilt = config.to_builder().year_floor(2019).build().unwrap();
        assert_eq!(rebuilt.top_k, 4);
        assert_eq!(rebuilt.year_floor, 2019);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "output_dir": "charts", "top_k": 5 }"#;
        let config: InsightsConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("charts"));
        assert_eq!(config.top_k, 5);
        assert_eq!(config.year_floor, 2008);
        assert_eq!(config.missing_sentinel, "Missing");
    }

    #[test]
    fn test_from_json_file_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "top_k": 0 }"#).unwrap();

        let err = InsightsConfig::from_json_file(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }
}
