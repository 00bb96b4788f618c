//! Error types for the catalog insights pipeline.
//!
//! Only the two data-source conditions are fatal to a run. Per-row data
//! problems (bad dates, missing optional fields) never surface here; they are
//! absorbed into the data model as nulls or sentinels.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the catalog insights pipeline.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Neither the primary nor the fallback source exists.
    #[error(
        "Data file not found: expected either '{}' or '{}'",
        primary.display(),
        fallback.display()
    )]
    DataSourceNotFound { primary: PathBuf, fallback: PathBuf },

    /// A source exists but could not be read or parsed.
    #[error("Failed to read data source '{}': {reason}", path.display())]
    DataSourceReadError { path: PathBuf, reason: String },

    /// A chart could not be rendered or written.
    #[error("Failed to render chart: {0}")]
    ChartRenderFailed(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Report generation failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Build a read error for `path` from any displayable cause.
    pub fn read_error(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CatalogError::DataSourceReadError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable error code, suitable for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DataSourceNotFound { .. } => "DATA_SOURCE_NOT_FOUND",
            Self::DataSourceReadError { .. } => "DATA_SOURCE_READ_ERROR",
            Self::ChartRenderFailed(_) => "CHART_RENDER_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }

    /// Check if this error terminates a run.
    ///
    /// Only failures to locate or read the data source are fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DataSourceNotFound { .. } | Self::DataSourceReadError { .. }
        )
    }

    /// Check if this error means no data source was found at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DataSourceNotFound { .. })
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CatalogError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CatalogError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
