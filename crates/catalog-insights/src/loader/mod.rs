//! Catalog loading.
//!
//! A run reads exactly one source: the primary when it exists, otherwise the
//! fallback. When neither exists the run cannot start. The format of a
//! source is decided by its extension:
//! - `.xlsx`, `.xlsm`, `.xls`, `.ods` are read as spreadsheets (first sheet)
//! - everything else is read as CSV

mod csv;
mod spreadsheet;

use crate::error::{CatalogError, Result};
use crate::types::CatalogRow;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk format of a catalog source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xls" | "ods") => Self::Spreadsheet,
            _ => Self::Csv,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Spreadsheet => "Excel",
        }
    }
}

/// Rows read from a source, together with where they came from.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub source: PathBuf,
    pub format: SourceFormat,
    pub rows: Vec<CatalogRow>,
}

/// Loads the catalog from a primary source with a single fallback.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    primary: PathBuf,
    fallback: PathBuf,
}

impl CatalogLoader {
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }

    /// Pick the source to read: the primary if it exists, else the fallback.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DataSourceNotFound` naming both paths when
    /// neither exists.
    pub fn resolve(&self) -> Result<&Path> {
        if self.primary.exists() {
            return Ok(&self.primary);
        }

        debug!(
            "Primary source {} not found, trying {}",
            self.primary.display(),
            self.fallback.display()
        );

        if self.fallback.exists() {
            return Ok(&self.fallback);
        }

        Err(CatalogError::DataSourceNotFound {
            primary: self.primary.clone(),
            fallback: self.fallback.clone(),
        })
    }

    /// Resolve and read the catalog.
    pub fn load(&self) -> Result<LoadedCatalog> {
        let source = self.resolve()?;
        load_source(source)
    }
}

/// Read one source, choosing the reader by extension.
///
/// Any failure, including IO errors, is reported as
/// `CatalogError::DataSourceReadError` for that path.
pub fn load_source(path: &Path) -> Result<LoadedCatalog> {
    let format = SourceFormat::from_path(path);
    debug!("Reading {} as {}", path.display(), format.display_name());

    let rows = match format {
        SourceFormat::Csv => csv::read_csv(path),
        SourceFormat::Spreadsheet => spreadsheet::read_spreadsheet(path),
    }
    .map_err(|e| CatalogError::read_error(path, format!("{:#}", e)))?;

    info!(
        "Successfully loaded data from {} ({} format): {} rows",
        path.display(),
        format.display_name(),
        rows.len()
    );

    Ok(LoadedCatalog {
        source: path.to_path_buf(),
        format,
        rows,
    })
}
