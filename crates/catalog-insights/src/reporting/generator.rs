use crate::aggregate::YearlyAggregate;
use crate::error::{CatalogError, Result};
use crate::loader::SourceFormat;
use crate::reporting::ContentSummary;
use crate::types::{PipelineResult, TokenCount};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Report Types
// ============================================================================

/// Machine-readable report of one run.
///
/// Used for both JSON output (`--json`) and file writing (`--emit-report`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsReport {
    // Metadata
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path of the source that was actually read
    pub input_file: String,
    pub input_format: SourceFormat,

    /// Row counts, timing and warnings
    pub processing_summary: ProcessingSummaryReport,
    /// Cleaning actions performed
    pub cleaning_actions: Vec<String>,

    pub content_summary: ContentSummary,
    pub yearly_distribution: YearlyDistribution,
    pub top_genres: Vec<TokenCount>,
    pub top_countries: Vec<TokenCount>,

    /// Chart images written during the run
    pub charts: Vec<String>,
}

/// Processing figures for the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingSummaryReport {
    pub duration_ms: u64,
    pub rows_loaded: usize,
    pub rows_after_cleaning: usize,
    pub rows_removed: usize,
    pub rows_removed_percent: f32,
    pub warnings: Vec<String>,
}

/// The reported year window of the yearly aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyDistribution {
    pub year_floor: i32,
    #[serde(flatten)]
    pub counts: YearlyAggregate,
    /// Titles per year across all categories.
    pub year_totals: Vec<(i32, usize)>,
}

// ============================================================================
// Generator
// ============================================================================

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Build a report from pipeline results.
    pub fn build_report(result: &PipelineResult) -> InsightsReport {
        let rows_removed = result.rows_loaded.saturating_sub(result.rows_after_cleaning);
        let rows_removed_percent = if result.rows_loaded > 0 {
            (rows_removed as f32 / result.rows_loaded as f32) * 100.0
        } else {
            0.0
        };

        InsightsReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: result.source.display().to_string(),
            input_format: result.format,
            processing_summary: ProcessingSummaryReport {
                duration_ms: result.duration_ms,
                rows_loaded: result.rows_loaded,
                rows_after_cleaning: result.rows_after_cleaning,
                rows_removed,
                rows_removed_percent,
                warnings: result.warnings.clone(),
            },
            cleaning_actions: result.cleaning_actions.clone(),
            content_summary: result.summary,
            yearly_distribution: YearlyDistribution {
                year_floor: result.year_floor,
                counts: result.yearly.clone(),
                year_totals: result.yearly.year_totals(),
            },
            top_genres: result.top_genres.clone(),
            top_countries: result.top_countries.clone(),
            charts: result
                .charts
                .iter()
                .map(|path| path.display().to_string())
                .collect(),
        }
    }

    /// Serialize a report as pretty-printed JSON.
    pub fn to_json(report: &InsightsReport) -> Result<String> {
        serde_json::to_string_pretty(report)
            .map_err(|e| CatalogError::ReportGenerationFailed(e.to_string()))
    }

    /// Write `<base_name>_report.json` into the output directory.
    pub fn write_report_to_file(&self, report: &InsightsReport, base_name: &str) -> Result<PathBuf> {
        let json = Self::to_json(report)?;
        let report_path = self.output_dir.join(format!("{}_report.json", base_name));

        let write = || -> std::io::Result<()> {
            fs::create_dir_all(&self.output_dir)?;
            let mut file = File::create(&report_path)?;
            file.write_all(json.as_bytes())
        };
        write().map_err(|e| {
            CatalogError::ReportGenerationFailed(format!("{}: {}", report_path.display(), e))
        })?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
