//! Reporting module.
//!
//! This module turns pipeline output into things a person or a program reads:
//! the console summary block, the three chart images and the JSON report.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_insights::reporting::{ChartRenderer, RenderLog, ReportGenerator};
//!
//! let renderer = ChartRenderer::new("charts", 10);
//! let mut charts = RenderLog::default();
//! charts.record(renderer.render_timeline(&yearly));
//!
//! let report = ReportGenerator::build_report(&pipeline_result);
//! println!("{}", ReportGenerator::to_json(&report)?);
//! ```

mod charts;
mod generator;
mod summary;

pub use charts::{
    COUNTRIES_CHART_FILE, ChartRenderer, GENRES_CHART_FILE, RenderLog, TIMELINE_CHART_FILE,
};
pub use generator::{InsightsReport, ProcessingSummaryReport, ReportGenerator, YearlyDistribution};
pub use summary::ContentSummary;
