//! Catalog Insights Library
//!
//! Batch cleaning, aggregation and charting for movie/TV-show catalogs.
//!
//! # Overview
//!
//! A run reads one catalog table and produces three chart images plus a
//! console summary:
//!
//! - **Loading**: primary CSV source with a spreadsheet fallback
//! - **Cleaning**: release date parsing, missing-country sentinel, dropping
//!   rows without a category
//! - **Yearly distribution**: year x category counts from a configurable floor
//! - **Rankings**: top genres and top contributing countries
//! - **Summary**: movie and TV show totals and their ratio
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use catalog_insights::{InsightsConfig, Pipeline};
//!
//! // Defaults: "Netflix Dataset.csv", falling back to "Netflix Dataset.xlsx"
//! let result = Pipeline::builder().build()?.run()?;
//!
//! // Custom sources, no charts
//! let config = InsightsConfig::builder()
//!     .primary_source("data/catalog.csv")
//!     .fallback_source("data/catalog.xlsx")
//!     .render_charts(false)
//!     .build()?;
//!
//! let result = Pipeline::builder()
//!     .config(config)
//!     .console_output(false)
//!     .build()?
//!     .run()?;
//!
//! for entry in &result.top_genres {
//!     println!("{}: {}", entry.token, entry.count);
//! }
//! ```
//!
//! # Errors
//!
//! Only a missing or unreadable data source fails a run
//! ([`CatalogError::is_fatal`]). Bad dates become nulls and charts that
//! cannot be rendered are reported in [`PipelineResult::warnings`].

pub mod aggregate;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregate::{FrequencyTable, SplitMode, TemporalAggregator, Tokenizer, YearlyAggregate};
pub use cleaner::{CatalogCleaner, parse_release_date};
pub use config::{ConfigValidationError, InsightsConfig, InsightsConfigBuilder};
pub use error::{CatalogError, Result as CatalogResult};
pub use loader::{CatalogLoader, LoadedCatalog, SourceFormat, load_source};
pub use pipeline::{CatalogInsights, Pipeline, PipelineBuilder};
pub use reporting::{ChartRenderer, ContentSummary, InsightsReport, RenderLog, ReportGenerator};
pub use types::{CatalogRow, CleanedCatalog, CleanedRow, PipelineResult, TokenCount};
pub use utils::{TextEncoding, decode_text, is_null_marker};
