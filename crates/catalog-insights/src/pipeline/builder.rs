//! Main insights pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the load, clean, aggregate and report workflow.

use crate::aggregate::{TemporalAggregator, YearlyAggregate, top_countries, top_genres};
use crate::cleaner::CatalogCleaner;
use crate::config::InsightsConfig;
use crate::error::{CatalogError, Result};
use crate::loader::{CatalogLoader, LoadedCatalog};
use crate::reporting::{ChartRenderer, ContentSummary, RenderLog};
use crate::types::{CatalogRow, CleanedCatalog, PipelineResult, TokenCount};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};

/// Aggregates computed from a cleaned catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogInsights {
    /// Year x category counts over every year present.
    pub yearly_full: YearlyAggregate,
    /// `yearly_full` restricted to the configured year floor.
    pub yearly: YearlyAggregate,
    pub top_genres: Vec<TokenCount>,
    pub top_countries: Vec<TokenCount>,
    pub summary: ContentSummary,
}

/// The catalog insights pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use catalog_insights::{InsightsConfig, Pipeline};
///
/// let result = Pipeline::builder()
///     .config(InsightsConfig::builder().render_charts(false).build()?)
///     .console_output(false)
///     .build()?
///     .run()?;
///
/// println!("{} titles after cleaning", result.rows_after_cleaning);
/// ```
pub struct Pipeline {
    config: InsightsConfig,
    cleaner: CatalogCleaner,
    renderer: Option<ChartRenderer>,
    console_output: bool,
}

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Locate and load the catalog, then process it.
    ///
    /// # Errors
    ///
    /// Fails with `CatalogError::DataSourceNotFound` when neither source
    /// exists and `CatalogError::DataSourceReadError` when the chosen source
    /// cannot be read. Nothing after loading can fail the run.
    pub fn run(&self) -> Result<PipelineResult> {
        let start_time = Instant::now();
        info!("Starting catalog insights pipeline...");

        info!("Step 1: Loading catalog...");
        let loader = CatalogLoader::new(
            &self.config.primary_source,
            &self.config.fallback_source,
        );
        let loaded = loader.load().inspect_err(|e| error!("Pipeline error: {}", e))?;

        self.say(&format!(
            "Successfully loaded data from {} ({} format).",
            loaded.source.display(),
            loaded.format.display_name()
        ));

        Ok(self.process_loaded(loaded, start_time))
    }

    /// Process rows that were already loaded.
    pub fn process(&self, loaded: LoadedCatalog) -> PipelineResult {
        self.process_loaded(loaded, Instant::now())
    }

    /// Compute every aggregate for raw rows without writing anything.
    pub fn analyze(&self, rows: Vec<CatalogRow>) -> CatalogInsights {
        let (catalog, _) = self.cleaner.clean(rows);
        self.aggregate(&catalog, None)
    }

    fn process_loaded(&self, loaded: LoadedCatalog, start_time: Instant) -> PipelineResult {
        let rows_loaded = loaded.rows.len();

        info!("Step 2: Cleaning catalog...");
        let (catalog, cleaning_actions) = self.cleaner.clean(loaded.rows);
        debug!("{} rows remain after cleaning", catalog.len());

        if self.renderer.is_none() {
            info!("Chart rendering disabled");
        }
        let mut charts = RenderLog::default();
        let insights = self.aggregate(&catalog, Some(&mut charts));

        if self.console_output {
            insights.summary.print();
        }

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Pipeline completed in {}ms", duration_ms);

        PipelineResult {
            source: loaded.source,
            format: loaded.format,
            rows_loaded,
            rows_after_cleaning: catalog.len(),
            cleaning_actions,
            year_floor: self.config.year_floor,
            yearly: insights.yearly,
            top_genres: insights.top_genres,
            top_countries: insights.top_countries,
            summary: insights.summary,
            charts: charts.written,
            warnings: charts.warnings,
            duration_ms,
        }
    }

    /// Run the three analysis stages in order. With a log, each stage's
    /// chart is rendered as soon as the stage is done.
    fn aggregate(
        &self,
        catalog: &CleanedCatalog,
        mut charts: Option<&mut RenderLog>,
    ) -> CatalogInsights {
        let k = self.config.top_k;

        self.say("\n--- 1. Analyzing Content Distribution Over Time ---");
        info!("Step 3: Aggregating content per year...");
        let yearly_full = TemporalAggregator::aggregate(catalog);
        let yearly = yearly_full.since(self.config.year_floor);
        debug!(
            "Yearly view covers {} of {} years (floor {})",
            yearly.years.len(),
            yearly_full.years.len(),
            self.config.year_floor
        );
        self.render(charts.as_deref_mut(), |r| r.render_timeline(&yearly));

        self.say(&format!("--- 2. Identifying Top {} Genres ---", k));
        info!("Step 4: Ranking genres...");
        let genres = top_genres(catalog, k);
        self.render(charts.as_deref_mut(), |r| r.render_genres(&genres));

        self.say("--- 3. Comparing Country Contributions ---");
        info!("Step 5: Ranking countries...");
        let countries = top_countries(catalog, &self.config.missing_sentinel, k);
        self.render(charts, |r| r.render_countries(&countries));

        CatalogInsights {
            yearly_full,
            yearly,
            top_genres: genres,
            top_countries: countries,
            summary: ContentSummary::from_catalog(catalog),
        }
    }

    fn render<F>(&self, charts: Option<&mut RenderLog>, draw: F)
    where
        F: FnOnce(&ChartRenderer) -> Result<PathBuf>,
    {
        if let (Some(charts), Some(renderer)) = (charts, &self.renderer) {
            charts.record(draw(renderer));
        }
    }

    /// Print a status line for the user.
    fn say(&self, line: &str) {
        if self.console_output {
            println!("{}", line);
        }
    }
}

/// Builder for creating a [`Pipeline`] with custom configuration.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<InsightsConfig>,
    console_output: Option<bool>,
}

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: InsightsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Print stage headers and the summary block to stdout (default: true).
    pub fn console_output(mut self, enabled: bool) -> Self {
        self.console_output = Some(enabled);
        self
    }

    /// Build the pipeline.
    ///
    /// Returns `CatalogError::InvalidConfig` if the configuration is invalid.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;

        let renderer = config
            .render_charts
            .then(|| ChartRenderer::new(config.output_dir.clone(), config.top_k));
        let cleaner = CatalogCleaner::new(config.missing_sentinel.clone());

        Ok(Pipeline {
            config,
            cleaner,
            renderer,
            console_output: self.console_output.unwrap_or(true),
        })
    }
}
