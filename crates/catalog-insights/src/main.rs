//! CLI entry point for the catalog insights pipeline.

use anyhow::{Result, anyhow};
use catalog_insights::{CatalogError, InsightsConfig, Pipeline, PipelineResult, ReportGenerator};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Catalog cleaning, aggregation and charts",
    long_about = "Cleans a movie/TV-show catalog and reports how content is distributed \
                  over time, genres and countries.\n\n\
                  Without flags the catalog is read from 'Netflix Dataset.csv', or from \
                  'Netflix Dataset.xlsx' when the CSV is absent, and the charts are written \
                  to the current directory.\n\n\
                  EXAMPLES:\n  \
                  # Default sources in the working directory\n  \
                  catalog-insights\n\n  \
                  # Explicit source and output directory\n  \
                  catalog-insights -i data/catalog.csv -o charts/\n\n  \
                  # Machine-readable output only\n  \
                  catalog-insights --json --no-charts"
)]
struct Args {
    /// Primary data source (CSV, or a spreadsheet by extension)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Fallback data source, read only when the primary does not exist
    #[arg(long)]
    fallback: Option<PathBuf>,

    /// Output directory for charts and reports
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Earliest year shown in the yearly distribution
    #[arg(long)]
    year_floor: Option<i32>,

    /// Number of genres and countries to rank
    #[arg(long)]
    top_k: Option<usize>,

    /// Skip rendering the chart images
    #[arg(long)]
    no_charts: bool,

    /// Output JSON to stdout instead of the human-readable summary
    ///
    /// Disables all logs and status lines; only the final JSON report is printed.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Only show errors and the final result
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Merge the optional config file with command-line overrides.
fn resolve_config(args: &Args) -> Result<InsightsConfig> {
    let base = match &args.config {
        Some(path) => InsightsConfig::from_json_file(path)?,
        None => InsightsConfig::default(),
    };

    let mut builder = base.to_builder();
    if let Some(input) = &args.input {
        builder = builder.primary_source(input);
    }
    if let Some(fallback) = &args.fallback {
        builder = builder.fallback_source(fallback);
    }
    if let Some(output) = &args.output {
        builder = builder.output_dir(output);
    }
    if let Some(year) = args.year_floor {
        builder = builder.year_floor(year);
    }
    if let Some(k) = args.top_k {
        builder = builder.top_k(k);
    }
    if args.no_charts {
        builder = builder.render_charts(false);
    }

    Ok(builder.build()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = resolve_config(&args)?;
    let output_dir = config.output_dir.clone();

    let pipeline = Pipeline::builder()
        .config(config)
        .console_output(!args.json)
        .build()?;

    match pipeline.run() {
        Ok(result) => handle_pipeline_output(&result, &output_dir, &args),
        Err(e) => {
            report_failure(&e, args.json)?;
            Err(anyhow!("Pipeline failed: {}", e))
        }
    }
}

/// Tell the user why the run could not start.
fn report_failure(err: &CatalogError, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(err)?);
        return Ok(());
    }

    error!("Pipeline failed: {}", err);

    match err {
        CatalogError::DataSourceNotFound { primary, fallback } => {
            println!("\n--- FATAL ERROR: DATA FILE NOT FOUND ---");
            println!("Please ensure the data file is in the working directory.");
            println!(
                "It must be named EITHER '{}' OR '{}'.",
                primary.display(),
                fallback.display()
            );
        }
        other => println!("An error occurred during file loading: {}", other),
    }
    Ok(())
}

/// Handle pipeline output based on CLI flags.
///
/// Output behavior:
/// - Default: status lines and summary block were already printed by the pipeline
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Write JSON report to file
fn handle_pipeline_output(result: &PipelineResult, output_dir: &Path, args: &Args) -> Result<()> {
    let report = ReportGenerator::build_report(result);

    if args.json {
        println!("{}", ReportGenerator::to_json(&report)?);
    }

    if args.emit_report {
        let input_stem = extract_file_stem(&result.source);
        let generator = ReportGenerator::new(output_dir);
        let report_path = generator.write_report_to_file(&report, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    for chart in &result.charts {
        info!("Chart written to: {}", chart.display());
    }

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
