//! CSV reading through polars.

use crate::types::{
    CATEGORY_COLUMN, COUNTRY_COLUMN, CatalogRow, RELEASE_DATE_COLUMN, TYPE_COLUMN,
};
use crate::utils::{decode_text, normalize_cell};
use anyhow::{Result, anyhow};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Read a CSV catalog.
///
/// Every column is read as a string so raw date text reaches the cleaner
/// unchanged.
pub(crate) fn read_csv(path: &Path) -> Result<Vec<CatalogRow>> {
    let bytes = std::fs::read(path)?;
    let (text, encoding) = decode_text(bytes);
    debug!("Decoded {} as {}", path.display(), encoding);

    let text = match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .into_reader_with_file_handle(Cursor::new(text))
        .finish()?;

    debug!("CSV shape: {:?}", df.shape());
    rows_from_frame(&df)
}

/// Convert a frame holding the required columns into catalog rows.
///
/// Extra columns are ignored. Null markers become `None`.
pub(crate) fn rows_from_frame(df: &DataFrame) -> Result<Vec<CatalogRow>> {
    let categories = string_column(df, CATEGORY_COLUMN)?;
    let release_dates = string_column(df, RELEASE_DATE_COLUMN)?;
    let countries = string_column(df, COUNTRY_COLUMN)?;
    let genres = string_column(df, TYPE_COLUMN)?;

    let rows = categories
        .into_iter()
        .zip(release_dates)
        .zip(countries)
        .zip(genres)
        .map(|(((category, release_date), country), genres)| CatalogRow {
            category,
            release_date,
            country,
            genres,
        })
        .collect();

    Ok(rows)
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| anyhow!("missing required column '{}'", name))?;
    let series = column.as_materialized_series().cast(&DataType::String)?;
    let values = series.str()?.into_iter().map(normalize_cell).collect();
    Ok(values)
}
