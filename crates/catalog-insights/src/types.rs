use crate::aggregate::YearlyAggregate;
use crate::loader::SourceFormat;
use crate::reporting::ContentSummary;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Column holding the top-level classification ("Movie" / "TV Show").
pub const CATEGORY_COLUMN: &str = "Category";
/// Column holding the raw release date string.
pub const RELEASE_DATE_COLUMN: &str = "Release_Date";
/// Column holding the comma-joined list of countries.
pub const COUNTRY_COLUMN: &str = "Country";
/// Column holding the comma-joined list of genres.
pub const TYPE_COLUMN: &str = "Type";

/// Columns every catalog source must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    CATEGORY_COLUMN,
    RELEASE_DATE_COLUMN,
    COUNTRY_COLUMN,
    TYPE_COLUMN,
];

pub const MOVIE_CATEGORY: &str = "Movie";
pub const TV_SHOW_CATEGORY: &str = "TV Show";

/// One content item as read from the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub category: Option<String>,
    pub release_date: Option<String>,
    pub country: Option<String>,
    /// The `Type` column: comma-joined genres.
    pub genres: Option<String>,
}

impl CatalogRow {
    pub fn new(
        category: Option<&str>,
        release_date: Option<&str>,
        country: Option<&str>,
        genres: Option<&str>,
    ) -> Self {
        Self {
            category: category.map(String::from),
            release_date: release_date.map(String::from),
            country: country.map(String::from),
            genres: genres.map(String::from),
        }
    }
}

/// A catalog row after cleaning.
///
/// `category` and `country` are no longer optional: rows without a category
/// were dropped and missing countries carry the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedRow {
    pub category: String,
    pub release_date: Option<String>,
    pub date_added: Option<NaiveDate>,
    pub year_added: Option<i32>,
    pub country: String,
    pub genres: Option<String>,
}

impl CleanedRow {
    pub fn is_movie(&self) -> bool {
        self.category == MOVIE_CATEGORY
    }

    pub fn is_tv_show(&self) -> bool {
        self.category == TV_SHOW_CATEGORY
    }
}

/// The cleaned table every downstream stage reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedCatalog {
    rows: Vec<CleanedRow>,
}

impl CleanedCatalog {
    pub fn new(rows: Vec<CleanedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CleanedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanedRow> {
        self.rows.iter()
    }

    /// Raw `Type` values, in row order.
    pub fn genre_values(&self) -> impl Iterator<Item = Option<&str>> {
        self.rows.iter().map(|row| row.genres.as_deref())
    }

    /// `Country` values (sentinel included), in row order.
    pub fn country_values(&self) -> impl Iterator<Item = Option<&str>> {
        self.rows.iter().map(|row| Some(row.country.as_str()))
    }
}

impl<'a> IntoIterator for &'a CleanedCatalog {
    type Item = &'a CleanedRow;
    type IntoIter = std::slice::Iter<'a, CleanedRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// One entry of a top-K ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

impl TokenCount {
    pub fn new(token: impl Into<String>, count: usize) -> Self {
        Self {
            token: token.into(),
            count,
        }
    }
}

// ============================================================================
// Pipeline Output
// ============================================================================

/// Everything a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Source the rows were read from.
    pub source: PathBuf,
    pub format: SourceFormat,
    pub rows_loaded: usize,
    pub rows_after_cleaning: usize,
    pub cleaning_actions: Vec<String>,
    /// Earliest year kept in `yearly`.
    pub year_floor: i32,
    /// Year x category counts restricted to `year_floor` and later.
    pub yearly: YearlyAggregate,
    pub top_genres: Vec<TokenCount>,
    pub top_countries: Vec<TokenCount>,
    pub summary: ContentSummary,
    /// Chart images that were written.
    pub charts: Vec<PathBuf>,
    /// Non-fatal problems, such as charts that failed to render.
    pub warnings: Vec<String>,
    pub duration_ms: u64,
}
