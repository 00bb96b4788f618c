//! Data cleaning for the raw catalog.
//!
//! This module provides:
//! - Release date parsing into `date_added` / `year_added`
//! - Sentinel substitution for missing countries
//! - Dropping rows without a category
//!
//! Nothing else is normalized: duplicates, whitespace in `Category` and
//! out-of-range dates are left alone.

mod dates;

pub use dates::parse_release_date;

use crate::config::MISSING_SENTINEL;
use crate::types::{CatalogRow, CleanedCatalog, CleanedRow};
use chrono::Datelike;
use tracing::{debug, info};

/// Cleaner turning raw catalog rows into a [`CleanedCatalog`].
#[derive(Debug, Clone)]
pub struct CatalogCleaner {
    missing_sentinel: String,
}

impl Default for CatalogCleaner {
    fn default() -> Self {
        Self::new(MISSING_SENTINEL)
    }
}

impl CatalogCleaner {
    pub fn new(missing_sentinel: impl Into<String>) -> Self {
        Self {
            missing_sentinel: missing_sentinel.into(),
        }
    }

    /// Clean the catalog.
    ///
    /// Returns the cleaned catalog along with human-readable descriptions of
    /// what was changed. Never fails: bad dates become `None`.
    pub fn clean(&self, rows: Vec<CatalogRow>) -> (CleanedCatalog, Vec<String>) {
        info!("Cleaning {} catalog rows...", rows.len());

        let before = rows.len();
        let mut cleaning_actions = Vec::new();
        let mut countries_filled = 0usize;
        let mut dates_unparsed = 0usize;

        let cleaned: Vec<CleanedRow> = rows
            .into_iter()
            .filter_map(|row| {
                let date_added = row.release_date.as_deref().and_then(parse_release_date);
                if row.release_date.is_some() && date_added.is_none() {
                    dates_unparsed += 1;
                }

                let country = match row.country {
                    Some(country) => country,
                    None => {
                        countries_filled += 1;
                        self.missing_sentinel.clone()
                    }
                };

                // Category is the classification axis and cannot be imputed
                let category = row.category?;

                Some(CleanedRow {
                    category,
                    release_date: row.release_date,
                    date_added,
                    year_added: date_added.map(|d| d.year()),
                    country,
                    genres: row.genres,
                })
            })
            .collect();

        if dates_unparsed > 0 {
            cleaning_actions.push(format!(
                "Set {} unparseable release dates to null",
                dates_unparsed
            ));
        }

        if countries_filled > 0 {
            cleaning_actions.push(format!(
                "Filled {} missing countries with '{}'",
                countries_filled, self.missing_sentinel
            ));
        }

        let dropped = before - cleaned.len();
        if dropped > 0 {
            let pct = (dropped as f64 / before as f64) * 100.0;
            cleaning_actions.push(format!(
                "Removed {} rows with missing Category ({:.1}%)",
                dropped, pct
            ));
        } else {
            cleaning_actions.push("No rows with missing Category found".to_string());
        }

        for action in &cleaning_actions {
            debug!("{}", action);
        }

        (CleanedCatalog::new(cleaned), cleaning_actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scenario_rows() -> Vec<CatalogRow> {
        vec![
            CatalogRow::new(Some("Movie"), Some("1/1/2020"), None, Some("Drama, Comedy")),
            CatalogRow::new(Some("TV Show"), Some("bad-date"), Some("India"), Some("Drama")),
            CatalogRow::new(None, Some("1/1/2021"), Some("USA"), Some("Action")),
        ]
    }

    #[test]
    fn test_scenario_cleaning() {
        let (catalog, _) = CatalogCleaner::default().clean(scenario_rows());
        let rows = catalog.rows();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].country, "Missing");
        assert_eq!(rows[0].date_added, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(rows[0].year_added, Some(2020));
        assert_eq!(rows[1].date_added, None);
        assert_eq!(rows[1].year_added, None);
        assert_eq!(rows[1].country, "India");
    }

    #[test]
    fn test_year_matches_date() {
        let rows = vec![
            CatalogRow::new(Some("Movie"), Some("August 14, 2018"), Some("Spain"), None),
            CatalogRow::new(Some("Movie"), None, Some("Spain"), None),
        ];
        let (catalog, _) = CatalogCleaner::default().clean(rows);

        for row in &catalog {
            match row.date_added {
                Some(date) => assert_eq!(row.year_added, Some(date.year())),
                None => assert_eq!(row.year_added, None),
            }
        }
        assert_eq!(catalog.rows()[0].year_added, Some(2018));
    }

    #[test]
    fn test_category_whitespace_untouched() {
        let rows = vec![CatalogRow::new(Some(" Movie"), None, None, None)];
        let (catalog, _) = CatalogCleaner::default().clean(rows);
        assert_eq!(catalog.rows()[0].category, " Movie");
    }

    #[test]
    fn test_custom_sentinel() {
        let rows = vec![CatalogRow::new(Some("Movie"), None, None, None)];
        let (catalog, _) = CatalogCleaner::new("Unknown").clean(rows);
        assert_eq!(catalog.rows()[0].country, "Unknown");
    }

    #[test]
    fn test_cleaning_actions_reported() {
        let (_, actions) = CatalogCleaner::default().clean(scenario_rows());
        assert!(actions.iter().any(|a| a.contains("1 unparseable release dates")));
        assert!(actions.iter().any(|a| a.contains("Removed 1 rows with missing Category")));
    }

    #[test]
    fn test_empty_input() {
        let (catalog, actions) = CatalogCleaner::default().clean(Vec::new());
        assert!(catalog.is_empty());
        assert_eq!(actions, vec!["No rows with missing Category found".to_string()]);
    }
}
