//! Year × category content counts.

use crate::types::CleanedCatalog;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Count matrix indexed by (year, category).
///
/// Years are ascending and categories sorted lexicographically. Every
/// (year, category) combination has a cell; absent combinations hold 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAggregate {
    pub years: Vec<i32>,
    pub categories: Vec<String>,
    /// `counts[i][j]` is the count for `years[i]` and `categories[j]`.
    pub counts: Vec<Vec<usize>>,
}

impl YearlyAggregate {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Count for one cell, 0 when the year or category is not present.
    pub fn count(&self, year: i32, category: &str) -> usize {
        let Ok(row) = self.years.binary_search(&year) else {
            return 0;
        };
        self.categories
            .iter()
            .position(|c| c == category)
            .map(|col| self.counts[row][col])
            .unwrap_or(0)
    }

    /// Sum of all cells.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Per-year totals, in year order.
    pub fn year_totals(&self) -> Vec<(i32, usize)> {
        self.years
            .iter()
            .zip(&self.counts)
            .map(|(year, row)| (*year, row.iter().sum()))
            .collect()
    }

    /// Per-category totals, in category order.
    pub fn category_totals(&self) -> Vec<(String, usize)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(col, category)| {
                let total = self.counts.iter().map(|row| row[col]).sum();
                (category.clone(), total)
            })
            .collect()
    }

    /// Largest single-year total, used to scale the stacked chart.
    pub fn max_year_total(&self) -> usize {
        self.year_totals()
            .into_iter()
            .map(|(_, total)| total)
            .max()
            .unwrap_or(0)
    }

    /// View restricted to years `>= floor`. Categories are kept even when
    /// all of their remaining cells are 0.
    pub fn since(&self, floor: i32) -> YearlyAggregate {
        let start = self.years.partition_point(|year| *year < floor);
        YearlyAggregate {
            years: self.years[start..].to_vec(),
            categories: self.categories.clone(),
            counts: self.counts[start..].to_vec(),
        }
    }
}

/// Groups cleaned rows by release year and category.
pub struct TemporalAggregator;

impl TemporalAggregator {
    /// Build the full (unrestricted) aggregate. Rows without a year are
    /// skipped.
    pub fn aggregate(catalog: &CleanedCatalog) -> YearlyAggregate {
        let mut grouped: BTreeMap<(i32, &str), usize> = BTreeMap::new();
        let mut categories: BTreeSet<&str> = BTreeSet::new();
        let mut years: BTreeSet<i32> = BTreeSet::new();

        for row in catalog {
            let Some(year) = row.year_added else {
                continue;
            };
            *grouped.entry((year, row.category.as_str())).or_insert(0) += 1;
            categories.insert(row.category.as_str());
            years.insert(year);
        }

        let categories: Vec<String> = categories.into_iter().map(String::from).collect();
        let years: Vec<i32> = years.into_iter().collect();
        let counts: Vec<Vec<usize>> = years
            .iter()
            .map(|year| {
                categories
                    .iter()
                    .map(|category| {
                        grouped
                            .get(&(*year, category.as_str()))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        debug!(
            "Aggregated {} years x {} categories",
            years.len(),
            categories.len()
        );

        YearlyAggregate {
            years,
            categories,
            counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::CatalogCleaner;
    use crate::types::CatalogRow;
    use pretty_assertions::assert_eq;

    fn catalog(rows: &[(&str, Option<&str>)]) -> CleanedCatalog {
        let raw = rows
            .iter()
            .map(|(category, date)| CatalogRow::new(Some(*category), *date, Some("US"), None))
            .collect();
        CatalogCleaner::default().clean(raw).0
    }

    fn sample() -> CleanedCatalog {
        catalog(&[
            ("Movie", Some("1/1/2005")),
            ("Movie", Some("3/4/2019")),
            ("TV Show", Some("5/6/2019")),
            ("Movie", Some("7/8/2019")),
            ("TV Show", Some("1/2/2020")),
            ("Movie", None),
            ("TV Show", Some("garbage")),
        ])
    }

    #[test]
    fn test_matrix_layout() {
        let agg = TemporalAggregator::aggregate(&sample());

        assert_eq!(agg.years, vec![2005, 2019, 2020]);
        assert_eq!(agg.categories, vec!["Movie".to_string(), "TV Show".to_string()]);
        assert_eq!(agg.counts, vec![vec![1, 0], vec![2, 1], vec![0, 1]]);
    }

    #[test]
    fn test_cells_match_row_counts() {
        let catalog = sample();
        let agg = TemporalAggregator::aggregate(&catalog);

        for year in &agg.years {
            for category in &agg.categories {
                let expected = catalog
                    .iter()
                    .filter(|r| r.year_added == Some(*year) && &r.category == category)
                    .count();
                assert_eq!(agg.count(*year, category), expected);
            }
        }

        let dated = catalog.iter().filter(|r| r.year_added.is_some()).count();
        assert_eq!(agg.total(), dated);
    }

    #[test]
    fn test_since_restricts_view_only() {
        let full = TemporalAggregator::aggregate(&sample());
        let view = full.since(2008);

        assert_eq!(view.years, vec![2019, 2020]);
        assert_eq!(view.total(), 4);
        assert_eq!(full.total(), 5);
        assert_eq!(view.count(2005, "Movie"), 0);
    }

    #[test]
    fn test_since_keeps_categories_without_counts() {
        let full = TemporalAggregator::aggregate(&catalog(&[
            ("TV Show", Some("1/1/2001")),
            ("Movie", Some("1/1/2015")),
        ]));
        let view = full.since(2008);

        assert_eq!(view.categories, vec!["Movie".to_string(), "TV Show".to_string()]);
        assert_eq!(view.counts, vec![vec![1, 0]]);
    }

    #[test]
    fn test_totals() {
        let agg = TemporalAggregator::aggregate(&sample());
        assert_eq!(agg.year_totals(), vec![(2005, 1), (2019, 3), (2020, 1)]);
        assert_eq!(
            agg.category_totals(),
            vec![("Movie".to_string(), 3), ("TV Show".to_string(), 2)]
        );
        assert_eq!(agg.max_year_total(), 3);
    }

    #[test]
    fn test_empty_catalog() {
        let agg = TemporalAggregator::aggregate(&CleanedCatalog::default());
        assert!(agg.is_empty());
        assert_eq!(agg.total(), 0);
        assert_eq!(agg.max_year_total(), 0);
        assert!(agg.since(2008).is_empty());
    }
}
