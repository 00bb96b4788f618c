//! Spreadsheet reading through calamine. Only the first worksheet is read,
//! and its first row is the header.

use crate::types::{CatalogRow, REQUIRED_COLUMNS};
use crate::utils::normalize_cell;
use anyhow::{Result, anyhow};
use calamine::{Data, DataType, Reader, open_workbook_auto};
use std::path::Path;
use tracing::debug;

pub(crate) fn read_spreadsheet(path: &Path) -> Result<Vec<CatalogRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook has no worksheets"))??;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| anyhow!("worksheet is empty"))?;
    let headers: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();

    let mut indices = [0usize; 4];
    for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("missing required column '{}'", name))?;
    }
    let [category, release_date, country, genres] = indices;

    let catalog: Vec<CatalogRow> = rows
        .map(|row| CatalogRow {
            category: cell_text(row.get(category)),
            release_date: cell_text(row.get(release_date)),
            country: cell_text(row.get(country)),
            genres: cell_text(row.get(genres)),
        })
        .collect();

    debug!("Read {} rows from first worksheet", catalog.len());
    Ok(catalog)
}

/// Render a cell as the text the cleaner expects. Date cells are written in
/// ISO form so the date parser can read them back.
fn cell_text(cell: Option<&Data>) -> Option<String> {
    let cell = cell?;
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.clone(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()?
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        other => other.to_string(),
    };
    normalize_cell(Some(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(None), None);
        assert_eq!(cell_text(Some(&Data::Empty)), None);
        assert_eq!(
            cell_text(Some(&Data::String("TV Show".to_string()))),
            Some("TV Show".to_string())
        );
        assert_eq!(cell_text(Some(&Data::String("N/A".to_string()))), None);
        assert_eq!(cell_text(Some(&Data::Int(2019))), Some("2019".to_string()));
    }

    #[test]
    fn test_cell_text_iso_datetime() {
        let cell = Data::DateTimeIso("2021-09-25T00:00:00".to_string());
        assert_eq!(cell_text(Some(&cell)), Some("2021-09-25 00:00:00".to_string()));
    }
}
