//! Aggregations over the cleaned catalog: the year × category matrix and
//! token rankings for genres and countries.

mod tokenizer;
mod yearly;

pub use tokenizer::{FrequencyTable, SplitMode, Tokenizer};
pub use yearly::{TemporalAggregator, YearlyAggregate};

use crate::types::{CleanedCatalog, TokenCount};

/// Top `k` genres, most frequent first.
pub fn top_genres(catalog: &CleanedCatalog, k: usize) -> Vec<TokenCount> {
    Tokenizer::genres().count(catalog.genre_values()).top(k)
}

/// Top `k` countries, most frequent first. Rows whose country equals
/// `sentinel` are skipped.
pub fn top_countries(catalog: &CleanedCatalog, sentinel: &str, k: usize) -> Vec<TokenCount> {
    Tokenizer::countries(sentinel)
        .count(catalog.country_values())
        .top(k)
}
