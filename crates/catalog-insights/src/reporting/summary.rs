use crate::types::CleanedCatalog;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline counts for the cleaned catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentSummary {
    pub total: usize,
    pub movies: usize,
    pub tv_shows: usize,
    /// `movies / tv_shows`, or 0 when there are no TV shows.
    pub ratio: f64,
}

impl ContentSummary {
    pub fn new(total: usize, movies: usize, tv_shows: usize) -> Self {
        Self {
            total,
            movies,
            tv_shows,
            ratio: movie_ratio(movies, tv_shows),
        }
    }

    /// Count rows per category. Categories other than "Movie" and
    /// "TV Show" (including whitespace variants) only add to the total.
    pub fn from_catalog(catalog: &CleanedCatalog) -> Self {
        let movies = catalog.iter().filter(|row| row.is_movie()).count();
        let tv_shows = catalog.iter().filter(|row| row.is_tv_show()).count();
        Self::new(catalog.len(), movies, tv_shows)
    }

    /// Print the summary block to stdout.
    pub fn print(&self) {
        println!("\n{}", self);
    }
}

fn movie_ratio(movies: usize, tv_shows: usize) -> f64 {
    if tv_shows == 0 {
        0.0
    } else {
        movies as f64 / tv_shows as f64
    }
}

impl fmt::Display for ContentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Project Analysis Summary---")?;
        writeln!(f, "Total Content Count: {}", self.total)?;
        writeln!(f, "Total Movies: {}", self.movies)?;
        writeln!(f, "Total TV Shows: {}", self.tv_shows)?;
        write!(f, "Ratio of Movies to TV Shows: {:.2} to 1", self.ratio)
    }
}
