//! PNG chart rendering through plotters.
//!
//! Rendering failures never abort a run: a [`RenderLog`] collects them as
//! warnings.

use crate::aggregate::YearlyAggregate;
use crate::error::{CatalogError, Result};
use crate::types::TokenCount;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const TIMELINE_CHART_FILE: &str = "Chart_1_Content_Distribution_Over_Time.png";
pub const GENRES_CHART_FILE: &str = "Chart_2_Top_10_Genres.png";
pub const COUNTRIES_CHART_FILE: &str = "Chart_3_Top_10_Countries.png";

const TIMELINE_SIZE: (u32, u32) = (1200, 600);
const RANKING_SIZE: (u32, u32) = (1000, 700);

const TIMELINE_TITLE: &str = "Distribution of Content (Movies vs. TV Shows) Added Per Year";

/// Half the width of a bar, in axis units.
const BAR_HALF_WIDTH: f64 = 0.4;

const CATEGORY_COLORS: [RGBColor; 4] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

const VIRIDIS: [RGBColor; 10] = [
    RGBColor(68, 1, 84),
    RGBColor(72, 40, 120),
    RGBColor(62, 74, 137),
    RGBColor(49, 104, 142),
    RGBColor(38, 130, 142),
    RGBColor(31, 158, 137),
    RGBColor(53, 183, 121),
    RGBColor(109, 205, 89),
    RGBColor(180, 222, 44),
    RGBColor(253, 231, 37),
];

const MAGMA: [RGBColor; 10] = [
    RGBColor(0, 0, 4),
    RGBColor(24, 15, 61),
    RGBColor(68, 15, 118),
    RGBColor(114, 31, 129),
    RGBColor(158, 47, 127),
    RGBColor(205, 64, 113),
    RGBColor(241, 96, 93),
    RGBColor(253, 150, 104),
    RGBColor(254, 201, 141),
    RGBColor(252, 253, 191),
];

/// One stacked segment of the timeline chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StackedSegment {
    pub year: i32,
    /// Index into `YearlyAggregate::categories`.
    pub column: usize,
    pub bottom: usize,
    pub top: usize,
}

/// One horizontal bar of a ranking chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RankedBar {
    pub rank: usize,
    /// Vertical position; the highest rank sits at the top.
    pub position: f64,
    pub count: usize,
}

/// Stack the categories of each year bottom-up in category order. Empty
/// cells produce no segment.
pub(crate) fn stacked_segments(yearly: &YearlyAggregate) -> Vec<StackedSegment> {
    let mut segments = Vec::new();
    for (year, row) in yearly.years.iter().zip(&yearly.counts) {
        let mut bottom = 0;
        for (column, count) in row.iter().enumerate() {
            if *count == 0 {
                continue;
            }
            segments.push(StackedSegment {
                year: *year,
                column,
                bottom,
                top: bottom + count,
            });
            bottom += count;
        }
    }
    segments
}

pub(crate) fn ranked_bars(entries: &[TokenCount]) -> Vec<RankedBar> {
    let n = entries.len();
    entries
        .iter()
        .enumerate()
        .map(|(rank, entry)| RankedBar {
            rank,
            position: (n - 1 - rank) as f64,
            count: entry.count,
        })
        .collect()
}

/// Axis label for a tick on the year axis; ticks between years stay blank.
fn year_label(x: f64) -> String {
    if (x - x.round()).abs() < 1e-6 {
        format!("{}", x.round() as i64)
    } else {
        String::new()
    }
}

/// Axis label for a tick on a ranking chart's vertical axis.
fn rank_label(entries: &[TokenCount], y: f64) -> String {
    let n = entries.len() as f64;
    if (y - y.round()).abs() > 1e-6 || y.round() < 0.0 || y.round() >= n {
        return String::new();
    }
    let rank = (n - 1.0 - y.round()) as usize;
    entries
        .get(rank)
        .map(|entry| entry.token.clone())
        .unwrap_or_default()
}

/// Writes the three catalog charts into one directory.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    output_dir: PathBuf,
    top_k: usize,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>, top_k: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            top_k,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Chart 1: stacked bars of content added per year.
    pub fn render_timeline(&self, yearly: &YearlyAggregate) -> Result<PathBuf> {
        let path = self.prepare(TIMELINE_CHART_FILE)?;
        draw_timeline(&path, yearly).map_err(|e| render_failure(&path, e))?;
        info!("Chart saved: {}", path.display());
        Ok(path)
    }

    /// Chart 2: horizontal bars of the top genres.
    pub fn render_genres(&self, genres: &[TokenCount]) -> Result<PathBuf> {
        let path = self.prepare(GENRES_CHART_FILE)?;
        let title = format!("Top {} Most Popular Genres", self.top_k);
        let layout = RankingChart {
            title: &title,
            x_desc: "Total Content Count",
            y_desc: "Genre",
            palette: &VIRIDIS,
        };
        draw_ranking(&path, &layout, genres).map_err(|e| render_failure(&path, e))?;
        info!("Chart saved: {}", path.display());
        Ok(path)
    }

    /// Chart 3: horizontal bars of the top contributing countries.
    pub fn render_countries(&self, countries: &[TokenCount]) -> Result<PathBuf> {
        let path = self.prepare(COUNTRIES_CHART_FILE)?;
        let title = format!("Top {} Content Contributing Countries", self.top_k);
        let layout = RankingChart {
            title: &title,
            x_desc: "Total Content Count",
            y_desc: "Country",
            palette: &MAGMA,
        };
        draw_ranking(&path, &layout, countries).map_err(|e| render_failure(&path, e))?;
        info!("Chart saved: {}", path.display());
        Ok(path)
    }

    fn prepare(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            CatalogError::ChartRenderFailed(format!(
                "{}: cannot create output directory '{}': {}",
                file_name,
                self.output_dir.display(),
                e
            ))
        })?;
        Ok(self.output_dir.join(file_name))
    }
}

/// Charts written during a run and a warning for each one that failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderLog {
    pub written: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl RenderLog {
    /// Keep a written path, or log the failure and keep it as a warning.
    pub fn record(&mut self, outcome: Result<PathBuf>) {
        match outcome {
            Ok(path) => self.written.push(path),
            Err(e) => {
                warn!("{}", e);
                self.warnings.push(e.to_string());
            }
        }
    }
}

fn render_failure(path: &Path, err: anyhow::Error) -> CatalogError {
    CatalogError::ChartRenderFailed(format!("{}: {:#}", path.display(), err))
}

struct RankingChart<'a> {
    title: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    palette: &'a [RGBColor],
}

fn draw_timeline(path: &Path, yearly: &YearlyAggregate) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, TIMELINE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (first, last) = match (yearly.years.first(), yearly.years.last()) {
        (Some(first), Some(last)) => (*first as f64, *last as f64),
        _ => (0.0, 0.0),
    };
    let y_max = yearly.max_year_total().max(1) as f64 * 1.05;

    let mut chart = ChartBuilder::on(&root)
        .caption(TIMELINE_TITLE, ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((first - 0.5)..(last + 0.5), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(yearly.years.len().max(2))
        .x_label_formatter(&|x: &f64| year_label(*x))
        .x_desc("Year Added")
        .y_desc("Count")
        .draw()?;

    let segments = stacked_segments(yearly);
    for (column, category) in yearly.categories.iter().enumerate() {
        let color = CATEGORY_COLORS[column % CATEGORY_COLORS.len()];
        let bars = segments
            .iter()
            .filter(|segment| segment.column == column)
            .map(|segment| {
                let x = segment.year as f64;
                Rectangle::new(
                    [
                        (x - BAR_HALF_WIDTH, segment.bottom as f64),
                        (x + BAR_HALF_WIDTH, segment.top as f64),
                    ],
                    color.filled(),
                )
            });
        chart
            .draw_series(bars)?
            .label(category.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_ranking(
    path: &Path,
    layout: &RankingChart<'_>,
    entries: &[TokenCount],
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, RANKING_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let slots = entries.len().max(1);
    let x_max = entries.iter().map(|e| e.count).max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(layout.title, ("sans-serif", 26))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(220)
        .build_cartesian_2d(0f64..x_max, -0.5f64..(slots as f64 - 0.5))?;

    let label = |y: &f64| rank_label(entries, *y);
    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(slots)
        .y_label_formatter(&label)
        .x_desc(layout.x_desc)
        .y_desc(layout.y_desc)
        .draw()?;

    chart.draw_series(ranked_bars(entries).into_iter().map(|bar| {
        let color = layout.palette[bar.rank % layout.palette.len()];
        Rectangle::new(
            [
                (0.0, bar.position - BAR_HALF_WIDTH),
                (bar.count as f64, bar.position + BAR_HALF_WIDTH),
            ],
            color.filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yearly() -> YearlyAggregate {
        YearlyAggregate {
            years: vec![2019, 2020],
            categories: vec!["Movie".to_string(), "TV Show".to_string()],
            counts: vec![vec![3, 2], vec![0, 4]],
        }
    }

    fn ranking() -> Vec<TokenCount> {
        vec![
            TokenCount::new("Dramas", 5),
            TokenCount::new("Comedies", 3),
            TokenCount::new("Documentaries", 1),
        ]
    }

    #[test]
    fn test_stacked_segments() {
        let segments = stacked_segments(&yearly());
        assert_eq!(
            segments,
            vec![
                StackedSegment { year: 2019, column: 0, bottom: 0, top: 3 },
                StackedSegment { year: 2019, column: 1, bottom: 3, top: 5 },
                StackedSegment { year: 2020, column: 1, bottom: 0, top: 4 },
            ]
        );
    }

    #[test]
    fn test_ranked_bars_largest_on_top() {
        let bars = ranked_bars(&ranking());
        assert_eq!(bars[0].position, 2.0);
        assert_eq!(bars[0].count, 5);
        assert_eq!(bars[2].position, 0.0);
        assert!(ranked_bars(&[]).is_empty());
    }

    #[test]
    fn test_axis_labels() {
        assert_eq!(year_label(2019.0), "2019");
        assert_eq!(year_label(2019.5), "");

        let entries = ranking();
        assert_eq!(rank_label(&entries, 2.0), "Dramas");
        assert_eq!(rank_label(&entries, 0.0), "Documentaries");
        assert_eq!(rank_label(&entries, 0.5), "");
        assert_eq!(rank_label(&entries, 3.0), "");
        assert_eq!(rank_label(&entries, -1.0), "");
    }

    #[test]
    fn test_palettes_cover_top_ten() {
        assert_eq!(VIRIDIS.len(), 10);
        assert_eq!(MAGMA.len(), 10);
    }

    fn render_each(renderer: &ChartRenderer) -> RenderLog {
        let mut log = RenderLog::default();
        log.record(renderer.render_timeline(&yearly()));
        log.record(renderer.render_genres(&ranking()));
        log.record(renderer.render_countries(&ranking()));
        log
    }

    #[test]
    #[ignore = "requires system fonts for chart text"]
    fn test_renderer_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let log = render_each(&ChartRenderer::new(dir.path(), 10));

        assert!(log.warnings.is_empty(), "warnings: {:?}", log.warnings);
        assert_eq!(log.written.len(), 3);
        for name in [TIMELINE_CHART_FILE, GENRES_CHART_FILE, COUNTRIES_CHART_FILE] {
            assert!(dir.path().join(name).exists());
        }
    }

    #[test]
    fn test_unwritable_output_dir_is_a_warning() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let log = render_each(&ChartRenderer::new(blocker.join("charts"), 10));

        assert!(log.written.is_empty());
        assert_eq!(log.warnings.len(), 3);
        assert!(log.warnings[0].contains("cannot create output directory"));
        assert!(log.warnings[2].contains(COUNTRIES_CHART_FILE));
    }
}
