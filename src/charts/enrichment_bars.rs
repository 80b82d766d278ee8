//! Enrichment Bar Chart Renderer
//! Horizontal bars of -log10(p) for the top enriched terms.

use super::{ensure_font, output_path, FIGURE_SIZE, GRID_GRAY, SKY_BLUE};
use crate::enrichment::EnrichmentTerm;
use crate::error::{PipelineError, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::info;

pub const BARS_SUFFIX: &str = "go_terms.png";

/// Longest term name printed on the y axis.
const MAX_LABEL_CHARS: usize = 55;

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    /// Segment on the y axis; 0 is the bottom
    pub row: usize,
    pub label: String,
    /// -log10(p_value)
    pub score: f64,
}

/// Lay out terms already sorted by ascending p-value: the first term gets
/// the top row.
pub fn bar_rows(terms: &[EnrichmentTerm]) -> Vec<BarRow> {
    let n = terms.len();
    terms
        .iter()
        .enumerate()
        .map(|(i, term)| BarRow {
            row: n - 1 - i,
            label: truncate_label(&term.name),
            // A p-value of exactly zero would give an infinite bar.
            score: -term.p_value.max(f64::MIN_POSITIVE).log10(),
        })
        .collect()
}

fn truncate_label(name: &str) -> String {
    if name.chars().count() <= MAX_LABEL_CHARS {
        name.to_string()
    } else {
        let head: String = name.chars().take(MAX_LABEL_CHARS - 3).collect();
        format!("{}...", head)
    }
}

/// Render `{prefix}_go_terms.png` into `dir`.
pub fn render_enrichment_bars(
    terms: &[EnrichmentTerm],
    prefix: &str,
    dir: &Path,
) -> Result<PathBuf> {
    let rows = bar_rows(terms);
    let path = output_path(dir, prefix, BARS_SUFFIX);

    draw_bars(&rows, prefix, &path).map_err(|e| PipelineError::render(&path, e))?;

    info!(path = %path.display(), terms = rows.len(), "Saved enrichment chart");
    Ok(path)
}

fn draw_bars(
    rows: &[BarRow],
    prefix: &str,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    ensure_font()?;
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let segments = rows.len().max(1);
    let max_score = rows.iter().map(|r| r.score).fold(0.0_f64, f64::max);
    let x_max = if max_score > 0.0 { max_score * 1.05 } else { 1.0 };

    let mut labels = vec![String::new(); segments];
    for r in rows {
        labels[r.row] = r.label.clone();
    }

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Top 10 Enriched GO Terms ({})", prefix),
            ("sans-serif", 22),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(340)
        .build_cartesian_2d(0.0..x_max, (0..segments).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .light_line_style(&GRID_GRAY.mix(0.5))
        .x_desc("-Log10(p-value)")
        .y_desc("GO Term")
        .y_labels(segments)
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(rows.iter().map(|r| {
        let mut bar = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(r.row)),
                (r.score, SegmentValue::Exact(r.row + 1)),
            ],
            SKY_BLUE.filled(),
        );
        bar.set_margin(5, 5, 0, 0);
        bar
    }))?;

    root.present()?;
    Ok(())
}
