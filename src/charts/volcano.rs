//! Volcano Plot Renderer
//! Scatter of log2 fold change against p-value, significant genes in red.

use super::{
    ensure_font, output_path, FC_LINE_BLUE, FIGURE_SIZE, GRAY, GRID_GRAY, PVAL_LINE_GREEN,
    SIGNIFICANT_RED,
};
use crate::data::ExpressionSet;
use crate::error::{PipelineError, Result};
use crate::stats::{ensure_annotated, LOG2FC_THRESHOLD, PVAL_THRESHOLD};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

pub const VOLCANO_SUFFIX: &str = "volcano_plot.png";

/// Plottable points of an annotated set plus the axis ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct VolcanoPoints {
    /// Every row with both coordinates present, `(log2fc, pval)`
    pub all: Vec<(f64, f64)>,
    /// The significant subset, drawn on top
    pub significant: Vec<(f64, f64)>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl VolcanoPoints {
    pub fn from_set(set: &ExpressionSet) -> Result<Self> {
        let mut all = Vec::new();
        let mut significant = Vec::new();

        for (log2fc, pval, is_sig) in set.significance_rows()? {
            let (Some(x), Some(y)) = (log2fc, pval) else {
                continue;
            };
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            all.push((x, y));
            if is_sig {
                significant.push((x, y));
            }
        }

        // Threshold lines stay visible even when the data sits inside them.
        let x_range = padded_range(
            all.iter()
                .map(|p| p.0)
                .chain([-LOG2FC_THRESHOLD, LOG2FC_THRESHOLD]),
        );
        let y_range = padded_range(all.iter().map(|p| p.1).chain([0.0, PVAL_THRESHOLD]));

        Ok(Self {
            all,
            significant,
            x_range,
            y_range,
        })
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = if max > min { max - min } else { 1.0 };
    let pad = span * 0.05;
    (min - pad)..(max + pad)
}

/// Render `{prefix}_volcano_plot.png` into `dir`.
pub fn render_volcano(set: &ExpressionSet, prefix: &str, dir: &Path) -> Result<PathBuf> {
    ensure_annotated(set)?;
    let points = VolcanoPoints::from_set(set)?;
    let path = output_path(dir, prefix, VOLCANO_SUFFIX);

    draw_volcano(&points, prefix, &path).map_err(|e| PipelineError::render(&path, e))?;

    info!(
        path = %path.display(),
        points = points.all.len(),
        significant = points.significant.len(),
        "Saved volcano plot"
    );
    Ok(path)
}

fn draw_volcano(
    points: &VolcanoPoints,
    prefix: &str,
    path: &Path,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    ensure_font()?;
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Volcano Plot ({})", prefix), ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(points.x_range.clone(), points.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc("Log2 Fold Change")
        .y_desc("P-value")
        .light_line_style(&GRID_GRAY.mix(0.5))
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()?;

    chart
        .draw_series(
            points
                .all
                .iter()
                .map(|&p| Circle::new(p, 3, GRAY.mix(0.6).filled())),
        )?
        .label("Non-significant")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, GRAY.mix(0.6).filled()));

    chart
        .draw_series(
            points
                .significant
                .iter()
                .map(|&p| Circle::new(p, 3, SIGNIFICANT_RED.mix(0.8).filled())),
        )?
        .label("Significant")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, SIGNIFICANT_RED.mix(0.8).filled()));

    let (y0, y1) = (points.y_range.start, points.y_range.end);
    chart
        .draw_series(DashedLineSeries::new(
            [(LOG2FC_THRESHOLD, y0), (LOG2FC_THRESHOLD, y1)],
            6,
            4,
            FC_LINE_BLUE.stroke_width(1),
        ))?
        .label(format!("Log2FC = {}", LOG2FC_THRESHOLD))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], FC_LINE_BLUE.stroke_width(1)));
    chart.draw_series(DashedLineSeries::new(
        [(-LOG2FC_THRESHOLD, y0), (-LOG2FC_THRESHOLD, y1)],
        6,
        4,
        FC_LINE_BLUE.stroke_width(1),
    ))?;

    let (x0, x1) = (points.x_range.start, points.x_range.end);
    chart
        .draw_series(DashedLineSeries::new(
            [(x0, PVAL_THRESHOLD), (x1, PVAL_THRESHOLD)],
            6,
            4,
            PVAL_LINE_GREEN.stroke_width(1),
        ))?
        .label(format!("p-value = {}", PVAL_THRESHOLD))
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], PVAL_LINE_GREEN.stroke_width(1))
        });

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::annotate_significance;
    use polars::prelude::*;

    fn annotated(rows: &[(&str, &str)]) -> ExpressionSet {
        let ids: Vec<String> = (0..rows.len()).map(|i| format!("g{}", i)).collect();
        let names: Vec<String> = (0..rows.len()).map(|i| format!("Gene{}", i)).collect();
        let fcs: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let ps: Vec<&str> = rows.iter().map(|r| r.1).collect();
        let df = df!("id" => ids, "gene_name" => names, "log2fc" => fcs, "pval" => ps).unwrap();
        let mut set = ExpressionSet::from_dataframe(df).unwrap();
        annotate_significance(&mut set).unwrap();
        set
    }

    #[test]
    fn test_points_split_and_skip_missing() {
        let set = annotated(&[("2", "0.01"), ("0.5", "0.001"), ("x", "0.2"), ("-3", "0.2")]);
        let points = VolcanoPoints::from_set(&set).unwrap();

        assert_eq!(points.all, vec![(2.0, 0.01), (0.5, 0.001), (-3.0, 0.2)]);
        assert_eq!(points.significant, vec![(2.0, 0.01)]);
    }

    #[test]
    fn test_ranges_include_threshold_lines() {
        let set = annotated(&[("0.2", "0.5"), ("0.3", "0.6")]);
        let points = VolcanoPoints::from_set(&set).unwrap();

        assert!(points.x_range.start < -LOG2FC_THRESHOLD);
        assert!(points.x_range.end > LOG2FC_THRESHOLD);
        assert!(points.y_range.start < 0.0);
        assert!(points.y_range.end > 0.6);
    }

    #[test]
    fn test_render_requires_annotation() {
        let df = df!("id" => ["g1"], "log2fc" => ["1"], "pval" => ["0.1"]).unwrap();
        let set = ExpressionSet::from_dataframe(df).unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            render_volcano(&set, "old_mice", dir.path()),
            Err(PipelineError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_render_volcano_png() {
        let set = annotated(&[("2", "0.01"), ("0.5", "0.001"), ("-3", "0.2")]);
        let dir = tempfile::tempdir().unwrap();

        let path = render_volcano(&set, "old_mice", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("old_mice_volcano_plot.png"));

        let img = image::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), FIGURE_SIZE);
    }
}
