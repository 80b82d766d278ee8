//! Charts module - Static PNG rendering

mod enrichment_bars;
mod volcano;

pub use enrichment_bars::{bar_rows, render_enrichment_bars, BarRow};
pub use volcano::{render_volcano, VolcanoPoints};

use plotters::style::{register_font, FontStyle, RGBColor};
use std::sync::OnceLock;

/// DejaVu Sans, shipped with the crate so rendering never depends on host fonts
static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Output size in pixels (10x6 inches at 100 dpi)
pub const FIGURE_SIZE: (u32, u32) = (1000, 600);

pub const GRAY: RGBColor = RGBColor(128, 128, 128);
pub const SIGNIFICANT_RED: RGBColor = RGBColor(255, 0, 0);
pub const FC_LINE_BLUE: RGBColor = RGBColor(0, 0, 255);
pub const PVAL_LINE_GREEN: RGBColor = RGBColor(0, 128, 0);
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub const GRID_GRAY: RGBColor = RGBColor(200, 200, 200);

/// Output file for a prefix and suffix, e.g. `old_mice_volcano_plot.png`.
pub fn output_path(dir: &std::path::Path, prefix: &str, suffix: &str) -> std::path::PathBuf {
    dir.join(format!("{}_{}", prefix, suffix))
}

/// Make the bundled font available as `sans-serif`. Idempotent.
pub(crate) fn ensure_font() -> std::result::Result<(), Box<dyn std::error::Error>> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| {
        register_font("sans-serif", FontStyle::Normal, BUNDLED_FONT).is_ok()
    });
    if ok {
        Ok(())
    } else {
        Err("bundled font could not be parsed".into())
    }
}
