//! Executive summary box, compliance rate bar and the heading that introduces
//! the per-file analysis

use crate::canvas::{Canvas, TextStyle};
use crate::config::LayoutMetrics;
use crate::cursor::LayoutCursor;
use crate::palette::{self, Rgb};
use crate::stats::ReportStats;

const HEADING_OFFSET: f32 = 8.0;
const TILES_OFFSET: f32 = 12.0;
/// Space between the summary box and the rate heading
const RATE_HEADING_GAP: f32 = 10.0;
const BAR_GAP: f32 = 5.0;
const ANALYSIS_HEADING_GAP: f32 = 12.0;
const TRAILING_GAP: f32 = 10.0;

/// Vertical offsets from the top of the summary section, derived from the
/// configured box, tile and bar sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryGeometry {
    /// Drawn box height, grown to enclose the tiles when needed
    pub box_height: f32,
    pub tiles: f32,
    pub rate_heading: f32,
    pub bar: f32,
    pub analysis_heading: f32,
    /// Total height the section occupies
    pub height: f32,
}

impl SummaryGeometry {
    pub fn new(layout: &LayoutMetrics) -> Self {
        let box_height = layout
            .summary_box_height
            .max(TILES_OFFSET + layout.stat_tile_height + 1.0);
        let rate_heading = box_height + RATE_HEADING_GAP;
        let bar = rate_heading + BAR_GAP;
        let analysis_heading = bar + layout.progress_bar_height + ANALYSIS_HEADING_GAP;
        Self {
            box_height,
            tiles: TILES_OFFSET,
            rate_heading,
            bar,
            analysis_heading,
            height: analysis_heading + TRAILING_GAP,
        }
    }
}

/// One statistic tile in the summary box
#[derive(Debug, Clone, PartialEq)]
pub struct StatTile {
    pub label: &'static str,
    pub count: usize,
    pub color: Rgb,
    /// Fixed horizontal position; omitted tiles leave their slot empty
    pub slot: usize,
}

/// Tiles to draw for `stats`.
///
/// The total tile is always present. The other tiles only appear when their
/// count is non-zero.
pub fn stat_tiles(stats: &ReportStats) -> Vec<StatTile> {
    let candidates = [
        ("TOTAL FILES", stats.total_files, palette::PRIMARY),
        ("COMPLIANT", stats.compliant_files, palette::SECONDARY),
        ("WARNINGS", stats.warning_files, palette::WARNING),
        ("NON-COMPLIANT", stats.non_compliant_files, palette::DESTRUCTIVE),
    ];
    candidates
        .into_iter()
        .enumerate()
        .filter(|(slot, (_, count, _))| *slot == 0 || *count > 0)
        .map(|(slot, (label, count, color))| StatTile {
            label,
            count,
            color,
            slot,
        })
        .collect()
}

/// Width of the filled part of the progress bar
pub fn bar_fill_width(bar_width: f32, rate: u8) -> f32 {
    bar_width * rate as f32 / 100.0
}

pub fn render(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    layout: &LayoutMetrics,
    stats: &ReportStats,
) {
    let geometry = SummaryGeometry::new(layout);
    cursor.reserve(canvas, geometry.height);
    let top = cursor.y();
    let x = layout.margin_x;
    let inner_x = x + 5.0;

    canvas.fill_rect(
        x,
        top,
        layout.content_width(),
        geometry.box_height,
        palette::BACKGROUND,
    );
    canvas.set_line_width(0.5);
    canvas.stroke_rect(
        x,
        top,
        layout.content_width(),
        geometry.box_height,
        palette::PRIMARY,
    );
    canvas.set_line_width(0.2);

    let heading = TextStyle::new(14.0, palette::PRIMARY).bold();
    canvas.styled_text(inner_x, top + HEADING_OFFSET, "EXECUTIVE SUMMARY", &heading);

    let tile_y = top + geometry.tiles;
    let tile_text_y = tile_y + layout.stat_tile_height * 2.0 / 3.0;
    for tile in stat_tiles(stats) {
        let tile_x = inner_x + tile.slot as f32 * layout.stat_tile_pitch;
        canvas.fill_rect(
            tile_x,
            tile_y,
            layout.stat_tile_width,
            layout.stat_tile_height,
            tile.color,
        );
        canvas.styled_text(
            tile_x + 5.0,
            tile_text_y,
            &tile.count.to_string(),
            &TextStyle::new(16.0, Rgb::WHITE).bold(),
        );
        canvas.text(
            tile_x + 15.0,
            tile_text_y,
            tile.label,
            8.0,
            Rgb::WHITE,
        );
    }

    let rate = stats.compliance_rate();
    canvas.styled_text(
        inner_x,
        top + geometry.rate_heading,
        "OVERALL COMPLIANCE RATE",
        &TextStyle::new(12.0, palette::PRIMARY).bold(),
    );

    let bar_y = top + geometry.bar;
    canvas.fill_rect(
        inner_x,
        bar_y,
        layout.progress_bar_width,
        layout.progress_bar_height,
        palette::TRACK,
    );
    let fill = bar_fill_width(layout.progress_bar_width, rate);
    if fill > 0.0 {
        canvas.fill_rect(
            inner_x,
            bar_y,
            fill,
            layout.progress_bar_height,
            stats.rate_band().color(),
        );
    }
    canvas.styled_text(
        inner_x + layout.progress_bar_width + 10.0,
        bar_y + layout.progress_bar_height / 2.0 + 2.0,
        &format!("{}%", rate),
        &heading,
    );

    canvas.styled_text(
        inner_x,
        top + geometry.analysis_heading,
        "DETAILED COMPLIANCE ANALYSIS",
        &heading,
    );

    cursor.move_to(top + geometry.height);
}
