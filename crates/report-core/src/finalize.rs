//! Footer pass
//!
//! Runs once layout is complete so the total page count is known. Every page
//! gets the footer band with the contact lines and its `Page i of N` label.

use crate::canvas::{Align, Canvas, TextStyle};
use crate::config::ReportConfig;
use crate::palette::{self, Rgb};

const FOOTER_FONT_SIZE: f32 = 9.0;
const PAGE_LABEL_FONT_SIZE: f32 = 8.0;
const FIRST_LINE_OFFSET: f32 = 7.0;
const LINE_PITCH: f32 = 6.0;

/// Footer label for 1-based page `index` out of `total`
pub fn page_label(index: usize, total: usize) -> String {
    format!("Page {} of {}", index, total)
}

/// Draw the footer on every page. Returns the page count that was stamped.
pub fn stamp_footers(canvas: &mut Canvas, config: &ReportConfig) -> usize {
    let layout = &config.layout;
    let total = canvas.page_count();
    let band_top = layout.page_height - layout.footer_height;
    let label_style =
        TextStyle::new(PAGE_LABEL_FONT_SIZE, palette::BACKGROUND).aligned(Align::Right);

    for page in 0..total {
        if !canvas.select_page(page) {
            continue;
        }
        canvas.fill_rect(0.0, band_top, canvas.width(), layout.footer_height, palette::PRIMARY);

        for (i, line) in config.footer_lines.iter().enumerate() {
            let y = band_top + FIRST_LINE_OFFSET + i as f32 * LINE_PITCH;
            if y > layout.page_height {
                break;
            }
            canvas.text(layout.margin_x + 5.0, y, line, FOOTER_FONT_SIZE, Rgb::WHITE);
        }

        canvas.styled_text(
            canvas.width() - layout.margin_x,
            layout.page_height - layout.footer_height * 0.4,
            &page_label(page + 1, total),
            &label_style,
        );
    }

    tracing::debug!("Stamped footers on {} pages", total);
    total
}
