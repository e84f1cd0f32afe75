//! Recommendations section, always opened on a fresh page

use crate::canvas::{Canvas, TextStyle};
use crate::config::LayoutMetrics;
use crate::cursor::LayoutCursor;
use crate::palette::{self, Rgb};
use crate::text::{self, Font};

const ITEM_FONT_SIZE: f32 = 10.0;
const NUMBER_INSET: f32 = 10.0;
const TEXT_INSET: f32 = 20.0;

/// Wrapped lines of one action item
pub fn wrap_item(item: &str, layout: &LayoutMetrics) -> Vec<String> {
    text::wrap(
        item,
        layout.content_width() - TEXT_INSET,
        ITEM_FONT_SIZE,
        Font::Regular,
    )
}

/// Vertical space an item occupies, spacing included
pub fn item_height(lines: usize, layout: &LayoutMetrics) -> f32 {
    lines as f32 * layout.recommendation_line_height + layout.recommendation_spacing
}

/// Returns the 0-based page the section starts on
pub fn render(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    layout: &LayoutMetrics,
    items: &[String],
) -> usize {
    cursor.break_page(canvas);
    let start_page = canvas.current_page();
    let x = layout.margin_x;

    canvas.fill_rect(
        0.0,
        0.0,
        canvas.width(),
        layout.recommendations_band_height,
        palette::PRIMARY,
    );
    canvas.styled_text(
        x + 5.0,
        15.0,
        "RECOMMENDATIONS & NEXT STEPS",
        &TextStyle::new(16.0, Rgb::WHITE).bold(),
    );

    cursor.move_to(layout.recommendations_band_height + 10.0);
    canvas.styled_text(
        x + 5.0,
        cursor.y(),
        "ACTION ITEMS:",
        &TextStyle::new(12.0, palette::PRIMARY).bold(),
    );
    cursor.advance(10.0);

    for (index, item) in items.iter().enumerate() {
        let lines = wrap_item(item, layout);
        cursor.reserve(canvas, item_height(lines.len(), layout));

        let y = cursor.y();
        canvas.text(
            x + NUMBER_INSET,
            y,
            &format!("{}.", index + 1),
            ITEM_FONT_SIZE,
            palette::MUTED,
        );
        for (i, line) in lines.iter().enumerate() {
            canvas.text(
                x + TEXT_INSET,
                y + i as f32 * layout.recommendation_line_height,
                line,
                ITEM_FONT_SIZE,
                palette::PRIMARY,
            );
        }
        cursor.advance(item_height(lines.len(), layout));
    }

    start_page
}
