//! Title band drawn at the top of the first page

use crate::canvas::{Align, Canvas, TextStyle};
use crate::config::ReportConfig;
use crate::cursor::LayoutCursor;
use crate::palette::{self, Rgb};
use chrono::{DateTime, Utc};

/// Gap between the title band and the first section
const TITLE_GAP: f32 = 10.0;

/// Human-readable generation stamp
pub fn generated_line(generated_at: &DateTime<Utc>) -> String {
    format!(
        "Generated: {} at {} UTC",
        generated_at.format("%Y-%m-%d"),
        generated_at.format("%H:%M:%S")
    )
}

pub fn render(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    config: &ReportConfig,
    generated_at: &DateTime<Utc>,
) {
    let layout = &config.layout;
    let x = layout.margin_x;
    let text_x = x + 15.0;

    canvas.fill_rect(0.0, 0.0, canvas.width(), layout.title_height, palette::PRIMARY);

    // Logo tile
    canvas.fill_rect(x, 10.0, 8.0, 8.0, palette::ACCENT);
    canvas.styled_text(
        x + 4.0,
        15.0,
        &config.brand_mark,
        &TextStyle::new(6.0, Rgb::WHITE)
            .bold()
            .aligned(Align::Center),
    );

    canvas.styled_text(
        text_x,
        20.0,
        &config.title,
        &TextStyle::new(24.0, Rgb::WHITE).bold(),
    );
    canvas.text(text_x, 28.0, &config.subtitle, 20.0, Rgb::WHITE);
    canvas.text(text_x, 35.0, &generated_line(generated_at), 10.0, Rgb::WHITE);

    cursor.move_to(layout.title_height + TITLE_GAP);
}
