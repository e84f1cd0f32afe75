//! Per-file block: status banner followed by the rule table

use crate::canvas::{Align, Canvas, TextStyle};
use crate::config::LayoutMetrics;
use crate::cursor::LayoutCursor;
use crate::palette::{self, Rgb};
use crate::table::{Column, TableRenderer, TableStyle, TableSummary};
use crate::text::{self, Font};
use shared_types::ComplianceResult;

/// Index of the column whose text drives cell coloring
pub const STATUS_COLUMN: usize = 2;

const BANNER_FONT_SIZE: f32 = 12.0;
const BANNER_TEXT_INSET: f32 = 5.0;

pub fn columns(layout: &LayoutMetrics) -> Vec<Column> {
    let fixed = 25.0 + 35.0 + 25.0;
    vec![
        Column::new("Category", 25.0),
        Column::new("Rule", 35.0),
        Column::new("Status", 25.0).aligned(Align::Center),
        Column::new("Message", (layout.content_width() - fixed).max(10.0)),
    ]
}

pub fn table_style(layout: &LayoutMetrics) -> TableStyle {
    TableStyle {
        header_font_size: layout.table_header_font_size,
        body_font_size: layout.table_body_font_size,
        padding: layout.table_cell_padding,
        line_spacing: layout.table_line_spacing,
        ..TableStyle::default()
    }
}

/// Table rows in rule order: category, rule, status token, message
pub fn rule_rows(result: &ComplianceResult) -> Vec<Vec<String>> {
    result
        .rules
        .iter()
        .map(|rule| {
            vec![
                rule.category.clone(),
                rule.rule.clone(),
                rule.status.token().to_string(),
                rule.message.clone(),
            ]
        })
        .collect()
}

/// Colors status cells by the token they carry
pub fn status_cell_style(_row: usize, col: usize, text: &str) -> Option<Rgb> {
    if col == STATUS_COLUMN {
        palette::token_color(text)
    } else {
        None
    }
}

/// Draw the block for the `index`-th result (0-based)
pub fn render(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    layout: &LayoutMetrics,
    index: usize,
    result: &ComplianceResult,
) -> TableSummary {
    let columns = columns(layout);
    let cell_style = status_cell_style;
    let table = TableRenderer::new(layout.margin_x, &columns, table_style(layout))
        .with_cell_style(&cell_style);
    let rows = rule_rows(result);

    // Keep the banner with the table header and first row
    let lead = table.lead_height(cursor, &rows);
    cursor.reserve(canvas, layout.banner_height + layout.banner_gap + lead);

    let top = cursor.y();
    let x = layout.margin_x;
    canvas.fill_rect(
        x,
        top,
        layout.content_width(),
        layout.banner_height,
        palette::status_color(result.overall_status),
    );

    let style = TextStyle::new(BANNER_FONT_SIZE, Rgb::WHITE).bold();
    let prefix = format!("FILE {}: ", index + 1);
    let name_width = layout.content_width()
        - 2.0 * BANNER_TEXT_INSET
        - text::text_width(&prefix, BANNER_FONT_SIZE, Font::Bold);
    let name = text::ellipsize(&result.file_name, name_width, BANNER_FONT_SIZE, Font::Bold);
    canvas.styled_text(
        x + BANNER_TEXT_INSET,
        top + 6.0,
        &format!("{}{}", prefix, name),
        &style,
    );
    canvas.styled_text(
        x + BANNER_TEXT_INSET,
        top + 11.0,
        &format!("STATUS: {}", result.overall_status.label()),
        &style,
    );
    cursor.advance(layout.banner_height + layout.banner_gap);

    tracing::debug!(
        "Rendering {} rules for '{}' on page {}",
        rows.len(),
        result.file_name,
        canvas.current_page() + 1
    );
    let summary = table.render(canvas, cursor, &rows);
    cursor.advance(layout.section_gap);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawOp;
    use pretty_assertions::assert_eq;
    use shared_types::{ComplianceRule, OverallStatus, RuleStatus};

    fn result(statuses: &[RuleStatus]) -> ComplianceResult {
        let rules = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| {
                ComplianceRule::new(
                    (i + 1).to_string(),
                    "Class A",
                    format!("Rule {}", i + 1),
                    *s,
                    format!("message {}", i + 1),
                )
            })
            .collect();
        ComplianceResult::from_rules("site-plan.pdf", rules, 1200)
    }

    #[test]
    fn test_columns_fill_content_width() {
        let layout = LayoutMetrics::default();
        let cols = columns(&layout);
        let total: f32 = cols.iter().map(|c| c.width).sum();
        assert_eq!(total, layout.content_width());
        assert_eq!(cols[3].width, 95.0);
        assert_eq!(cols[STATUS_COLUMN].label, "Status");
        assert_eq!(cols[STATUS_COLUMN].align, Align::Center);
    }

    #[test]
    fn test_rule_rows_preserve_order_and_tokens() {
        let r = result(&[RuleStatus::Failed, RuleStatus::Passed, RuleStatus::Warning]);
        let rows = rule_rows(&r);
        assert_eq!(
            rows.iter().map(|row| row[1].as_str()).collect::<Vec<_>>(),
            vec!["Rule 1", "Rule 2", "Rule 3"]
        );
        assert_eq!(
            rows.iter().map(|row| row[2].as_str()).collect::<Vec<_>>(),
            vec!["FAILED", "PASSED", "WARNING"]
        );
    }

    #[test]
    fn test_status_cell_style_only_colors_status_column() {
        assert_eq!(status_cell_style(0, STATUS_COLUMN, "FAILED"), Some(palette::DESTRUCTIVE));
        assert_eq!(status_cell_style(0, 3, "FAILED to meet depth"), None);
        assert_eq!(status_cell_style(0, STATUS_COLUMN, "failed"), None);
    }

    #[test]
    fn test_banner_color_follows_status() {
        let layout = LayoutMetrics::default();
        let r = result(&[
            RuleStatus::Passed,
            RuleStatus::Passed,
            RuleStatus::Failed,
            RuleStatus::Passed,
            RuleStatus::Passed,
        ]);
        assert_eq!(r.overall_status, OverallStatus::NonCompliant);

        let mut canvas = Canvas::a4();
        let mut cursor = LayoutCursor::new(297.0, 20.0, 30.0);
        cursor.move_to(120.0);
        let summary = render(&mut canvas, &mut cursor, &layout, 0, &r);

        let page = canvas.page(0).unwrap();
        assert_eq!(
            page.ops()[0],
            DrawOp::FillRect {
                x: 15.0,
                y: 120.0,
                width: 180.0,
                height: 15.0,
                color: palette::DESTRUCTIVE,
            }
        );
        let texts: Vec<&str> = page.texts().collect();
        assert_eq!(texts[0], "FILE 1: site-plan.pdf");
        assert_eq!(texts[1], "STATUS: NON-COMPLIANT");
        assert_eq!(summary.body_rows, 5);
        assert_eq!(summary.header_rows, 1);
        assert!((cursor.y() - (summary.end_y + layout.section_gap)).abs() < 1e-4);
    }

    #[test]
    fn test_block_moves_to_next_page_with_its_header() {
        let layout = LayoutMetrics::default();
        let r = result(&[RuleStatus::Passed]);
        let mut canvas = Canvas::a4();
        let mut cursor = LayoutCursor::new(297.0, 20.0, 30.0);
        cursor.move_to(250.0);

        let summary = render(&mut canvas, &mut cursor, &layout, 3, &r);

        assert_eq!(canvas.page_count(), 2);
        assert_eq!(summary.first_page, 1);
        assert!(canvas.page(0).unwrap().ops().is_empty());
        let texts: Vec<&str> = canvas.page(1).unwrap().texts().collect();
        assert_eq!(texts[0], "FILE 4: site-plan.pdf");
        assert_eq!(texts[2], "Category");
    }

    #[test]
    fn test_long_file_name_is_shortened() {
        let layout = LayoutMetrics::default();
        let mut r = result(&[RuleStatus::Passed]);
        r.file_name = format!("{}.pdf", "floor-plan-revision-".repeat(15));
        let mut canvas = Canvas::a4();
        let mut cursor = LayoutCursor::new(297.0, 20.0, 30.0);

        render(&mut canvas, &mut cursor, &layout, 0, &r);

        let banner = canvas.page(0).unwrap().texts().next().unwrap().to_string();
        assert!(banner.starts_with("FILE 1: floor-plan-revision-"));
        assert!(banner.ends_with("..."));
        assert!(text::text_width(&banner, 12.0, Font::Bold) <= 180.0);
    }

    #[test]
    fn test_oversized_message_starts_under_its_banner() {
        let layout = LayoutMetrics::default();
        let mut r = result(&[RuleStatus::Warning]);
        r.rules[0].message = "clearance ".repeat(1200);
        let mut canvas = Canvas::a4();
        let mut cursor = LayoutCursor::new(297.0, 20.0, 30.0);
        cursor.move_to(120.0);

        let summary = render(&mut canvas, &mut cursor, &layout, 0, &r);

        assert_eq!(summary.first_page, 0);
        assert!(summary.last_page > 0);
        let first: Vec<&str> = canvas.page(0).unwrap().texts().collect();
        assert_eq!(first[0], "FILE 1: site-plan.pdf");
        assert!(first.contains(&"WARNING"));

        let mut words = 0;
        for page in canvas.pages() {
            for op in page.ops() {
                if let DrawOp::Text { y, text, .. } = op {
                    assert!(*y <= cursor.limit(), "text below the body at y={}", y);
                    words += text.split_whitespace().filter(|w| *w == "clearance").count();
                }
            }
        }
        assert_eq!(words, 1200);
    }
}
