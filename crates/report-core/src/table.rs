//! Grid table layout with repeated headers
//!
//! Rows are laid out one at a time against the [`LayoutCursor`]. A row never
//! splits across pages: when a row does not fit, the cursor breaks the page and
//! the header row is drawn again before the pending row.

use crate::canvas::{Align, Canvas, TextStyle};
use crate::cursor::LayoutCursor;
use crate::palette::{self, Rgb};
use crate::text::{self, Font};

/// Strategy deciding the text color of a body cell: `(row, column, text)`.
/// Returning `None` keeps the table's default body color.
pub type CellStyleFn<'a> = dyn Fn(usize, usize, &str) -> Option<Rgb> + 'a;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    pub width: f32,
    pub align: Align,
}

impl Column {
    pub fn new(label: impl Into<String>, width: f32) -> Self {
        Self {
            label: label.into(),
            width,
            align: Align::Left,
        }
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub header_fill: Rgb,
    pub header_text: Rgb,
    pub header_font_size: f32,
    pub body_text: Rgb,
    pub body_font_size: f32,
    pub grid: Rgb,
    /// Inner cell padding in millimetres
    pub padding: f32,
    /// Line height as a multiple of the font size
    pub line_spacing: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_fill: palette::PRIMARY,
            header_text: Rgb::WHITE,
            header_font_size: 9.0,
            body_text: palette::TEXT,
            body_font_size: 8.0,
            grid: palette::GRID,
            padding: 2.0,
            line_spacing: 1.15,
        }
    }
}

/// What a render pass produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSummary {
    /// Cursor position after the last row
    pub end_y: f32,
    /// Header rows drawn, including repeats after page breaks
    pub header_rows: usize,
    pub body_rows: usize,
    /// 0-based pages the table was drawn on
    pub first_page: usize,
    pub last_page: usize,
}

struct RowLayout {
    /// Unwrapped cell text, passed to the cell style strategy
    texts: Vec<String>,
    cells: Vec<Vec<String>>,
    lines: usize,
    line_height: f32,
    padding: f32,
    height: f32,
}

impl RowLayout {
    /// The part of this row holding lines `start..end`
    fn segment(&self, start: usize, end: usize) -> RowLayout {
        let cells = self
            .cells
            .iter()
            .map(|lines| {
                let from = start.min(lines.len());
                let to = end.min(lines.len());
                lines[from..to].to_vec()
            })
            .collect();
        let lines = end - start;
        RowLayout {
            texts: self.texts.clone(),
            cells,
            lines,
            line_height: self.line_height,
            padding: self.padding,
            height: lines as f32 * self.line_height + 2.0 * self.padding,
        }
    }

    /// Whole lines that fit in `space` millimetres
    fn lines_fitting(&self, space: f32) -> usize {
        let room = space - 2.0 * self.padding;
        if room <= 0.0 {
            0
        } else {
            (room / self.line_height).floor() as usize
        }
    }
}

pub struct TableRenderer<'a> {
    x: f32,
    columns: &'a [Column],
    style: TableStyle,
    cell_style: Option<&'a CellStyleFn<'a>>,
}

impl<'a> TableRenderer<'a> {
    pub fn new(x: f32, columns: &'a [Column], style: TableStyle) -> Self {
        Self {
            x,
            columns,
            style,
            cell_style: None,
        }
    }

    pub fn with_cell_style(mut self, cell_style: &'a CellStyleFn<'a>) -> Self {
        self.cell_style = Some(cell_style);
        self
    }

    pub fn width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Height of the header row
    pub fn header_height(&self) -> f32 {
        self.layout_header().height
    }

    /// Height a body row will occupy once its cells are wrapped
    pub fn row_height(&self, row: &[String]) -> f32 {
        self.layout_row(row).height
    }

    /// Space that must be free before the table starts: the header plus the
    /// first row, or only its first line when that row will be split anyway.
    pub fn lead_height(&self, cursor: &LayoutCursor, rows: &[Vec<String>]) -> f32 {
        let header = self.layout_header();
        let first = match rows.first() {
            Some(row) => self.layout_row(row),
            None => return header.height,
        };
        if first.height <= fresh_page_room(cursor, &header) {
            header.height + first.height
        } else {
            header.height + first.segment(0, 1).height
        }
    }

    /// Draw the header and every row, breaking pages as needed.
    ///
    /// The header is kept together with the first body row. A row that fits on
    /// a fresh page is never split; a taller row is split between lines and
    /// the header is repeated before each continuation. Rows with fewer cells
    /// than columns leave the remaining cells blank; extra cells are ignored.
    pub fn render(
        &self,
        canvas: &mut Canvas,
        cursor: &mut LayoutCursor,
        rows: &[Vec<String>],
    ) -> TableSummary {
        let header = self.layout_header();
        cursor.reserve(canvas, self.lead_height(cursor, rows));

        let first_page = canvas.current_page();
        self.draw_header(canvas, cursor, &header);
        let mut header_rows = 1;

        for (row_index, row) in rows.iter().enumerate() {
            let layout = self.layout_row(row);
            if layout.height > fresh_page_room(cursor, &header) {
                header_rows +=
                    self.draw_split_row(canvas, cursor, &header, row_index, &layout);
                continue;
            }
            if cursor.reserve(canvas, layout.height) {
                tracing::debug!(
                    "Repeating table header on page {} before row {}",
                    canvas.current_page() + 1,
                    row_index + 1
                );
                self.draw_header(canvas, cursor, &header);
                header_rows += 1;
            }
            self.draw_body_row(canvas, cursor, row_index, &layout);
        }

        TableSummary {
            end_y: cursor.y(),
            header_rows,
            body_rows: rows.len(),
            first_page,
            last_page: canvas.current_page(),
        }
    }

    /// Draw a row taller than a page in line-aligned segments. Returns the
    /// number of header rows repeated.
    fn draw_split_row(
        &self,
        canvas: &mut Canvas,
        cursor: &mut LayoutCursor,
        header: &RowLayout,
        row_index: usize,
        layout: &RowLayout,
    ) -> usize {
        let mut repeats = 0;
        let mut start = 0;
        let mut fresh = false;

        while start < layout.lines {
            let mut fit = layout.lines_fitting(cursor.remaining());
            if fit == 0 {
                if !fresh {
                    cursor.break_page(canvas);
                    self.draw_header(canvas, cursor, header);
                    repeats += 1;
                    fresh = true;
                    continue;
                }
                // Not even one line fits under the header; overflow rather than loop
                fit = 1;
            }
            let end = (start + fit).min(layout.lines);
            self.draw_body_row(canvas, cursor, row_index, &layout.segment(start, end));
            start = end;
            fresh = false;

            if start < layout.lines {
                cursor.break_page(canvas);
                self.draw_header(canvas, cursor, header);
                repeats += 1;
                fresh = true;
            }
        }

        tracing::debug!(
            "Split row {} over {} pages",
            row_index + 1,
            repeats + 1
        );
        repeats
    }

    fn layout_header(&self) -> RowLayout {
        let labels: Vec<String> = self.columns.iter().map(|c| c.label.clone()).collect();
        self.layout_cells(&labels, self.style.header_font_size, Font::Bold)
    }

    fn layout_row(&self, row: &[String]) -> RowLayout {
        self.layout_cells(row, self.style.body_font_size, Font::Regular)
    }

    fn layout_cells(&self, row: &[String], font_size: f32, font: Font) -> RowLayout {
        let texts: Vec<String> = (0..self.columns.len())
            .map(|i| row.get(i).cloned().unwrap_or_default())
            .collect();
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .zip(&texts)
            .map(|(column, content)| {
                let inner = (column.width - 2.0 * self.style.padding).max(1.0);
                text::wrap(content, inner, font_size, font)
            })
            .collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let line_height = text::line_height(font_size, self.style.line_spacing);
        RowLayout {
            texts,
            cells,
            lines,
            line_height,
            padding: self.style.padding,
            height: lines as f32 * line_height + 2.0 * self.style.padding,
        }
    }

    fn draw_header(&self, canvas: &mut Canvas, cursor: &mut LayoutCursor, header: &RowLayout) {
        let y = cursor.y();
        canvas.fill_rect(self.x, y, self.width(), header.height, self.style.header_fill);
        let style = TextStyle::new(self.style.header_font_size, self.style.header_text).bold();
        self.draw_cells(canvas, y, header, |_, _| style);
        cursor.advance(header.height);
    }

    fn draw_body_row(
        &self,
        canvas: &mut Canvas,
        cursor: &mut LayoutCursor,
        row_index: usize,
        layout: &RowLayout,
    ) {
        let y = cursor.y();
        let base = TextStyle::new(self.style.body_font_size, self.style.body_text);
        self.draw_cells(canvas, y, layout, |col, text| {
            let color = self
                .cell_style
                .and_then(|f| f(row_index, col, text))
                .unwrap_or(base.color);
            TextStyle { color, ..base }
        });
        cursor.advance(layout.height);
    }

    fn draw_cells<F>(&self, canvas: &mut Canvas, y: f32, layout: &RowLayout, style_for: F)
    where
        F: Fn(usize, &str) -> TextStyle,
    {
        let mut x = self.x;
        for (col, (column, lines)) in self.columns.iter().zip(&layout.cells).enumerate() {
            canvas.stroke_rect(x, y, column.width, layout.height, self.style.grid);

            let style = style_for(col, &layout.texts[col]).aligned(column.align);
            let ascent = style.size * text::MM_PER_PT * 0.8;
            let anchor = match column.align {
                Align::Left => x + self.style.padding,
                Align::Center => x + column.width / 2.0,
                Align::Right => x + column.width - self.style.padding,
            };
            for (i, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let baseline = y + layout.padding + ascent + i as f32 * layout.line_height;
                canvas.styled_text(anchor, baseline, line, &style);
            }
            x += column.width;
        }
    }
}

/// Room for body rows on a new page once the header is repeated
fn fresh_page_room(cursor: &LayoutCursor, header: &RowLayout) -> f32 {
    cursor.limit() - cursor.top_margin() - header.height
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawOp;
    use pretty_assertions::assert_eq;

    // Row height = line height + 2 * padding = 3.0 + 2.0 = 5.0mm
    fn round_style() -> TableStyle {
        TableStyle {
            header_font_size: 8.0,
            body_font_size: 8.0,
            padding: 1.0,
            line_spacing: 3.0 / (8.0 * text::MM_PER_PT),
            ..TableStyle::default()
        }
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Category", 30.0),
            Column::new("Status", 30.0).aligned(Align::Center),
            Column::new("Message", 100.0),
        ]
    }

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n)
            .map(|i| {
                vec![
                    format!("C{}", i),
                    if i % 2 == 0 { "PASSED" } else { "FAILED" }.to_string(),
                    format!("row-{}", i),
                ]
            })
            .collect()
    }

    fn texts_on(canvas: &Canvas, page: usize) -> Vec<String> {
        canvas.page(page).unwrap().texts().map(str::to_string).collect()
    }

    #[test]
    fn test_row_height_single_line() {
        let cols = columns();
        let table = TableRenderer::new(10.0, &cols, round_style());
        let h = table.row_height(&rows(1)[0]);
        assert!((h - 5.0).abs() < 1e-3, "height was {h}");
        assert!((table.header_height() - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_wrapped_cell_grows_row() {
        let cols = columns();
        let table = TableRenderer::new(10.0, &cols, round_style());
        let long = "word ".repeat(80);
        let row = vec!["A".to_string(), "PASSED".to_string(), long];
        assert!(table.row_height(&row) > 10.0);
    }

    #[test]
    fn test_header_then_rows_in_input_order() {
        let cols = columns();
        let table = TableRenderer::new(10.0, &cols, round_style());
        let mut canvas = Canvas::new(200.0, 100.0);
        let mut cursor = LayoutCursor::new(100.0, 10.0, 10.0);

        let summary = table.render(&mut canvas, &mut cursor, &rows(3));

        assert_eq!(summary.header_rows, 1);
        assert_eq!(summary.body_rows, 3);
        assert_eq!(canvas.page_count(), 1);
        assert_eq!(
            texts_on(&canvas, 0),
            vec![
                "Category", "Status", "Message", "C0", "PASSED", "row-0", "C1", "FAILED",
                "row-1", "C2", "PASSED", "row-2"
            ]
        );
        assert!((summary.end_y - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_forty_rows_repeat_header_on_each_page() {
        // Body area is 82mm: header (5mm) + 15 rows (75mm) per page.
        let cols = columns();
        let table = TableRenderer::new(10.0, &cols, round_style());
        let mut canvas = Canvas::new(200.0, 102.0);
        let mut cursor = LayoutCursor::new(102.0, 10.0, 10.0);

        let summary = table.render(&mut canvas, &mut cursor, &rows(40));

        let capacity = 15usize;
        let expected_pages = 40usize.div_ceil(capacity);
        assert_eq!(canvas.page_count(), expected_pages);
        assert_eq!(summary.header_rows, expected_pages);
        assert_eq!(summary.first_page, 0);
        assert_eq!(summary.last_page, expected_pages - 1);

        let mut body_seen = Vec::new();
        for page in 0..canvas.page_count() {
            let texts = texts_on(&canvas, page);
            assert_eq!(&texts[..3], &["Category", "Status", "Message"]);
            assert_eq!(texts.iter().filter(|t| *t == "Category").count(), 1);
            body_seen.extend(texts.into_iter().filter(|t| t.starts_with("row-")));
        }
        let expected: Vec<String> = (0..40).map(|i| format!("row-{}", i)).collect();
        assert_eq!(body_seen, expected);
    }

    #[test]
    fn test_header_kept_with_first_row() {
        let cols = columns();
        let table = TableRenderer::new(10.0, &cols, round_style());
        let mut canvas = Canvas::new(200.0, 100.0);
        let mut cursor = LayoutCursor::new(100.0, 10.0, 10.0);
        cursor.move_to(83.0); // room for the header but not header + row

        let summary = table.render(&mut canvas, &mut cursor, &rows(1));

        assert_eq!(canvas.page_count(), 2);
        assert_eq!(summary.header_rows, 1);
        assert_eq!(summary.first_page, 1);
        assert!(texts_on(&canvas, 0).is_empty());
    }

    #[test]
    fn test_cell_style_colors_status_column() {
        let cols = columns();
        let style_fn = |_row: usize, col: usize, text: &str| {
            if col == 1 {
                palette::token_color(text)
            } else {
                None
            }
        };
        let table = TableRenderer::new(10.0, &cols, round_style()).with_cell_style(&style_fn);
        let mut canvas = Canvas::new(200.0, 100.0);
        let mut cursor = LayoutCursor::new(100.0, 10.0, 10.0);
        table.render(&mut canvas, &mut cursor, &rows(2));

        let colors: Vec<(String, Rgb)> = canvas
            .page(0)
            .unwrap()
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, color, .. } => Some((text.clone(), *color)),
                _ => None,
            })
            .collect();

        let lookup = |t: &str| colors.iter().find(|(s, _)| s == t).map(|(_, c)| *c).unwrap();
        assert_eq!(lookup("PASSED"), palette::SECONDARY);
        assert_eq!(lookup("FAILED"), palette::DESTRUCTIVE);
        assert_eq!(lookup("row-0"), palette::TEXT);
        assert_eq!(lookup("Status"), Rgb::WHITE);
    }

    #[test]
    fn test_cell_style_receives_row_index() {
        let cols = columns();
        let style_fn = |row: usize, _col: usize, _text: &str| {
            if row == 1 {
                Some(palette::ACCENT)
            } else {
                None
            }
        };
        let table = TableRenderer::new(10.0, &cols, round_style()).with_cell_style(&style_fn);
        let mut canvas = Canvas::new(200.0, 100.0);
        let mut cursor = LayoutCursor::new(100.0, 10.0, 10.0);
        table.render(&mut canvas, &mut cursor, &rows(3));

        let accented: Vec<&str> = canvas
            .page(0)
            .unwrap()
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, color, .. } if *color == palette::ACCENT => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(accented, vec!["C1", "FAILED", "row-1"]);
    }

    #[test]
    fn test_empty_table_draws_header_only() {
        let cols = columns();
        let table = TableRenderer::new(10.0, &cols, round_style());
        let mut canvas = Canvas::new(200.0, 100.0);
        let mut cursor = LayoutCursor::new(100.0, 10.0, 10.0);
        let summary = table.render(&mut canvas, &mut cursor, &[]);
        assert_eq!(summary.header_rows, 1);
        assert_eq!(summary.body_rows, 0);
        assert_eq!(texts_on(&canvas, 0), vec!["Category", "Status", "Message"]);
    }

    fn text_ops(canvas: &Canvas) -> Vec<(usize, f32, String)> {
        canvas
            .pages()
            .iter()
            .enumerate()
            .flat_map(|(page, p)| {
                p.ops().iter().filter_map(move |op| match op {
                    DrawOp::Text { y, text, .. } => Some((page, *y, text.clone())),
                    _ => None,
                })
            })
            .collect()
    }

    #[test]
    fn test_row_taller_than_page_is_split_between_lines() {
        let cols = vec![
            Column::new("Category", 25.0),
            Column::new("Rule", 35.0),
            Column::new("Status", 25.0).aligned(Align::Center),
            Column::new("Message", 95.0),
        ];
        let table = TableRenderer::new(15.0, &cols, TableStyle::default());
        let mut canvas = Canvas::a4();
        let mut cursor = LayoutCursor::new(297.0, 20.0, 30.0);

        let words: Vec<String> = (0..1200).map(|i| format!("word{}", i)).collect();
        let short = vec![
            "Class A".to_string(),
            "Depth".to_string(),
            "PASSED".to_string(),
            "ok".to_string(),
        ];
        let long = vec![
            "Class B".to_string(),
            "Height".to_string(),
            "FAILED".to_string(),
            words.join(" "),
        ];
        assert!(table.row_height(&long) > 297.0);

        let summary = table.render(&mut canvas, &mut cursor, &[short, long]);

        let ops = text_ops(&canvas);
        for (page, y, text) in &ops {
            assert!(*y <= cursor.limit(), "'{}' on page {} at y={}", text, page + 1, y);
        }
        let drawn: Vec<String> = ops
            .iter()
            .flat_map(|(_, _, text)| text.split_whitespace().map(str::to_string))
            .filter(|w| w.starts_with("word"))
            .collect();
        assert_eq!(drawn, words);

        assert!(canvas.page_count() > 1);
        assert_eq!(summary.header_rows, canvas.page_count());
        assert_eq!(summary.body_rows, 2);
        for page in 0..canvas.page_count() {
            let headers = texts_on(&canvas, page).iter().filter(|t| *t == "Category").count();
            assert_eq!(headers, 1, "page {} header count", page + 1);
        }
        assert!(cursor.y() <= cursor.limit());
    }

    // A 10mm column fits one "xxx" per line under round_style, so a cell of
    // n words is n lines and 3n + 2 millimetres tall.
    fn narrow() -> Vec<Column> {
        vec![Column::new("Category", 30.0), Column::new("M", 10.0)]
    }

    fn stacked(n: usize) -> Vec<String> {
        vec!["tall".to_string(), vec!["xxx"; n].join(" ")]
    }

    #[test]
    fn test_row_taller_than_room_under_repeated_header_is_split() {
        // Body 80mm, header 5mm: 25 lines (77mm) fit the body but not the
        // room left once the header is repeated.
        let cols = narrow();
        let table = TableRenderer::new(10.0, &cols, round_style());
        let mut canvas = Canvas::new(200.0, 100.0);
        let mut cursor = LayoutCursor::new(100.0, 10.0, 10.0);
        let first = vec!["C0".to_string(), "xxx".to_string()];

        let summary = table.render(&mut canvas, &mut cursor, &[first, stacked(25)]);

        let ops = text_ops(&canvas);
        assert!(ops.iter().all(|(_, y, _)| *y <= cursor.limit()));
        assert_eq!(ops.iter().filter(|(_, _, t)| t == "xxx").count(), 26);
        assert_eq!(canvas.page_count(), 2);
        assert_eq!(summary.header_rows, 2);
    }

    #[test]
    fn test_row_fitting_fresh_page_moves_whole() {
        let cols = narrow();
        let table = TableRenderer::new(10.0, &cols, round_style());
        let mut canvas = Canvas::new(200.0, 100.0);
        let mut cursor = LayoutCursor::new(100.0, 10.0, 10.0);
        let first = vec!["C0".to_string(), "yyy".to_string()];

        // 24 lines = 74mm, within the 75mm under a repeated header
        let summary = table.render(&mut canvas, &mut cursor, &[first, stacked(24)]);

        assert_eq!(summary.header_rows, 2);
        assert!(!texts_on(&canvas, 0).contains(&"xxx".to_string()));
        let second = texts_on(&canvas, 1);
        assert_eq!(second.iter().filter(|t| *t == "xxx").count(), 24);
        assert!(text_ops(&canvas).iter().all(|(_, y, _)| *y <= cursor.limit()));
    }
}
