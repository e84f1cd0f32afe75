//! Page-addressable drawing surface
//!
//! Drawing happens in millimetres with the origin at the top-left corner of the
//! page, y growing downwards. Each page keeps a display list of [`DrawOp`]s so
//! that earlier pages can be revisited (the footer pass does this) before the
//! whole document is encoded to PDF with lopdf.

use crate::error::{ReportError, Result};
use crate::palette::Rgb;
use crate::text::{encode_win_ansi, text_width, Font, MM_PER_PT};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Rgb,
    pub font: Font,
    pub align: Align,
}

impl TextStyle {
    pub fn new(size: f32, color: Rgb) -> Self {
        Self {
            size,
            color,
            font: Font::Regular,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.font = Font::Bold;
        self
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// One recorded drawing primitive. Text `x` is always the left edge after
/// alignment has been resolved; `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        line_width: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        color: Rgb,
        font: Font,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    ops: Vec<DrawOp>,
}

impl Page {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text runs on this page in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Metadata written to the PDF Info dictionary
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub producer: String,
    /// PDF date string, e.g. `D:20261016093000Z`
    pub creation_date: String,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: f32,
    height: f32,
    line_width: f32,
    pages: Vec<Page>,
    current: usize,
}

impl Canvas {
    /// Create a canvas with a single empty page
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            line_width: 0.2,
            pages: vec![Page::default()],
            current: 0,
        }
    }

    pub fn a4() -> Self {
        Self::new(A4_WIDTH_MM, A4_HEIGHT_MM)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_line_width(&mut self, line_width: f32) {
        self.line_width = line_width;
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let line_width = self.line_width;
        self.push(DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            color,
            line_width,
        });
    }

    /// Left-aligned regular text with its baseline at `y`
    pub fn text(&mut self, x: f32, y: f32, text: &str, size: f32, color: Rgb) {
        self.styled_text(x, y, text, &TextStyle::new(size, color));
    }

    /// Text anchored at `x` according to the style's alignment
    pub fn styled_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) {
        let left = match style.align {
            Align::Left => x,
            Align::Center => x - text_width(text, style.size, style.font) / 2.0,
            Align::Right => x - text_width(text, style.size, style.font),
        };
        self.push(DrawOp::Text {
            x: left,
            y,
            text: text.to_string(),
            size: style.size,
            color: style.color,
            font: style.font,
        });
    }

    /// Append a page and make it current. Returns its 0-based index.
    pub fn new_page(&mut self) -> usize {
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 0-based index of the page receiving draw calls
    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Redirect drawing to an existing page. Out-of-range indices are ignored.
    pub fn select_page(&mut self, index: usize) -> bool {
        if index < self.pages.len() {
            self.current = index;
            true
        } else {
            tracing::warn!(
                "Ignoring selection of page {} (canvas has {} pages)",
                index,
                self.pages.len()
            );
            false
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    fn push(&mut self, op: DrawOp) {
        self.pages[self.current].ops.push(op);
    }

    /// Encode every page into a PDF document
    pub fn to_pdf(&self, info: &DocumentInfo, compress: bool) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let regular_id = add_font(&mut doc, Font::Regular);
        let bold_id = add_font(&mut doc, Font::Bold);
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                Font::Regular.resource_name() => regular_id,
                Font::Bold.resource_name() => bold_id,
            },
        });

        let mut page_ids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content = Content {
                operations: self.page_operations(page),
            };
            let encoded = content
                .encode()
                .map_err(|e| ReportError::Serialization(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Real(self.width * pt_per_mm()),
                    Object::Real(self.height * pt_per_mm()),
                ],
                "Resources" => resources_id,
                "Contents" => content_id,
            });
            page_ids.push(page_id);
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => page_ids.len() as i64,
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));

        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(encode_win_ansi(&info.title), StringFormat::Literal),
            "Producer" => Object::String(encode_win_ansi(&info.producer), StringFormat::Literal),
            "CreationDate" => Object::string_literal(info.creation_date.as_str()),
        });
        doc.trailer.set("Info", Object::Reference(info_id));

        if compress {
            doc.compress();
        }

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| ReportError::Serialization(format!("Save failed: {}", e)))?;
        Ok(buffer)
    }

    fn page_operations(&self, page: &Page) -> Vec<Operation> {
        let k = pt_per_mm();
        let mut ops = Vec::new();

        for op in &page.ops {
            match op {
                DrawOp::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => {
                    ops.push(Operation::new("q", vec![]));
                    ops.push(color_op("rg", *color));
                    ops.push(self.rect_op(*x, *y, *width, *height));
                    ops.push(Operation::new("f", vec![]));
                    ops.push(Operation::new("Q", vec![]));
                }
                DrawOp::StrokeRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                    line_width,
                } => {
                    ops.push(Operation::new("q", vec![]));
                    ops.push(color_op("RG", *color));
                    ops.push(Operation::new("w", vec![Object::Real(line_width * k)]));
                    ops.push(self.rect_op(*x, *y, *width, *height));
                    ops.push(Operation::new("S", vec![]));
                    ops.push(Operation::new("Q", vec![]));
                }
                DrawOp::Text {
                    x,
                    y,
                    text,
                    size,
                    color,
                    font,
                } => {
                    ops.push(Operation::new("BT", vec![]));
                    ops.push(Operation::new(
                        "Tf",
                        vec![
                            Object::Name(font.resource_name().as_bytes().to_vec()),
                            Object::Real(*size),
                        ],
                    ));
                    ops.push(color_op("rg", *color));
                    ops.push(Operation::new(
                        "Td",
                        vec![Object::Real(x * k), Object::Real((self.height - y) * k)],
                    ));
                    ops.push(Operation::new(
                        "Tj",
                        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                    ));
                    ops.push(Operation::new("ET", vec![]));
                }
            }
        }
        ops
    }

    /// `re` operator for a top-left anchored rectangle
    fn rect_op(&self, x: f32, y: f32, width: f32, height: f32) -> Operation {
        let k = pt_per_mm();
        Operation::new(
            "re",
            vec![
                Object::Real(x * k),
                Object::Real((self.height - y - height) * k),
                Object::Real(width * k),
                Object::Real(height * k),
            ],
        )
    }
}

fn pt_per_mm() -> f32 {
    1.0 / MM_PER_PT
}

fn color_op(operator: &str, color: Rgb) -> Operation {
    let (r, g, b) = color.components();
    Operation::new(
        operator,
        vec![Object::Real(r), Object::Real(g), Object::Real(b)],
    )
}

fn add_font(doc: &mut Document, font: Font) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    })
}
