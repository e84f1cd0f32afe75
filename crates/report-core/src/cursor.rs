//! Vertical layout cursor
//!
//! `reserve` is the only place a page break is decided. Section builders ask
//! for the height of the element they are about to draw, draw it at `y()`,
//! then `advance` past it.

use crate::canvas::Canvas;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    y: f32,
    top_margin: f32,
    bottom_margin: f32,
    page_height: f32,
}

impl LayoutCursor {
    /// Cursor positioned at the top margin
    pub fn new(page_height: f32, top_margin: f32, bottom_margin: f32) -> Self {
        Self {
            y: top_margin,
            top_margin,
            bottom_margin,
            page_height,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn top_margin(&self) -> f32 {
        self.top_margin
    }

    /// Lowest y content may reach on a page
    pub fn limit(&self) -> f32 {
        self.page_height - self.bottom_margin
    }

    pub fn remaining(&self) -> f32 {
        (self.limit() - self.y).max(0.0)
    }

    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.limit()
    }

    /// Make room for `height` millimetres.
    ///
    /// Starts a new page when the element would cross the bottom margin and
    /// returns `true` in that case. A cursor already at the top of a page never
    /// breaks; an element taller than a whole page is drawn there and overflows.
    pub fn reserve(&mut self, canvas: &mut Canvas, height: f32) -> bool {
        if self.fits(height) || self.y <= self.top_margin {
            return false;
        }
        self.break_page(canvas);
        tracing::debug!(
            "Page break before {:.1}mm element, now on page {}",
            height,
            canvas.current_page() + 1
        );
        true
    }

    /// Start a new page unconditionally
    pub fn break_page(&mut self, canvas: &mut Canvas) {
        canvas.new_page();
        self.y = self.top_margin;
    }

    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }

    /// Jump to an absolute position on the current page
    pub fn move_to(&mut self, y: f32) {
        self.y = y;
    }
}
