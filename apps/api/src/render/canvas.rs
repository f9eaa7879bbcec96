//! In-memory page recorder. Coordinates are millimetres from the top-left
//! corner, y growing downward, matching how the documents are laid out.

use crate::layout::{DrawSink, FontFace, FontMetrics, Spacing, TextMeasurer, TextRun};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageSize {
    pub const A4_PORTRAIT: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    pub const A4_LANDSCAPE: PageSize = PageSize {
        width_mm: 297.0,
        height_mm: 210.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    #[cfg(test)]
    Right,
}

/// A run together with the font it was drawn in.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub run: TextRun,
    pub font: FontMetrics,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PlacedText>,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    size: PageSize,
    font: FontMetrics,
    pages: Vec<Page>,
}

impl Canvas {
    /// Starts a document with one empty page, Helvetica 16pt selected.
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            font: FontMetrics::new(FontFace::Helvetica, 16.0),
            pages: vec![Page::default()],
        }
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn set_font(&mut self, face: FontFace) {
        self.font.face = face;
    }

    pub fn set_font_size(&mut self, size_pt: f32) {
        self.font.size_pt = size_pt;
    }

    /// Metrics of the currently selected font.
    pub fn metrics(&self) -> FontMetrics {
        self.font
    }

    /// Draws a single line; `x` is the anchor for the chosen alignment.
    pub fn text(&mut self, s: &str, x: f32, y: f32, align: Align) {
        let width = self.font.measure(s);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            #[cfg(test)]
            Align::Right => x - width,
        };
        self.draw_text(TextRun {
            text: s.to_string(),
            x: left,
            y,
            spacing: Spacing::Natural,
        });
    }

    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn current_page_mut(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl DrawSink for Canvas {
    fn draw_text(&mut self, run: TextRun) {
        let font = self.font;
        self.current_page_mut().items.push(PlacedText { run, font });
    }
}
