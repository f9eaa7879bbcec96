//! Fixed-column table writer shared by the landscape reports.
//!
//! Each cell is wrapped to its column width minus 2mm. A row is as tall as its
//! tallest cell (`lines × 6 + 2` mm) and moves to a fresh page, restarting at
//! the top margin, when it would cross the bottom margin.

use crate::layout::font_metrics::PT_TO_MM;
use crate::layout::{FontFace, GreedyLineBreaker, LineBreaker};
use crate::render::{Align, Canvas};

pub const TABLE_MARGIN: f32 = 14.0;
pub const TABLE_FONT_SIZE: f32 = 10.0;
pub const ROW_LINE_HEIGHT: f32 = 6.0;
const ROW_PADDING: f32 = 2.0;
const CELL_PADDING: f32 = 2.0;
/// Leading between wrapped lines inside one cell, as a multiple of the font size.
const CELL_LEADING: f32 = 1.15;
const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub label: &'static str,
    pub width_mm: f32,
}

pub struct TableWriter<'a> {
    columns: &'a [Column],
    y: f32,
}

impl<'a> TableWriter<'a> {
    pub fn new(columns: &'a [Column], start_y: f32) -> Self {
        Self {
            columns,
            y: start_y,
        }
    }

    /// Top of the next row.
    #[cfg(test)]
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Column labels in bold.
    pub fn header(&mut self, canvas: &mut Canvas) {
        let labels: Vec<&str> = self.columns.iter().map(|c| c.label).collect();
        self.draw_row(canvas, &labels, FontFace::HelveticaBold);
    }

    pub fn row<S: AsRef<str>>(&mut self, canvas: &mut Canvas, cells: &[S]) {
        let cells: Vec<&str> = cells.iter().map(AsRef::as_ref).collect();
        self.draw_row(canvas, &cells, FontFace::Helvetica);
    }

    fn draw_row(&mut self, canvas: &mut Canvas, cells: &[&str], face: FontFace) {
        canvas.set_font(face);
        canvas.set_font_size(TABLE_FONT_SIZE);
        let breaker = GreedyLineBreaker::new(canvas.metrics());

        let wrapped: Vec<Vec<String>> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = cells.get(i).copied().unwrap_or("");
                let value = if value.trim().is_empty() {
                    EMPTY_CELL
                } else {
                    value
                };
                breaker.split_to_width(value, column.width_mm - CELL_PADDING)
            })
            .collect();

        let tallest = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let row_height = tallest as f32 * ROW_LINE_HEIGHT + ROW_PADDING;

        if self.y + row_height > canvas.size().height_mm - TABLE_MARGIN {
            canvas.add_page();
            self.y = TABLE_MARGIN;
        }

        let leading = TABLE_FONT_SIZE * CELL_LEADING * PT_TO_MM;
        let mut x = TABLE_MARGIN;
        for (column, lines) in self.columns.iter().zip(&wrapped) {
            for (i, line) in lines.iter().enumerate() {
                canvas.text(line, x, self.y + i as f32 * leading, Align::Left);
            }
            x += column.width_mm;
        }

        self.y += row_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PageSize;

    const COLUMNS: [Column; 3] = [
        Column {
            label: "Nombre",
            width_mm: 60.0,
        },
        Column {
            label: "Cargo",
            width_mm: 30.0,
        },
        Column {
            label: "Email",
            width_mm: 50.0,
        },
    ];

    #[test]
    fn test_header_is_bold_and_laid_out_by_column() {
        let mut canvas = Canvas::new(PageSize::A4_LANDSCAPE);
        let mut table = TableWriter::new(&COLUMNS, 30.0);
        table.header(&mut canvas);

        let items = &canvas.pages()[0].items;
        let xs: Vec<f32> = items.iter().map(|i| i.run.x).collect();
        assert_eq!(xs, vec![14.0, 74.0, 104.0]);
        assert!(items.iter().all(|i| i.font.face == FontFace::HelveticaBold));
        assert!(items.iter().all(|i| i.run.y == 30.0));
        assert_eq!(table.y(), 38.0);
    }

    #[test]
    fn test_blank_cells_render_dash() {
        let mut canvas = Canvas::new(PageSize::A4_LANDSCAPE);
        let mut table = TableWriter::new(&COLUMNS, 30.0);
        table.row(&mut canvas, &["Ana Rivera", "  "]);

        let texts: Vec<&str> = canvas.pages()[0]
            .items
            .iter()
            .map(|i| i.run.text.as_str())
            .collect();
        assert_eq!(texts, vec!["Ana Rivera", "-", "-"]);
        assert!(canvas.pages()[0]
            .items
            .iter()
            .all(|i| i.font.face == FontFace::Helvetica));
    }

    #[test]
    fn test_wrapped_cell_sets_row_height() {
        let mut canvas = Canvas::new(PageSize::A4_LANDSCAPE);
        let mut table = TableWriter::new(&COLUMNS, 30.0);
        table.row(
            &mut canvas,
            &[
                "Ana",
                "Coordinadora de Presupuesto y Planificacion",
                "ana@example.com",
            ],
        );

        let cargo: Vec<f32> = canvas.pages()[0]
            .items
            .iter()
            .filter(|i| i.run.x == 74.0)
            .map(|i| i.run.y)
            .collect();
        assert!(cargo.len() >= 2, "cargo should wrap, got {cargo:?}");
        assert_eq!(cargo[0], 30.0);
        assert!(cargo[1] > 30.0 && cargo[1] < 30.0 + ROW_LINE_HEIGHT);

        let expected = 30.0 + cargo.len() as f32 * ROW_LINE_HEIGHT + 2.0;
        assert!((table.y() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_row_crossing_bottom_margin_starts_new_page() {
        let mut canvas = Canvas::new(PageSize::A4_LANDSCAPE);
        // 190 + 8 > 210 - 14
        let mut table = TableWriter::new(&COLUMNS, 190.0);
        table.row(&mut canvas, &["Ana", "Analista", "ana@example.com"]);

        assert_eq!(canvas.pages().len(), 2);
        assert!(canvas.pages()[0].items.is_empty());
        assert!(canvas.pages()[1].items.iter().all(|i| i.run.y == 14.0));
        assert_eq!(table.y(), 22.0);
    }

    #[test]
    fn test_row_ending_on_bottom_margin_stays() {
        let mut canvas = Canvas::new(PageSize::A4_LANDSCAPE);
        let mut table = TableWriter::new(&COLUMNS, 188.0);
        table.row(&mut canvas, &["Ana", "Analista", "ana@example.com"]);
        assert_eq!(canvas.pages().len(), 1);
        assert_eq!(table.y(), 196.0);
    }
}
