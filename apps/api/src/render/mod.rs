// Page recording and PDF output for generated documents.

pub mod canvas;
pub mod pdf;

pub use canvas::{Align, Canvas, PageSize};
pub use pdf::render_pdf;
