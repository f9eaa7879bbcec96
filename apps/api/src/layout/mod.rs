// Text layout for generated documents: font metrics, greedy line breaking and
// paragraph justification. Everything here is pure and synchronous.

pub mod font_metrics;
pub mod justify;
pub mod line_break;

// Re-export the public API consumed by the renderer and document builders.
pub use font_metrics::{FontFace, FontMetrics, TextMeasurer};
pub use justify::{DrawSink, JustifyError, JustifyStrategy, Justifier, Spacing, TextRun};
pub use line_break::{GreedyLineBreaker, LineBreaker};
