//! Greedy word-wrap used by the justifier and the visitor report cells.

use crate::layout::font_metrics::TextMeasurer;

/// Splits a paragraph into lines that each fit within `width`.
pub trait LineBreaker {
    fn split_to_width(&self, text: &str, width: f32) -> Vec<String>;
}

/// First-fit word wrap over a `TextMeasurer`.
///
/// Words are separated by any whitespace (embedded newlines included) and are
/// re-joined with single spaces. A word wider than `width` is never split; it
/// occupies a line of its own.
#[derive(Debug, Clone, Copy)]
pub struct GreedyLineBreaker<M> {
    measurer: M,
}

impl<M: TextMeasurer> GreedyLineBreaker<M> {
    pub fn new(measurer: M) -> Self {
        Self { measurer }
    }
}

impl<M: TextMeasurer> LineBreaker for GreedyLineBreaker<M> {
    fn split_to_width(&self, text: &str, width: f32) -> Vec<String> {
        let space_w = self.measurer.measure(" ");
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.measurer.measure(word);

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}
