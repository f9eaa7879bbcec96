//! Left-and-right justification of a paragraph onto a fixed-width page.
//!
//! # Algorithm
//! 1. `safe_width = max_width - SAFE_WIDTH_SHRINK` so rounding in the breaker never
//!    pushes a line past the nominal width.
//! 2. The `LineBreaker` splits the paragraph into lines fitting `safe_width`.
//! 3. Each line is laid out independently and drawn at `(x, y)`; `y` then advances
//!    by `line_height`. Every multi-word line is justified, the last one included.
//!
//! Single-word lines and lines without positive slack are drawn as produced.
//!
//! # Strategies
//! - `Exact` keeps single spaces in the text and reports a real-valued inter-word
//!   gap, so the drawn line meets `safe_width` exactly.
//! - `SpaceFill` pads gaps with repeated space characters and runs one corrective
//!   pass, matching the spacing of previously issued documents. The corrective pass
//!   only adds spaces, so a line that overshoots after the first distribution
//!   stays overshot.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::layout::font_metrics::TextMeasurer;
use crate::layout::line_break::LineBreaker;

/// Shrink applied to the requested width before breaking lines.
pub const SAFE_WIDTH_SHRINK: f32 = 0.5;

/// Maximum accepted distance between a justified line and `safe_width`.
pub const LAYOUT_TOLERANCE: f32 = 0.2;

// ────────────────────────────────────────────────────────────────────────────
// Draw instructions
// ────────────────────────────────────────────────────────────────────────────

/// How the words of a drawn run are spaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Spacing {
    /// Draw the text exactly as given.
    Natural,
    /// Words are single-space separated in `text`; each gap is drawn `gap` wide.
    InterWord { gap: f32 },
}

/// One left-aligned text instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub spacing: Spacing,
}

impl TextRun {
    /// Width the run occupies when drawn with `measurer`.
    #[cfg(test)]
    pub fn rendered_width<M: TextMeasurer + ?Sized>(&self, measurer: &M) -> f32 {
        match self.spacing {
            Spacing::Natural => measurer.measure(&self.text),
            Spacing::InterWord { gap } => {
                let mut words = 0usize;
                let mut width = 0.0_f32;
                for word in self.text.split_whitespace() {
                    width += measurer.measure(word);
                    words += 1;
                }
                width + gap * words.saturating_sub(1) as f32
            }
        }
    }
}

/// Receives one instruction per laid-out line.
pub trait DrawSink {
    fn draw_text(&mut self, run: TextRun);
}

impl DrawSink for Vec<TextRun> {
    fn draw_text(&mut self, run: TextRun) {
        self.push(run);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors and strategy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JustifyError {
    #[error("cannot justify empty text")]
    EmptyText,

    #[error("line width must exceed the 0.5 safety margin, got {0}")]
    NonPositiveWidth(f32),

    #[error("line height must be positive, got {0}")]
    NonPositiveLineHeight(f32),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JustifyStrategy {
    #[default]
    Exact,
    SpaceFill,
}

impl FromStr for JustifyStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "space_fill" | "space-fill" => Ok(Self::SpaceFill),
            other => Err(format!(
                "unknown justify strategy '{other}' (expected 'exact' or 'space_fill')"
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Justifier
// ────────────────────────────────────────────────────────────────────────────

pub struct Justifier<M, B> {
    measurer: M,
    breaker: B,
    strategy: JustifyStrategy,
}

impl<M: TextMeasurer, B: LineBreaker> Justifier<M, B> {
    pub fn new(measurer: M, breaker: B) -> Self {
        Self {
            measurer,
            breaker,
            strategy: JustifyStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: JustifyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Lays `text` out as justified lines starting at baseline `y`, drawing each
    /// line at `x` into `sink`. Returns the y just below the last line
    /// (`y + lines × line_height`).
    ///
    /// Preconditions are checked before anything is drawn.
    pub fn justify<S: DrawSink + ?Sized>(
        &self,
        sink: &mut S,
        text: &str,
        x: f32,
        y: f32,
        max_width: f32,
        line_height: f32,
    ) -> Result<f32, JustifyError> {
        if text.trim().is_empty() {
            return Err(JustifyError::EmptyText);
        }
        let safe_width = max_width - SAFE_WIDTH_SHRINK;
        if !max_width.is_finite() || safe_width <= 0.0 {
            return Err(JustifyError::NonPositiveWidth(max_width));
        }
        if !line_height.is_finite() || line_height <= 0.0 {
            return Err(JustifyError::NonPositiveLineHeight(line_height));
        }

        let lines = self.breaker.split_to_width(text, safe_width);
        let mut current_y = y;

        for line in &lines {
            let (text, spacing) = self.layout_line(line, safe_width);
            sink.draw_text(TextRun {
                text,
                x,
                y: current_y,
                spacing,
            });
            current_y += line_height;
        }

        debug!(
            lines = lines.len(),
            safe_width,
            final_y = current_y,
            strategy = ?self.strategy,
            "Justified paragraph"
        );
        Ok(current_y)
    }

    /// Lays out one broken line. Lines with fewer than two words or without
    /// positive slack come back untouched.
    fn layout_line(&self, line: &str, safe_width: f32) -> (String, Spacing) {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 2 {
            return (line.to_string(), Spacing::Natural);
        }

        let text_width: f32 = words.iter().map(|w| self.measurer.measure(w)).sum();
        let gaps = words.len() - 1;
        let slack = safe_width - text_width;

        if slack <= 0.0 {
            if slack < 0.0 {
                debug!(
                    overflow = -slack,
                    "Line wider than safe width; drawn unjustified"
                );
            }
            return (line.to_string(), Spacing::Natural);
        }

        match self.strategy {
            JustifyStrategy::Exact => (
                words.join(" "),
                Spacing::InterWord {
                    gap: slack / gaps as f32,
                },
            ),
            JustifyStrategy::SpaceFill => {
                (self.space_fill(&words, slack, safe_width), Spacing::Natural)
            }
        }
    }

    fn space_fill(&self, words: &[&str], slack: f32, safe_width: f32) -> String {
        let gaps = words.len() - 1;
        let space_w = self.measurer.measure(" ");
        if space_w <= 0.0 {
            return words.join(" ");
        }

        let spaces_needed = slack / space_w;
        let per_gap = spaces_needed / gaps as f32;
        let base = per_gap.floor();
        let extra = ((per_gap - base) * gaps as f32).round() as usize;
        let base = base as usize;

        // Gap i (1-indexed) holds the separating space plus its share.
        let mut line = join_with_gaps(words, |i| 1 + base + usize::from(i <= extra));

        let difference = safe_width - self.measurer.measure(&line);
        if difference.abs() > LAYOUT_TOLERANCE && difference > 0.0 {
            let spaces_to_add = (difference / gaps as f32 / space_w).ceil() as usize;
            if spaces_to_add > 0 {
                line = join_with_gaps(words, |_| 1 + spaces_to_add);
            }
        }
        line
    }
}

/// Joins `words`, filling gap `i` (1-indexed) with `spaces(i)` space characters.
fn join_with_gaps(words: &[&str], spaces: impl Fn(usize) -> usize) -> String {
    let mut line = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            line.extend(std::iter::repeat(' ').take(spaces(i)));
        }
        line.push_str(word);
    }
    line
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{FontFace, FontMetrics};
    use crate::layout::line_break::GreedyLineBreaker;

    /// Every character, space included, is `self.0` units wide.
    #[derive(Clone, Copy)]
    struct Mono(f32);

    impl TextMeasurer for Mono {
        fn measure(&self, s: &str) -> f32 {
            s.chars().count() as f32 * self.0
        }
    }

    /// Runs of spaces measure as a single space, like a renderer that collapses
    /// whitespace. Makes the space-fill corrective pass observable.
    #[derive(Clone, Copy)]
    struct Collapsing;

    impl TextMeasurer for Collapsing {
        fn measure(&self, s: &str) -> f32 {
            let mut width = 0.0;
            let mut in_space = false;
            for c in s.chars() {
                if c == ' ' {
                    if !in_space {
                        width += 1.0;
                    }
                    in_space = true;
                } else {
                    width += 1.0;
                    in_space = false;
                }
            }
            width
        }
    }

    /// Returns pre-broken lines regardless of width.
    struct Fixed(Vec<&'static str>);

    impl LineBreaker for Fixed {
        fn split_to_width(&self, _text: &str, _width: f32) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    fn times_12() -> FontMetrics {
        FontMetrics::new(FontFace::TimesRoman, 12.0)
    }

    fn times_justifier(
        strategy: JustifyStrategy,
    ) -> Justifier<FontMetrics, GreedyLineBreaker<FontMetrics>> {
        let metrics = times_12();
        Justifier::new(metrics, GreedyLineBreaker::new(metrics)).with_strategy(strategy)
    }

    const PARAGRAPH: &str = "Quien suscribe, Dr. LUIS EDUARDO MORENO, titular de la Cédula de \
        Identidad N° V-11.116.500, en mi carácter de Director de Gestión Humana del Consejo \
        Legislativo del Estado Bolivariano de Guárico (CLEBG), por medio de la presente hago \
        constar que el Ciudadano: Pedro Pérez, se encuentra adscrito a esta dependencia.";

    // ── scenarios ───────────────────────────────────────────────────────────

    #[test]
    fn test_quick_brown_fox_fills_safe_width() {
        let justifier = times_justifier(JustifyStrategy::Exact);
        let mut runs: Vec<TextRun> = Vec::new();
        let final_y = justifier
            .justify(&mut runs, "The quick brown fox", 20.0, 70.0, 100.0, 7.0)
            .unwrap();

        assert_eq!(final_y, 77.0);
        assert_eq!(runs.len(), 1);
        let run = &runs[0];
        assert_eq!((run.x, run.y), (20.0, 70.0));
        let words: Vec<&str> = run.text.split_whitespace().collect();
        assert_eq!(words, vec!["The", "quick", "brown", "fox"]);
        let width = run.rendered_width(&times_12());
        assert!(
            (width - 99.5).abs() <= LAYOUT_TOLERANCE,
            "justified width should be ~99.5, got {width}"
        );
    }

    #[test]
    fn test_single_word_is_left_untouched() {
        let justifier = times_justifier(JustifyStrategy::Exact);
        let mut runs: Vec<TextRun> = Vec::new();
        let final_y = justifier
            .justify(&mut runs, "Constancia", 20.0, 50.0, 170.0, 7.0)
            .unwrap();

        assert_eq!(final_y, 57.0);
        assert_eq!(
            runs,
            vec![TextRun {
                text: "Constancia".to_string(),
                x: 20.0,
                y: 50.0,
                spacing: Spacing::Natural,
            }]
        );
    }

    #[test]
    fn test_three_lines_advance_three_line_heights() {
        let justifier = Justifier::new(Mono(1.0), GreedyLineBreaker::new(Mono(1.0)));
        let mut runs: Vec<TextRun> = Vec::new();
        let final_y = justifier
            .justify(&mut runs, "aaaa bbbb cccc dddd eeee ffff", 0.0, 10.0, 10.5, 6.0)
            .unwrap();

        assert_eq!(runs.len(), 3);
        assert_eq!(final_y, 10.0 + 3.0 * 6.0);
        let ys: Vec<f32> = runs.iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![10.0, 16.0, 22.0]);
    }

    // ── properties ──────────────────────────────────────────────────────────

    #[test]
    fn test_exact_width_bound_on_every_multi_word_line() {
        let metrics = times_12();
        let justifier = times_justifier(JustifyStrategy::Exact);
        let mut runs: Vec<TextRun> = Vec::new();
        justifier
            .justify(&mut runs, PARAGRAPH, 20.0, 70.0, 170.0, 7.0)
            .unwrap();

        assert!(runs.len() > 2);
        for run in &runs {
            if let Spacing::InterWord { .. } = run.spacing {
                let width = run.rendered_width(&metrics);
                assert!(
                    (width - 169.5).abs() <= LAYOUT_TOLERANCE,
                    "line '{}' width {width} outside tolerance",
                    run.text
                );
            }
        }
    }

    #[test]
    fn test_words_are_preserved_in_order() {
        for strategy in [JustifyStrategy::Exact, JustifyStrategy::SpaceFill] {
            let justifier = times_justifier(strategy);
            let mut runs: Vec<TextRun> = Vec::new();
            justifier
                .justify(&mut runs, PARAGRAPH, 20.0, 70.0, 120.0, 7.0)
                .unwrap();

            let emitted: Vec<&str> = runs
                .iter()
                .flat_map(|r| r.text.split_whitespace())
                .collect();
            let original: Vec<&str> = PARAGRAPH.split_whitespace().collect();
            assert_eq!(emitted, original, "strategy {strategy:?}");
        }
    }

    #[test]
    fn test_justify_is_idempotent() {
        for strategy in [JustifyStrategy::Exact, JustifyStrategy::SpaceFill] {
            let justifier = times_justifier(strategy);
            let mut first: Vec<TextRun> = Vec::new();
            let mut second: Vec<TextRun> = Vec::new();
            let y1 = justifier
                .justify(&mut first, PARAGRAPH, 20.0, 70.0, 170.0, 7.0)
                .unwrap();
            let y2 = justifier
                .justify(&mut second, PARAGRAPH, 20.0, 70.0, 170.0, 7.0)
                .unwrap();
            assert_eq!(first, second);
            assert_eq!(y1, y2);
        }
    }

    #[test]
    fn test_last_line_is_justified_too() {
        let justifier = Justifier::new(Mono(1.0), GreedyLineBreaker::new(Mono(1.0)));
        let mut runs: Vec<TextRun> = Vec::new();
        justifier
            .justify(&mut runs, "aaaa bbbb cc d", 0.0, 0.0, 10.5, 5.0)
            .unwrap();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].text, "cc d");
        assert_eq!(runs[1].spacing, Spacing::InterWord { gap: 7.0 });
    }

    // ── slack edge cases ────────────────────────────────────────────────────

    #[test]
    fn test_zero_slack_skips_justification() {
        let justifier = Justifier::new(Mono(1.0), Fixed(vec!["abcd efgh"]));
        let mut runs: Vec<TextRun> = Vec::new();
        justifier
            .justify(&mut runs, "abcd efgh", 0.0, 0.0, 8.5, 5.0)
            .unwrap();
        assert_eq!(runs[0].text, "abcd efgh");
        assert_eq!(runs[0].spacing, Spacing::Natural);
    }

    #[test]
    fn test_negative_slack_is_drawn_as_is() {
        let justifier = Justifier::new(Mono(1.0), Fixed(vec!["abcdef  ghijkl"]))
            .with_strategy(JustifyStrategy::SpaceFill);
        let mut runs: Vec<TextRun> = Vec::new();
        let final_y = justifier
            .justify(&mut runs, "abcdef ghijkl", 0.0, 0.0, 8.5, 5.0)
            .unwrap();
        assert_eq!(runs[0].text, "abcdef  ghijkl");
        assert_eq!(runs[0].spacing, Spacing::Natural);
        assert_eq!(final_y, 5.0);
    }

    #[test]
    fn test_zero_slack_keeps_breaker_spacing() {
        // Two six-letter words fill the 12-wide safe width exactly.
        let justifier = Justifier::new(Mono(1.0), Fixed(vec!["abcdef   ghijkl"]));
        let mut runs: Vec<TextRun> = Vec::new();
        justifier
            .justify(&mut runs, "abcdef ghijkl", 0.0, 0.0, 12.5, 5.0)
            .unwrap();
        assert_eq!(runs[0].text, "abcdef   ghijkl");
        assert_eq!(runs[0].spacing, Spacing::Natural);
    }

    // ── space-fill parity ───────────────────────────────────────────────────

    #[test]
    fn test_space_fill_distributes_base_and_extra_spaces() {
        // slack 13 → 6.5 spaces per gap: base 6, one extra to the first gap.
        let justifier = Justifier::new(Mono(1.0), Fixed(vec!["ab cd ef"]))
            .with_strategy(JustifyStrategy::SpaceFill);
        let mut runs: Vec<TextRun> = Vec::new();
        justifier
            .justify(&mut runs, "ab cd ef", 0.0, 0.0, 19.5, 5.0)
            .unwrap();

        let expected = format!("ab{}cd{}ef", " ".repeat(8), " ".repeat(7));
        assert_eq!(runs[0].text, expected);
        assert_eq!(runs[0].spacing, Spacing::Natural);
    }

    #[test]
    fn test_space_fill_overshoot_is_not_corrected() {
        // slack 14 → 7 per gap, plus the separating space: 22 > 20.
        let justifier = Justifier::new(Mono(1.0), Fixed(vec!["ab cd ef"]))
            .with_strategy(JustifyStrategy::SpaceFill);
        let mut runs: Vec<TextRun> = Vec::new();
        justifier
            .justify(&mut runs, "ab cd ef", 0.0, 0.0, 20.5, 5.0)
            .unwrap();

        let expected = format!("ab{}cd{}ef", " ".repeat(8), " ".repeat(8));
        assert_eq!(runs[0].text, expected);
        assert_eq!(Mono(1.0).measure(&runs[0].text), 22.0);
    }

    #[test]
    fn test_space_fill_single_corrective_pass_when_underfilled() {
        // Collapsing measurer: first build measures 8 against 20, so one pass
        // adds ceil(12 / 2 / 1) = 6 spaces to every gap.
        let justifier = Justifier::new(Collapsing, Fixed(vec!["ab cd ef"]))
            .with_strategy(JustifyStrategy::SpaceFill);
        let mut runs: Vec<TextRun> = Vec::new();
        justifier
            .justify(&mut runs, "ab cd ef", 0.0, 0.0, 20.5, 5.0)
            .unwrap();

        let expected = format!("ab{}cd{}ef", " ".repeat(7), " ".repeat(7));
        assert_eq!(runs[0].text, expected);
    }

    // ── preconditions ───────────────────────────────────────────────────────

    #[test]
    fn test_rejects_empty_and_blank_text() {
        let justifier = times_justifier(JustifyStrategy::Exact);
        let mut runs: Vec<TextRun> = Vec::new();
        assert_eq!(
            justifier.justify(&mut runs, "", 0.0, 0.0, 100.0, 7.0),
            Err(JustifyError::EmptyText)
        );
        assert_eq!(
            justifier.justify(&mut runs, " \n ", 0.0, 0.0, 100.0, 7.0),
            Err(JustifyError::EmptyText)
        );
        assert!(runs.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_width() {
        let justifier = times_justifier(JustifyStrategy::Exact);
        let mut runs: Vec<TextRun> = Vec::new();
        for width in [0.0, -3.0, 0.5, f32::NAN, f32::INFINITY] {
            let result = justifier.justify(&mut runs, "texto", 0.0, 0.0, width, 7.0);
            assert!(
                matches!(result, Err(JustifyError::NonPositiveWidth(_))),
                "width {width} should be rejected"
            );
        }
        assert!(runs.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_line_height() {
        let justifier = times_justifier(JustifyStrategy::Exact);
        let mut runs: Vec<TextRun> = Vec::new();
        assert_eq!(
            justifier.justify(&mut runs, "texto", 0.0, 0.0, 100.0, 0.0),
            Err(JustifyError::NonPositiveLineHeight(0.0))
        );
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "exact".parse::<JustifyStrategy>(),
            Ok(JustifyStrategy::Exact)
        );
        assert_eq!(
            "Space_Fill".parse::<JustifyStrategy>(),
            Ok(JustifyStrategy::SpaceFill)
        );
        assert_eq!(
            "space-fill".parse::<JustifyStrategy>(),
            Ok(JustifyStrategy::SpaceFill)
        );
        assert!("ragged".parse::<JustifyStrategy>().is_err());
    }
}
