//! Average-glyph-width text measurer.
//!
//! Approximates proportional font metrics with a fixed average advance per
//! weight, then delegates the actual line breaking to `textwrap`.

use textwrap::Options;

use crate::domain::report::{Font, FontWeight};
use crate::ports::TextMeasurer;

/// Average glyph advance of a Helvetica-like regular face, as a fraction of size.
const REGULAR_ADVANCE: f32 = 0.5;

/// Average glyph advance of a Helvetica-like bold face, as a fraction of size.
const BOLD_ADVANCE: f32 = 0.55;

/// Line height as a multiple of font size.
const DEFAULT_LEADING: f32 = 1.2;

/// Text measurer backed by average glyph widths and `textwrap`.
///
/// # Example
///
/// ```rust,ignore
/// let measurer = MetricTextMeasurer::new();
/// let lines = measurer.wrap("A long justification", 190.0, &Font::regular(11.0));
/// ```
#[derive(Debug, Clone)]
pub struct MetricTextMeasurer {
    regular_advance: f32,
    bold_advance: f32,
    leading: f32,
}

impl MetricTextMeasurer {
    pub fn new() -> Self {
        Self {
            regular_advance: REGULAR_ADVANCE,
            bold_advance: BOLD_ADVANCE,
            leading: DEFAULT_LEADING,
        }
    }

    /// Override the line height multiplier.
    pub fn with_leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    /// Average advance of one glyph in points.
    fn glyph_width(&self, font: &Font) -> f32 {
        let factor = match font.weight {
            FontWeight::Regular => self.regular_advance,
            FontWeight::Bold => self.bold_advance,
        };
        (font.size * factor).max(f32::EPSILON)
    }

    /// Number of glyphs that fit in `width`, never less than one.
    pub fn columns_for(&self, width: f32, font: &Font) -> usize {
        let columns = (width / self.glyph_width(font)).floor();
        if columns.is_finite() && columns >= 1.0 {
            columns as usize
        } else {
            1
        }
    }
}

impl Default for MetricTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for MetricTextMeasurer {
    fn wrap(&self, text: &str, width: f32, font: &Font) -> Vec<String> {
        let options = Options::new(self.columns_for(width, font));
        let lines: Vec<String> = textwrap::wrap(text, options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        }
    }

    fn line_height(&self, font: &Font) -> f32 {
        font.size * self.leading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurer() -> MetricTextMeasurer {
        MetricTextMeasurer::new()
    }

    #[test]
    fn columns_follow_font_size_and_weight() {
        let m = measurer();
        // 190pt / (11pt * 0.5) = 34.5
        assert_eq!(m.columns_for(190.0, &Font::regular(11.0)), 34);
        assert!(m.columns_for(190.0, &Font::bold(11.0)) < 34);
        assert_eq!(m.columns_for(0.0, &Font::regular(11.0)), 1);
    }

    #[test]
    fn short_text_fits_on_one_line() {
        let lines = measurer().wrap("Laptop", 190.0, &Font::regular(11.0));
        assert_eq!(lines, vec!["Laptop"]);
    }

    #[test]
    fn long_text_wraps_within_column() {
        let m = measurer();
        let font = Font::regular(11.0);
        let text = "Needed for running the simulations and field data collection over six months";
        let lines = m.wrap(text, 190.0, &font);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.chars().count() <= 34));
    }

    #[test]
    fn explicit_newlines_are_kept() {
        let lines = measurer().wrap("first\nsecond", 500.0, &Font::regular(12.0));
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn empty_text_is_one_line() {
        let m = measurer();
        let font = Font::regular(12.0);
        assert_eq!(m.wrap("", 100.0, &font).len(), 1);
        assert_eq!(m.height_of("", 100.0, &font), m.line_height(&font));
    }

    #[test]
    fn line_height_uses_leading() {
        let m = measurer().with_leading(1.5);
        assert_eq!(m.line_height(&Font::regular(10.0)), 15.0);
    }
}
