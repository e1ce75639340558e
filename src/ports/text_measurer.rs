//! Text Measurer Port - Width-aware line wrapping.
//!
//! The layout engine never measures glyphs itself. It asks this port how a
//! string wraps at a given width and how tall one line is, so the same layout
//! code can sit on top of different font metrics.

use crate::domain::report::Font;

/// Port for measuring text in a given font.
///
/// # Contract
///
/// Implementations must:
/// - Return at least one line, even for empty text
/// - Honour explicit line breaks in the input
/// - Never return a line wider than `width` unless a single glyph is wider
/// - Return a positive, finite line height
pub trait TextMeasurer: Send + Sync {
    /// Wrap `text` into lines no wider than `width` points.
    fn wrap(&self, text: &str, width: f32, font: &Font) -> Vec<String>;

    /// Height of one line of text, including leading.
    fn line_height(&self, font: &Font) -> f32;

    /// Height of `text` once wrapped at `width`.
    fn height_of(&self, text: &str, width: f32, font: &Font) -> f32 {
        let lines = self.wrap(text, width, font).len().max(1);
        lines as f32 * self.line_height(font)
    }
}
