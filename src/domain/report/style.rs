//! Text styling for rendered blocks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    Bold,
}

/// A font face at a point size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub weight: FontWeight,
    pub size: f32,
}

impl Font {
    pub const fn regular(size: f32) -> Self {
        Self {
            weight: FontWeight::Regular,
            size,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    /// Accent used for the feedback section title.
    pub const ACCENT: Color = Color(44, 102, 154);

    /// CSS `rgb(...)` form.
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Complete presentation of one block of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: Font,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub underline: bool,
}

impl TextStyle {
    pub const fn new(font: Font) -> Self {
        Self {
            font,
            align: Align::Left,
            color: Color::BLACK,
            underline: false,
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// The fixed style sheet of a proposal report.
pub mod sheet {
    use super::{Color, Font, TextStyle};

    pub const BODY: Font = Font::regular(12.0);
    pub const TABLE_BODY: Font = Font::regular(11.0);
    pub const TABLE_HEADER: Font = Font::bold(12.0);

    pub fn title() -> TextStyle {
        TextStyle::new(Font::bold(24.0)).centered()
    }

    pub fn subtitle() -> TextStyle {
        TextStyle::new(BODY).centered()
    }

    pub fn section() -> TextStyle {
        TextStyle::new(Font::bold(16.0)).underlined()
    }

    pub fn field_label() -> TextStyle {
        TextStyle::new(Font::bold(14.0))
    }

    pub fn body() -> TextStyle {
        TextStyle::new(BODY)
    }

    pub fn strong() -> TextStyle {
        TextStyle::new(Font::bold(12.0))
    }

    pub fn feedback_title() -> TextStyle {
        TextStyle::new(Font::bold(20.0)).centered().colored(Color::ACCENT)
    }

    pub fn feedback_major() -> TextStyle {
        TextStyle::new(Font::bold(14.0))
    }

    pub fn feedback_sub() -> TextStyle {
        TextStyle::new(Font::bold(12.0))
    }

    pub fn footer() -> TextStyle {
        TextStyle::new(Font::regular(10.0)).centered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_compose() {
        let style = TextStyle::new(Font::bold(16.0)).underlined().centered();
        assert!(style.underline);
        assert_eq!(style.align, Align::Center);
        assert!(style.font.is_bold());
        assert_eq!(style.color, Color::BLACK);
    }

    #[test]
    fn accent_renders_as_css() {
        assert_eq!(Color::ACCENT.to_css(), "rgb(44, 102, 154)");
        assert_eq!(sheet::feedback_title().color, Color::ACCENT);
    }
}
