use serde::{Deserialize, Serialize};

use crate::util::unicode;

/// A fixed-advance font: every display cell is `advance` units wide and
/// every line is `line_height` units tall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFont {
    pub name: String,
    pub advance: u32,
    pub line_height: u32,
}

impl ThemeFont {
    pub fn new(name: impl Into<String>, advance: u32, line_height: u32) -> Self {
        ThemeFont {
            name: name.into(),
            advance,
            line_height,
        }
    }

    /// Primary line on a character sheet page
    pub fn page_primary() -> Self {
        ThemeFont::new("page.field.primary", 6, 12)
    }

    /// Notes line on a character sheet page
    pub fn page_secondary() -> Self {
        ThemeFont::new("page.field.secondary", 5, 10)
    }

    /// Primary line in an editor dialog
    pub fn field_primary() -> Self {
        ThemeFont::new("field.primary", 7, 14)
    }

    /// Notes line in an editor dialog
    pub fn field_secondary() -> Self {
        ThemeFont::new("field.secondary", 6, 12)
    }

    /// Width of the widest line of `text`.
    pub fn text_width(&self, text: &str) -> u32 {
        unicode::widest_line(text) as u32 * self.advance
    }

    /// Height of `text`, one line per `\n`-separated line.
    pub fn text_height(&self, text: &str) -> u32 {
        text.split('\n').count() as u32 * self.line_height
    }

    /// How many cells fit in `width` units (at least one).
    pub fn cells_in(&self, width: u32) -> usize {
        (width / self.advance.max(1)).max(1) as usize
    }
}

/// A UI scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f32);

impl Default for Scale {
    fn default() -> Self {
        Scale(1.0)
    }
}

impl Scale {
    /// Non-finite or non-positive factors fall back to actual size.
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Scale(factor)
        } else {
            Scale(1.0)
        }
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    pub fn scale(self, value: u32) -> u32 {
        (value as f32 * self.0).round() as u32
    }

    pub fn scale_font(self, font: &ThemeFont) -> ThemeFont {
        ThemeFont {
            name: font.name.clone(),
            advance: self.scale(font.advance).max(1),
            line_height: self.scale(font.line_height).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_width_uses_widest_line() {
        let font = ThemeFont::new("t", 6, 12);
        assert_eq!(font.text_width("Wealth"), 36);
        assert_eq!(font.text_width("ab\nabcd"), 24);
    }

    #[test]
    fn text_height_counts_lines() {
        let font = ThemeFont::new("t", 6, 12);
        assert_eq!(font.text_height("one"), 12);
        assert_eq!(font.text_height("one\ntwo\nthree"), 36);
    }

    #[test]
    fn cells_in_never_zero() {
        let font = ThemeFont::new("t", 6, 12);
        assert_eq!(font.cells_in(60), 10);
        assert_eq!(font.cells_in(3), 1);
    }

    #[test]
    fn scale_rounds_and_rejects_nonsense() {
        assert_eq!(Scale::new(1.5).scale(250), 375);
        assert_eq!(Scale::new(0.0).factor(), 1.0);
        assert_eq!(Scale::new(f32::NAN).factor(), 1.0);
        let font = Scale::new(2.0).scale_font(&ThemeFont::page_primary());
        assert_eq!(font.advance, 12);
        assert_eq!(font.line_height, 24);
    }
}
