// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for label layout.
//!
//! Chart layout is two-pass: every axis, vertex and category label is measured
//! first, and axis lines are positioned relative to the largest extents. Glyph
//! shaping stays in the host, so charts only depend on the [`TextMeasurer`] trait.

use kurbo::Size;

/// A minimal text measurement interface used by chart layout.
///
/// Implementations can be heuristic (fast, inaccurate), or backed by the
/// host's font system.
pub trait TextMeasurer {
    /// Measure a single line of text.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Returns the size a label needs to show `text` on one line.
    ///
    /// Empty text has no size, so optional titles reserve no space.
    fn size_to_fit(&self, text: &str, style: &TextStyle) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let metrics = self.measure(text, style);
        Size::new(metrics.advance_width, metrics.line_height())
    }
}

/// Font weight, CSS style (`400` regular, `700` bold).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Regular weight (`400`).
    pub const REGULAR: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// Text styling inputs relevant to measurement and drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f64,
    /// Font weight.
    pub font_weight: FontWeight,
}

impl TextStyle {
    /// Creates a regular-weight style of the given size.
    #[must_use]
    pub const fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_weight: FontWeight::REGULAR,
        }
    }

    /// Sets the font weight.
    #[must_use]
    pub const fn with_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }
}

impl Default for TextStyle {
    /// The system font at 15pt, the default for every chart label.
    fn default() -> Self {
        Self::new(15.0)
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the line.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A heuristic measurer for tests, demos and headless layout.
///
/// Assumes an average glyph width of 0.6em, bold glyphs 10% wider, and a
/// baseline at 0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let em = style.font_size;
        let glyph = if style.font_weight >= FontWeight::BOLD {
            0.66 * em
        } else {
            0.6 * em
        };
        TextMetrics {
            advance_width: glyph * text.chars().count() as f64,
            ascent: 0.8 * em,
            descent: 0.2 * em,
            leading: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_sizes_to_zero() {
        let size = HeuristicTextMeasurer.size_to_fit("", &TextStyle::default());
        assert_eq!(size, Size::ZERO);
    }

    #[test]
    fn heuristic_size_scales_with_glyph_count() {
        let style = TextStyle::new(10.0);
        let one = HeuristicTextMeasurer.size_to_fit("0", &style);
        let four = HeuristicTextMeasurer.size_to_fit("1000", &style);
        assert!((one.width - 6.0).abs() < 1e-9);
        assert!((four.width - 24.0).abs() < 1e-9);
        assert!((four.height - 10.0).abs() < 1e-9);
    }

    #[test]
    fn bold_text_is_wider() {
        let regular = TextStyle::new(12.0);
        let bold = regular.with_weight(FontWeight::BOLD);
        let a = HeuristicTextMeasurer.measure("Sales", &regular);
        let b = HeuristicTextMeasurer.measure("Sales", &bold);
        assert!(b.advance_width > a.advance_width);
        assert_eq!(a.line_height(), b.line_height());
    }
}
