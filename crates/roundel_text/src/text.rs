//! Text boxes
//!
//! A [`Text`] is a string drawn with one font at one size inside a column of
//! fixed width. The line table is cached and only rebuilt after a change that
//! can move a line break: the string, the font, the font size or the render
//! width. Position, color, line height and alignment changes reuse it.

use roundel_core::{Color, Vec2};

use crate::layout::{break_lines, place_glyphs, Line, PositionedGlyph, TextAlignment};
use crate::metrics::GlyphMetrics;
use crate::store::FontId;

/// A multi-line block of text
#[derive(Clone, Debug)]
pub struct Text {
    text: String,
    font: FontId,
    /// Character height in pixels
    font_size: f32,
    top_left: Vec2,
    /// Wrap column in pixels
    render_width: f32,
    /// Multiplier of `font_size` between consecutive lines
    line_height: f32,
    color: Color,
    alignment: TextAlignment,
    lines: Vec<Line>,
    dirty: bool,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontId) -> Self {
        Self {
            text: text.into(),
            font,
            font_size: 24.0,
            top_left: Vec2::ZERO,
            render_width: 500.0,
            line_height: 1.0,
            color: Color::WHITE,
            alignment: TextAlignment::Left,
            lines: Vec::new(),
            dirty: true,
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.set_font_size(font_size);
        self
    }

    pub fn with_top_left(mut self, top_left: Vec2) -> Self {
        self.top_left = top_left;
        self
    }

    pub fn with_render_width(mut self, render_width: f32) -> Self {
        self.set_render_width(render_width);
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text != text {
            self.text = text;
            self.dirty = true;
        }
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn set_font(&mut self, font: FontId) {
        if self.font != font {
            self.font = font;
            self.dirty = true;
        }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        if self.font_size != font_size {
            self.font_size = font_size;
            self.dirty = true;
        }
    }

    pub fn top_left(&self) -> Vec2 {
        self.top_left
    }

    pub fn set_top_left(&mut self, top_left: Vec2) {
        self.top_left = top_left;
    }

    pub fn render_width(&self) -> f32 {
        self.render_width
    }

    pub fn set_render_width(&mut self, render_width: f32) {
        if self.render_width != render_width {
            self.render_width = render_width;
            self.dirty = true;
        }
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn set_line_height(&mut self, line_height: f32) {
        self.line_height = line_height;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: TextAlignment) {
        self.alignment = alignment;
    }

    /// Whether the next layout query will rebuild the line table
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a rebuild on the next layout query
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Line table for the current contents, rebuilt if stale
    ///
    /// `metrics` must be the metrics of [`font`](Self::font).
    pub fn lines<M>(&mut self, metrics: &M) -> &[Line]
    where
        M: GlyphMetrics + ?Sized,
    {
        if self.dirty {
            self.lines = break_lines(&self.text, metrics, self.font_size, self.render_width);
            self.dirty = false;
        }
        &self.lines
    }

    /// Total height of the laid-out block in pixels
    ///
    /// A trailing `'\n'` does not count as an extra line.
    pub fn height<M>(&mut self, metrics: &M) -> f32
    where
        M: GlyphMetrics + ?Sized,
    {
        let step = self.font_size * self.line_height;
        self.lines(metrics).len() as f32 * step
    }

    /// Every visible glyph, positioned and aligned
    pub fn glyphs<M>(&mut self, metrics: &M) -> Vec<PositionedGlyph>
    where
        M: GlyphMetrics + ?Sized,
    {
        self.lines(metrics);
        place_glyphs(
            &self.text,
            &self.lines,
            metrics,
            self.font_size,
            self.line_height,
            self.top_left,
            self.alignment,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{AtlasRegion, GlyphAtlas};
    use crate::metrics::{printable_chars, Character};
    use crate::store::LoadedFont;
    use slotmap::KeyData;

    fn font() -> LoadedFont {
        let characters = printable_chars()
            .map(|c| Character {
                region: if c == ' ' {
                    AtlasRegion::default()
                } else {
                    AtlasRegion { x: 0, y: 0, width: 5, height: 10 }
                },
                size: Vec2::new(5.0, 10.0),
                bearing: Vec2::new(0.0, 10.0),
                advance: 10.0,
            })
            .collect();
        LoadedFont::from_characters("fixed", 10.0, characters, GlyphAtlas::new(8, 8))
    }

    fn font_id() -> FontId {
        FontId::from(KeyData::from_ffi(1))
    }

    #[test]
    fn test_layout_is_cached_until_break_inputs_change() {
        let metrics = font();
        let mut text = Text::new("aa bb cc", font_id())
            .with_font_size(10.0)
            .with_render_width(50.0);

        assert!(text.is_dirty());
        assert_eq!(text.lines(&metrics).len(), 2);
        assert!(!text.is_dirty());

        // Presentation-only changes keep the table
        text.set_color(Color::RED);
        text.set_top_left(Vec2::new(5.0, 5.0));
        text.set_alignment(TextAlignment::Center);
        text.set_line_height(1.5);
        assert!(!text.is_dirty());

        // Same value is not a change
        text.set_render_width(50.0);
        assert!(!text.is_dirty());

        text.set_render_width(100.0);
        assert!(text.is_dirty());
        assert_eq!(text.lines(&metrics).len(), 1);

        text.set_text("aa bb cc dd ee ff");
        assert!(text.is_dirty());
        assert_eq!(text.lines(&metrics).len(), 2);
    }

    #[test]
    fn test_height_counts_lines() {
        let metrics = font();
        let mut text = Text::new("a\nb\nc", font_id())
            .with_font_size(20.0)
            .with_line_height(1.5);
        assert_eq!(text.height(&metrics), 90.0);

        text.set_text("a\nb\nc\n");
        assert_eq!(text.height(&metrics), 90.0);
    }

    #[test]
    fn test_glyphs_follow_top_left() {
        let metrics = font();
        let mut text = Text::new("ab", font_id())
            .with_font_size(10.0)
            .with_top_left(Vec2::new(30.0, 40.0));
        let glyphs = text.glyphs(&metrics);
        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].position, Vec2::new(30.0, 40.0));
        assert_eq!(glyphs[1].position, Vec2::new(40.0, 40.0));
    }
}
