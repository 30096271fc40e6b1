//! Line breaking and glyph placement
//!
//! Layout runs in two passes over the text:
//!
//! 1. [`break_lines`] scans left to right and splits the text into [`Line`]s
//!    that fit the render width. Before each word it measures the whole word
//!    and wraps if the word would overflow; inside a word it only wraps when
//!    the next character would overflow.
//! 2. [`place_glyphs`] walks the text again with the line table and emits one
//!    [`PositionedGlyph`] per visible character, applying the alignment.
//!
//! All positions are in pixels. Glyph advances are scaled by
//! `font_size / loaded_height`.

use roundel_core::Vec2;

use crate::atlas::AtlasRegion;
use crate::metrics::GlyphMetrics;

/// Horizontal alignment of the lines of a text box
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlignment {
    #[default]
    Left,
    Right,
    Center,
    /// Stretch the gaps between words so each line fills the render width.
    /// The last line of a paragraph stays left-aligned.
    Justified,
}

/// One laid-out line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character (trailing spaces included,
    /// a terminating `'\n'` excluded)
    pub end: usize,
    /// Render width minus the extent of the rightmost glyph.
    /// Negative when a single glyph is wider than the render width.
    pub slack: f32,
    /// Number of words (runs of non-space characters) on the line
    pub word_count: usize,
    /// Ends with `'\n'` or the end of the text
    pub paragraph_end: bool,
}

impl Line {
    /// The text of this line
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

struct LineBuilder {
    start: usize,
    /// Pen position relative to the line's left edge
    x: f32,
    /// Pen position after the last non-space glyph
    content_x: f32,
    word_count: usize,
    in_word: bool,
}

impl LineBuilder {
    fn new(start: usize) -> Self {
        Self {
            start,
            x: 0.0,
            content_x: 0.0,
            word_count: 0,
            in_word: false,
        }
    }

    fn has_content(&self) -> bool {
        self.word_count > 0
    }

    fn finish(&self, end: usize, width: f32, paragraph_end: bool) -> Line {
        Line {
            start: self.start,
            end,
            slack: width - self.content_x,
            word_count: self.word_count,
            paragraph_end,
        }
    }
}

/// Split `text` into lines no wider than `width` at `font_size`
///
/// A word that does not fit moves whole to the next line, even when all that
/// precedes it is indentation. A word is only split once the line already
/// holds a glyph, so a word (or a single glyph) wider than `width` overflows
/// on its own line instead of stalling the scan.
///
/// `'\n'` forces a break and belongs to the line it ends. A trailing `'\n'`
/// does not open an empty last line, so `"ab\n"` lays out as one line.
/// Empty text produces no lines.
pub fn break_lines<M>(text: &str, metrics: &M, font_size: f32, width: f32) -> Vec<Line>
where
    M: GlyphMetrics + ?Sized,
{
    let scale = metrics.scale(font_size);
    let mut lines = Vec::new();
    let mut line = LineBuilder::new(0);

    for (i, c) in text.char_indices() {
        if c == '\n' {
            lines.push(line.finish(i, width, true));
            line = LineBuilder::new(i + c.len_utf8());
            continue;
        }

        let advance = metrics.glyph(c).advance * scale;

        if c == ' ' {
            line.x += advance;
            line.in_word = false;
            continue;
        }

        // Leading spaces are enough to wrap a whole word; splitting inside a
        // word needs a glyph already on the line
        let overflows = if !line.in_word {
            i > line.start && {
                let word_end = text[i..]
                    .find([' ', '\n'])
                    .map_or(text.len(), |offset| i + offset);
                line.x + metrics.text_width(&text[i..word_end], font_size) > width
            }
        } else {
            line.has_content() && line.x + advance > width
        };

        if overflows {
            lines.push(line.finish(i, width, false));
            // The rest of a split word counts as a word on the new line too
            line = LineBuilder::new(i);
        }

        if !line.in_word {
            line.word_count += 1;
            line.in_word = true;
        }
        line.x += advance;
        line.content_x = line.x;
    }

    if line.start < text.len() {
        lines.push(line.finish(text.len(), width, true));
    }

    tracing::trace!("laid out {} bytes into {} lines", text.len(), lines.len());
    lines
}

/// A glyph ready to be drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedGlyph {
    pub ch: char,
    /// Top-left corner in pixels
    pub position: Vec2,
    /// Size in pixels
    pub size: Vec2,
    /// Bitmap location in the font's atlas
    pub region: AtlasRegion,
}

/// Horizontal offset of a line and the extra space added per word gap
fn line_offsets(line: &Line, alignment: TextAlignment) -> (f32, f32) {
    let slack = line.slack.max(0.0);
    match alignment {
        TextAlignment::Left => (0.0, 0.0),
        TextAlignment::Right => (slack, 0.0),
        TextAlignment::Center => (slack * 0.5, 0.0),
        TextAlignment::Justified => {
            if line.paragraph_end || line.word_count < 2 {
                (0.0, 0.0)
            } else {
                (0.0, slack / (line.word_count - 1) as f32)
            }
        }
    }
}

/// Position every visible glyph of `text` using a line table from [`break_lines`]
///
/// Lines advance downwards by `font_size * line_height`. Glyphs without a
/// bitmap (spaces, unmapped characters) only move the pen.
pub fn place_glyphs<M>(
    text: &str,
    lines: &[Line],
    metrics: &M,
    font_size: f32,
    line_height: f32,
    top_left: Vec2,
    alignment: TextAlignment,
) -> Vec<PositionedGlyph>
where
    M: GlyphMetrics + ?Sized,
{
    let scale = metrics.scale(font_size);
    let baseline_offset = metrics.max_char_height() - metrics.max_char_underflow();
    let mut glyphs = Vec::with_capacity(text.len());
    let mut y = top_left.y;

    for line in lines {
        let (offset, gap) = line_offsets(line, alignment);
        let mut x = top_left.x + offset;
        let mut in_word = false;
        let mut words_seen = 0;

        for c in line.slice(text).chars() {
            let ch = metrics.glyph(c);

            if c == ' ' {
                x += ch.advance * scale;
                in_word = false;
                continue;
            }

            if !in_word {
                if words_seen > 0 {
                    x += gap;
                }
                words_seen += 1;
                in_word = true;
            }

            if !ch.region.is_empty() {
                glyphs.push(PositionedGlyph {
                    ch: c,
                    position: Vec2::new(
                        x + ch.bearing.x * scale,
                        y + (baseline_offset - ch.bearing.y) * scale,
                    ),
                    size: ch.size * scale,
                    region: ch.region,
                });
            }

            x += ch.advance * scale;
        }

        y += font_size * line_height;
    }

    glyphs
}
