//! Glyph metrics
//!
//! Fonts expose the printable ASCII range (32..=126) only. Any other
//! character, including control characters, falls back to the space glyph.

use roundel_core::Vec2;

use crate::atlas::AtlasRegion;

/// First printable ASCII code point (space)
pub const CHARS_START: u32 = 32;
/// Number of printable ASCII characters (32..=126)
pub const CHARS_LEN: usize = 95;

/// Index of `c` in a printable-ASCII glyph table
pub fn char_index(c: char) -> usize {
    let code = c as u32;
    if (CHARS_START..CHARS_START + CHARS_LEN as u32).contains(&code) {
        (code - CHARS_START) as usize
    } else {
        0
    }
}

/// Every character a font table holds, in table order
pub fn printable_chars() -> impl Iterator<Item = char> {
    (CHARS_START..CHARS_START + CHARS_LEN as u32).filter_map(char::from_u32)
}

/// One glyph of a loaded font, in pixels at the font's loaded height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Character {
    /// Where the bitmap lives in the font's atlas
    pub region: AtlasRegion,
    /// Bitmap size
    pub size: Vec2,
    /// Offset from the pen to the bitmap's left edge (x) and from the
    /// baseline up to its top edge (y)
    pub bearing: Vec2,
    /// Horizontal advance to the next pen position
    pub advance: f32,
}

/// Per-glyph metrics of a font
///
/// All values are in pixels at [`loaded_height`](GlyphMetrics::loaded_height);
/// callers rendering at another size multiply by [`scale`](GlyphMetrics::scale).
pub trait GlyphMetrics {
    /// Glyph for `c`, or the space glyph when `c` is not printable ASCII
    fn glyph(&self, c: char) -> Character;

    /// Pixel height the font was rasterized at
    fn loaded_height(&self) -> f32;

    /// Tallest bearing above the baseline
    fn max_char_height(&self) -> f32;

    /// Deepest descent below the baseline
    fn max_char_underflow(&self) -> f32;

    /// Factor from loaded pixels to `font_size` pixels
    fn scale(&self, font_size: f32) -> f32 {
        let loaded = self.loaded_height();
        if loaded > 0.0 {
            font_size / loaded
        } else {
            0.0
        }
    }

    /// Scaled advance of a single character
    fn advance(&self, c: char, font_size: f32) -> f32 {
        self.glyph(c).advance * self.scale(font_size)
    }

    /// Width of `text` laid out on one line at `font_size`
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let scale = self.scale(font_size);
        text.chars().map(|c| self.glyph(c).advance).sum::<f32>() * scale
    }
}

/// Tallest bearing and deepest descent over a glyph table
pub(crate) fn extents(characters: &[Character]) -> (f32, f32) {
    characters.iter().fold((0.0f32, 0.0f32), |(height, underflow), ch| {
        (
            height.max(ch.bearing.y),
            underflow.max(ch.size.y - ch.bearing.y),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mono;

    impl GlyphMetrics for Mono {
        fn glyph(&self, c: char) -> Character {
            Character {
                advance: if c == ' ' { 4.0 } else { 8.0 },
                ..Default::default()
            }
        }

        fn loaded_height(&self) -> f32 {
            16.0
        }

        fn max_char_height(&self) -> f32 {
            12.0
        }

        fn max_char_underflow(&self) -> f32 {
            4.0
        }
    }

    #[test]
    fn test_non_printable_maps_to_space() {
        assert_eq!(char_index(' '), 0);
        assert_eq!(char_index('~'), 94);
        assert_eq!(char_index('A'), 33);
        assert_eq!(char_index('\t'), 0);
        assert_eq!(char_index('é'), 0);
        assert_eq!(printable_chars().count(), CHARS_LEN);
    }

    #[test]
    fn test_text_width_is_scaled() {
        // "ab c" = 8 + 8 + 4 + 8 at 16px, half that at 8px
        assert_eq!(Mono.text_width("ab c", 16.0), 28.0);
        assert_eq!(Mono.text_width("ab c", 8.0), 14.0);
        assert_eq!(Mono.advance('x', 32.0), 16.0);
    }

    #[test]
    fn test_extents() {
        let chars = [
            Character {
                size: Vec2::new(5.0, 10.0),
                bearing: Vec2::new(0.0, 10.0),
                ..Default::default()
            },
            Character {
                size: Vec2::new(5.0, 12.0),
                bearing: Vec2::new(0.0, 8.0),
                ..Default::default()
            },
        ];
        assert_eq!(extents(&chars), (10.0, 4.0));
    }
}
