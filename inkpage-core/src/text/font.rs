use crate::error::{NoteError, Result};
use crate::graphics::Canvas;
use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::Rgb;
use std::fmt;
use std::path::Path;

/// Measures and draws single lines of text.
///
/// The layout engine only needs these three capabilities, so any font
/// backend can drive it.
pub trait Typeface: Send + Sync {
    /// Rendered width of `text` in pixels, summing glyph advances.
    fn line_width(&self, text: &str) -> f32;

    /// Distance from the top of a line box to its baseline.
    fn ascent(&self) -> f32;

    /// Draws `text` with the top-left corner of its line box at `(x, y)`.
    fn draw_line(&self, canvas: &mut Canvas, x: u32, y: u32, text: &str, color: Rgb<u8>);
}

/// A TrueType / OpenType font rasterized with `ab_glyph`.
///
/// `size` is the em size in pixels, so a 50 px face is as tall as a
/// 50 pt face printed at 72 dpi.
#[derive(Clone)]
pub struct TrueTypeFace {
    font: FontArc,
    scale: PxScale,
    size: f32,
}

impl TrueTypeFace {
    /// Parses font data, failing with [`NoteError::Font`] on invalid bytes
    /// or a non-positive size.
    pub fn from_bytes(bytes: Vec<u8>, size: f32) -> Result<Self> {
        if !(size.is_finite() && size > 0.0) {
            return Err(NoteError::Font(format!("invalid font size {size}")));
        }

        let font = FontArc::try_from_vec(bytes).map_err(|e| NoteError::Font(e.to_string()))?;
        let units_per_em = font
            .units_per_em()
            .ok_or_else(|| NoteError::Font("font has no units-per-em".to_string()))?;

        // PxScale measures ascent - descent, not the em square
        let scale = PxScale::from(size * font.height_unscaled() / units_per_em);

        Ok(Self { font, scale, size })
    }

    /// Reads and parses a font file.
    pub fn open<P: AsRef<Path>>(path: P, size: f32) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            NoteError::Font(format!("cannot read font file {}: {e}", path.display()))
        })?;
        Self::from_bytes(bytes, size).map_err(|e| match e {
            NoteError::Font(msg) => NoteError::Font(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Glyphs of `text` with their horizontal offsets, plus the total advance.
    fn glyph_run(&self, text: &str) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut run = Vec::with_capacity(text.len());
        let mut caret = 0.0;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            run.push((id, caret));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
        (run, caret)
    }
}

impl fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("size", &self.size)
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl Typeface for TrueTypeFace {
    fn line_width(&self, text: &str) -> f32 {
        self.glyph_run(text).1
    }

    fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }

    fn draw_line(&self, canvas: &mut Canvas, x: u32, y: u32, text: &str, color: Rgb<u8>) {
        let baseline = y as f32 + self.ascent();
        let (run, _) = self.glyph_run(text);
        for (id, offset) in run {
            let glyph = id.with_scale_and_position(self.scale, point(x as f32 + offset, baseline));
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                canvas.blend_pixel(
                    bounds.min.x as i64 + i64::from(gx),
                    bounds.min.y as i64 + i64::from(gy),
                    color,
                    coverage,
                );
            });
        }
    }
}

/// A monospaced block face that needs no font file.
///
/// Every character advances `advance` pixels; visible characters paint a
/// solid block `height` pixels tall. Output is exactly reproducible, which
/// makes it the face of choice for tests and quick previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAdvanceFace {
    advance: u32,
    height: u32,
}

impl FixedAdvanceFace {
    pub fn new(advance: u32, height: u32) -> Self {
        Self {
            advance: advance.max(1),
            height,
        }
    }

    /// Proportions roughly matching a handwriting font at `size` pixels.
    pub fn for_size(size: f32) -> Self {
        let size = size.max(1.0);
        Self::new((size * 0.5).round() as u32, (size * 0.7).round() as u32)
    }

    pub fn advance(&self) -> u32 {
        self.advance
    }
}

impl Typeface for FixedAdvanceFace {
    fn line_width(&self, text: &str) -> f32 {
        (text.chars().count() as u64 * u64::from(self.advance)) as f32
    }

    fn ascent(&self) -> f32 {
        self.height as f32
    }

    fn draw_line(&self, canvas: &mut Canvas, x: u32, y: u32, text: &str, color: Rgb<u8>) {
        let block = self.advance.saturating_sub(2).max(1);
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = x
                .saturating_add((i as u32).saturating_mul(self.advance))
                .saturating_add(1);
            canvas.fill_rect(left, y, block, self.height, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::PAPER_WHITE;

    #[test]
    fn test_fixed_advance_width() {
        let face = FixedAdvanceFace::new(10, 20);
        assert_eq!(face.line_width(""), 0.0);
        assert_eq!(face.line_width("Hello"), 50.0);
        assert_eq!(face.line_width("Hello world"), 110.0);
        assert_eq!(face.ascent(), 20.0);
    }

    #[test]
    fn test_fixed_advance_counts_chars_not_bytes() {
        let face = FixedAdvanceFace::new(10, 20);
        assert_eq!(face.line_width("héllo"), 50.0);
    }

    #[test]
    fn test_fixed_advance_for_size() {
        let face = FixedAdvanceFace::for_size(50.0);
        assert_eq!(face.advance(), 25);
        assert_eq!(face.ascent(), 35.0);
        assert_eq!(FixedAdvanceFace::new(0, 5).advance(), 1);
    }

    #[test]
    fn test_fixed_advance_draw() {
        let face = FixedAdvanceFace::new(10, 5);
        let mut canvas = Canvas::blank(40, 20);
        let ink = Rgb([25, 25, 112]);
        face.draw_line(&mut canvas, 0, 2, "a b", ink);

        // First block covers x 1..=8, rows 2..=6
        assert_eq!(canvas.pixel(1, 2), Some(ink));
        assert_eq!(canvas.pixel(8, 6), Some(ink));
        assert_eq!(canvas.pixel(0, 2), Some(PAPER_WHITE));
        assert_eq!(canvas.pixel(1, 7), Some(PAPER_WHITE));
        // The space leaves its cell blank
        assert_eq!(canvas.pixel(15, 4), Some(PAPER_WHITE));
        // Third cell
        assert_eq!(canvas.pixel(21, 4), Some(ink));
    }

    #[test]
    fn test_truetype_rejects_garbage() {
        let error = TrueTypeFace::from_bytes(b"definitely not a font".to_vec(), 50.0).unwrap_err();
        assert!(matches!(error, NoteError::Font(_)));
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_truetype_rejects_bad_size() {
        let error = TrueTypeFace::from_bytes(Vec::new(), 0.0).unwrap_err();
        assert!(error.to_string().contains("invalid font size"));
    }

    #[test]
    fn test_truetype_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Missing-Regular.ttf");
        let error = TrueTypeFace::open(&path, 50.0).unwrap_err();
        assert!(matches!(error, NoteError::Font(_)));
        assert!(error.to_string().contains("Missing-Regular.ttf"));
    }
}
