use super::color::{PAPER_WHITE, RULE_GRAY};
use crate::error::Result;
use crate::page::LayoutSettings;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Placement of the ruled guide lines on a page.
///
/// Lines start at `first_line` and repeat every `spacing` pixels while they
/// stay above the bottom edge. Each line leaves `side_margin` pixels of bare
/// paper on the left and right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuleStyle {
    pub first_line: u32,
    pub spacing: u32,
    pub side_margin: u32,
    pub thickness: u32,
    pub color: Rgb<u8>,
}

impl Default for RuleStyle {
    fn default() -> Self {
        Self {
            first_line: 100,
            spacing: 70,
            side_margin: 50,
            thickness: 2,
            color: RULE_GRAY,
        }
    }
}

impl RuleStyle {
    /// Default look with one guide line under every text line of `settings`.
    pub fn aligned_with(settings: &LayoutSettings) -> Self {
        Self {
            first_line: settings.top,
            spacing: settings.line_spacing,
            ..Self::default()
        }
    }

    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Y coordinates of every guide line on a page `height` pixels tall.
    pub fn line_positions(&self, height: u32) -> Vec<u32> {
        if self.spacing == 0 {
            return Vec::new();
        }
        (self.first_line..height)
            .step_by(self.spacing as usize)
            .collect()
    }
}

/// An RGB raster page.
///
/// A canvas starts as white paper, optionally with guide lines, and is only
/// modified afterwards by text being drawn onto it.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// Creates a plain white canvas.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, PAPER_WHITE),
        }
    }

    /// Creates a white canvas ruled according to `style`.
    pub fn ruled(width: u32, height: u32, style: &RuleStyle) -> Self {
        let mut canvas = Self::blank(width, height);
        for y in style.line_positions(height) {
            canvas.draw_rule(y, style);
        }
        tracing::trace!(width, height, spacing = style.spacing, "built ruled canvas");
        canvas
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Draws one horizontal guide line whose top edge sits at `y`.
    pub fn draw_rule(&mut self, y: u32, style: &RuleStyle) {
        let right = self.width().saturating_sub(style.side_margin);
        if style.side_margin > right {
            return;
        }
        self.fill_rect(
            style.side_margin,
            y,
            right - style.side_margin + 1,
            style.thickness,
            style.color,
        );
    }

    /// Fills a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px, py, color);
            }
        }
    }

    /// Mixes `color` into the pixel at `(x, y)` with the given coverage in
    /// `0.0..=1.0`. Coordinates outside the canvas are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>, coverage: f32) {
        if x < 0 || y < 0 || x >= i64::from(self.width()) || y >= i64::from(self.height()) {
            return;
        }
        let coverage = coverage.clamp(0.0, 1.0);
        if coverage <= 0.0 {
            return;
        }
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for (dst, src) in pixel.0.iter_mut().zip(color.0) {
            let mixed = f32::from(src) * coverage + f32::from(*dst) * (1.0 - coverage);
            *dst = mixed.round() as u8;
        }
    }

    /// Encodes the canvas as a PNG file in memory.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// Builds a white page with gray guide lines every `line_spacing` pixels.
///
/// Lines begin at the default top offset and keep the default side margin,
/// see [`RuleStyle::default`].
pub fn build_ruled_canvas(width: u32, height: u32, line_spacing: u32) -> Canvas {
    Canvas::ruled(
        width,
        height,
        &RuleStyle::default().with_spacing(line_spacing),
    )
}
