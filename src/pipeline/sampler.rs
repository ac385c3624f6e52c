use kurbo::Point;

use crate::foundation::core::Color;
use crate::foundation::error::{GlassError, GlassResult};

/// Source of background content behind the glass.
///
/// Coordinates are screen-space pixels with pixel centres at `+0.5`, the same convention the
/// evaluator uses for fragment coordinates.
pub trait BackgroundSampler {
    /// Color of the background at `p`.
    fn sample(&self, p: Point) -> Color;
}

impl<F> BackgroundSampler for F
where
    F: Fn(Point) -> Color,
{
    fn sample(&self, p: Point) -> Color {
        self(p)
    }
}

/// Raster background with bilinear filtering and clamp-to-edge addressing.
#[derive(Clone, Debug)]
pub struct BackgroundImage {
    pixels: image::Rgba32FImage,
}

impl BackgroundImage {
    /// Wrap a float image (straight alpha, channels in `[0, 1]`).
    pub fn new(pixels: image::Rgba32FImage) -> GlassResult<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(GlassError::validation("background image must not be empty"));
        }
        Ok(Self { pixels })
    }

    /// Convert an RGBA8 image.
    pub fn from_rgba8(img: &image::RgbaImage) -> GlassResult<Self> {
        Self::new(image::DynamicImage::ImageRgba8(img.clone()).into_rgba32f())
    }

    /// Build an image by evaluating `f` at every pixel centre.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(Point) -> Color) -> GlassResult<Self> {
        Self::new(image::ImageBuffer::from_fn(width, height, |x, y| {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            image::Rgba(f(p).to_array())
        }))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Underlying float image.
    pub fn as_image(&self) -> &image::Rgba32FImage {
        &self.pixels
    }

    fn texel(&self, x: i64, y: i64) -> [f32; 4] {
        let xi = x.clamp(0, i64::from(self.pixels.width()) - 1) as u32;
        let yi = y.clamp(0, i64::from(self.pixels.height()) - 1) as u32;
        self.pixels.get_pixel(xi, yi).0
    }
}

impl BackgroundSampler for BackgroundImage {
    fn sample(&self, p: Point) -> Color {
        if !p.is_finite() {
            return Color::TRANSPARENT;
        }
        // Past one texel outside the image every lookup lands on the edge anyway.
        let fx = (p.x - 0.5).clamp(-1.0, f64::from(self.pixels.width()));
        let fy = (p.y - 0.5).clamp(-1.0, f64::from(self.pixels.height()));
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = (fx - x0) as f32;
        let ty = (fy - y0) as f32;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let c00 = self.texel(x0, y0);
        if tx == 0.0 && ty == 0.0 {
            return Color::from(c00);
        }
        let c10 = self.texel(x0 + 1, y0);
        let c01 = self.texel(x0, y0 + 1);
        let c11 = self.texel(x0 + 1, y0 + 1);

        let mut out = [0.0f32; 4];
        for (i, o) in out.iter_mut().enumerate() {
            let top = c00[i] + (c10[i] - c00[i]) * tx;
            let bottom = c01[i] + (c11[i] - c01[i]) * tx;
            *o = top + (bottom - top) * ty;
        }
        Color::from(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/sampler.rs"]
mod tests;
