use crate::foundation::error::{GlassError, GlassResult};

pub use kurbo::{Point, Size, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> GlassResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlassError::validation("canvas width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Byte length of a tightly packed RGBA8 buffer for this canvas.
    pub fn rgba8_len(self) -> GlassResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GlassError::evaluation("canvas buffer size overflow"))
    }
}

/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
///
/// This is the color type flowing through the pixel pipeline: background samples, tints and the
/// final output. Channels are not clamped on construction; conversion to bytes clamps.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Construct from float channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Construct from straight-alpha RGBA8 channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Construct from a packed `0xAARRGGBB` value.
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self::from_rgba8(r, g, b, a)
    }

    /// Return a copy with a replaced alpha channel.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert to straight-alpha RGBA8, clamping every channel to `[0, 1]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(v: f32) -> u8 {
            if !v.is_finite() {
                return 0;
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Linear interpolation of all four channels.
    pub fn mix(self, other: Self, t: f32) -> Self {
        Self::new(
            mix_f32(self.r, other.r, t),
            mix_f32(self.g, other.g, t),
            mix_f32(self.b, other.b, t),
            mix_f32(self.a, other.a, t),
        )
    }

    /// Linear interpolation of the color channels only; alpha is kept.
    pub fn mix_rgb(self, other: Self, t: f32) -> Self {
        Self::new(
            mix_f32(self.r, other.r, t),
            mix_f32(self.g, other.g, t),
            mix_f32(self.b, other.b, t),
            self.a,
        )
    }

    /// Apply `f` to each color channel; alpha is kept.
    pub fn map_rgb(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    /// Multiply all four channels by `k`.
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k, self.a * k)
    }

    /// Add channel-wise.
    pub fn add(self, other: Self) -> Self {
        Self::new(
            self.r + other.r,
            self.g + other.g,
            self.b + other.b,
            self.a + other.a,
        )
    }

    /// Straight-alpha source-over: `self` painted on top of `dst`.
    pub fn over(self, dst: Self) -> Self {
        let sa = self.a.clamp(0.0, 1.0);
        let da = dst.a.clamp(0.0, 1.0) * (1.0 - sa);
        let a = sa + da;
        if a <= 0.0 {
            return Self::TRANSPARENT;
        }
        self.scaled(sa)
            .add(dst.scaled(da))
            .map_rgb(|v| v / a)
            .with_alpha(a)
    }

    /// Return `true` when every channel is finite.
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Display density in pixels per density-independent unit.
///
/// Elevation and absolute corner radii are declared in density-independent units and converted
/// to pixels once, when a region is placed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Density(pub f32);

impl Default for Density {
    fn default() -> Self {
        Self(1.0)
    }
}

impl Density {
    /// Convert density-independent units to pixels.
    pub fn to_px(self, dp: f32) -> f32 {
        dp * self.0
    }
}

fn mix_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
