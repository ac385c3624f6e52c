//! Multi-tap blur over the remapped sample coordinate.

use std::sync::LazyLock;

use kurbo::{Point, Vec2};

use crate::foundation::core::Color;
use crate::pipeline::sampler::BackgroundSampler;

/// Pixels of blur radius per unit of element `blur`.
pub const BLUR_RADIUS_PER_UNIT: f64 = 20.0;

/// Upper bound on the effective blur radius in pixels.
pub const MAX_BLUR_RADIUS: f64 = 200.0;

/// Taps on each side of the centre; the grid is `(2 * TAP_HALF + 1)²`.
const TAP_HALF: i32 = 5;
const TAP_SIDE: usize = (2 * TAP_HALF + 1) as usize;

/// Gaussian-like tap weights, `exp(-(dx² + dy²) / 8)`, indexed `[dy][dx]`.
static TAP_WEIGHTS: LazyLock<[[f64; TAP_SIDE]; TAP_SIDE]> = LazyLock::new(|| {
    let mut w = [[0.0; TAP_SIDE]; TAP_SIDE];
    for (row, dy) in w.iter_mut().zip(-TAP_HALF..=TAP_HALF) {
        for (cell, dx) in row.iter_mut().zip(-TAP_HALF..=TAP_HALF) {
            let d2 = f64::from(dx * dx + dy * dy);
            *cell = (-d2 / 8.0).exp();
        }
    }
    w
});

/// How blur taps are positioned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurMode {
    /// Square grid around the already refracted coordinate.
    #[default]
    Gaussian,
    /// Every off-centre tap is taken around the screen pixel and refracted on its own, so the
    /// blur never reaches unrefracted content across a lens boundary.
    LensAware,
}

/// Weighted average of an 11x11 tap grid spaced `radius / 5` apart.
///
/// `tap` maps a grid offset (in pixels, already scaled) to the background coordinate to read.
/// The zero offset must map to the pixel's final refracted coordinate.
pub(crate) fn blur_sample<S, F>(sampler: &S, radius: f64, tap: F) -> Color
where
    S: BackgroundSampler + ?Sized,
    F: Fn(Vec2) -> Point,
{
    let spacing = radius / f64::from(TAP_HALF);
    let weights = &*TAP_WEIGHTS;

    let mut acc = [0.0f64; 4];
    let mut total = 0.0f64;
    for (row, dy) in weights.iter().zip(-TAP_HALF..=TAP_HALF) {
        for (&w, dx) in row.iter().zip(-TAP_HALF..=TAP_HALF) {
            let offset = Vec2::new(f64::from(dx), f64::from(dy)) * spacing;
            let c = sampler.sample(tap(offset)).to_array();
            for (a, v) in acc.iter_mut().zip(c) {
                *a += f64::from(v) * w;
            }
            total += w;
        }
    }

    Color::new(
        (acc[0] / total) as f32,
        (acc[1] / total) as f32,
        (acc[2] / total) as f32,
        (acc[3] / total) as f32,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/blur.rs"]
mod tests;
