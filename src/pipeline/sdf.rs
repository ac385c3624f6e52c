//! Rounded-rectangle signed distance field.

use kurbo::{Point, Vec2};

use crate::foundation::math::{abs2, max2, normalize_or_zero};
use crate::pack::params::PackedElement;

/// Signed distance from `local` (relative to the rectangle centre) to a rounded rectangle with
/// half-size `half` and corner radius `radius`. Negative inside, positive outside.
///
/// `radius` is clamped to `[0, min(half.x, half.y)]`, so oversized radii give a capsule.
pub fn rounded_rect_sdf(local: Vec2, half: Vec2, radius: f64) -> f64 {
    let r = clamp_radius(half, radius);
    let d = abs2(local) - (half - Vec2::new(r, r));
    let outside = max2(d, 0.0).hypot();
    let inside = d.x.max(d.y).min(0.0);
    outside + inside - r
}

/// Outward unit normal estimated by forward differences of the SDF.
pub(crate) fn sdf_normal(local: Vec2, half: Vec2, radius: f64, epsilon: f64) -> Vec2 {
    let base = rounded_rect_sdf(local, half, radius);
    let dx = rounded_rect_sdf(local + Vec2::new(epsilon, 0.0), half, radius) - base;
    let dy = rounded_rect_sdf(local + Vec2::new(0.0, epsilon), half, radius) - base;
    normalize_or_zero(Vec2::new(dx, dy))
}

pub(crate) fn clamp_radius(half: Vec2, radius: f64) -> f64 {
    let max_r = half.x.min(half.y).max(0.0);
    if radius.is_finite() {
        radius.clamp(0.0, max_r)
    } else {
        0.0
    }
}

/// Screen-space geometry of one element, precomputed when the evaluator is bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ElementGeometry {
    pub(crate) center: Point,
    pub(crate) half: Vec2,
    pub(crate) radius: f64,
}

impl ElementGeometry {
    /// `None` for zero-area or non-finite elements, which take part in no effect.
    pub(crate) fn from_packed(e: &PackedElement) -> Option<Self> {
        let origin = Point::new(f64::from(e.position[0]), f64::from(e.position[1]));
        let size = Vec2::new(f64::from(e.size[0]), f64::from(e.size[1]));
        if !(size.x > 0.0 && size.y > 0.0) || !size.is_finite() || !origin.is_finite() {
            return None;
        }
        let half = size * 0.5;
        Some(Self {
            center: origin + half,
            half,
            radius: clamp_radius(half, f64::from(e.corner_radius)),
        })
    }

    pub(crate) fn local(&self, p: Point) -> Vec2 {
        p - self.center
    }

    pub(crate) fn sdf_local(&self, local: Vec2) -> f64 {
        rounded_rect_sdf(local, self.half, self.radius)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/sdf.rs"]
mod tests;
