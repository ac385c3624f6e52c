//! Tint, darkness, elevation shadow and rim highlight terms.

use kurbo::Vec2;

use crate::foundation::core::Color;
use crate::foundation::math::{mix, smoothstep};
use crate::pipeline::sdf::{ElementGeometry, rounded_rect_sdf};

/// Width of the rim highlight band outside the edge, in pixels.
pub const RIM_WIDTH: f64 = 5.0;
/// Band in which the rim surface normal is estimated.
pub(crate) const RIM_NORMAL_BAND: f64 = 4.0;
pub(crate) const RIM_NORMAL_EPSILON: f64 = 1.0;
/// Distance along the normal at which the reflected background is read.
pub(crate) const RIM_REFLECTION_OFFSET: f64 = 24.0;
const RIM_GAIN: f64 = 0.8;
const RIM_BRIGHTEN_MUL: f32 = 1.8;
const RIM_BRIGHTEN_BIAS: f32 = 0.35;
const RIM_FLOOR: f32 = 0.15;

const SHADOW_OFFSET_PER_ELEVATION: f64 = 0.5;
const SHADOW_BLUR_PER_ELEVATION: f64 = 2.0;
const SHADOW_MAX_ALPHA: f64 = 0.15;

const DARKNESS_REACH: f64 = 0.8;

/// Fold one element's tint into the running accumulator.
///
/// Overlapping tints blend sequentially in element order (`mix(acc, tint, tint.a)`); there is no
/// depth sorting.
pub(crate) fn accumulate_tint(acc: Color, tint: Color) -> Color {
    let alpha = tint.a.clamp(0.0, 1.0);
    if alpha > 0.0 { acc.mix(tint, alpha) } else { acc }
}

/// Edge-driven darkness at a point inside the element (`sdf < 0`).
///
/// Full strength at the edge, smoothly fading to zero at `0.8 * min(half)` from it.
pub(crate) fn edge_darkness(geom: &ElementGeometry, sdf: f64, darkness: f64) -> f64 {
    if !(darkness > 0.0) {
        return 0.0;
    }
    let max_radius = geom.half.x.min(geom.half.y) * DARKNESS_REACH;
    let distance_from_edge = sdf.abs();
    if distance_from_edge >= max_radius {
        return 0.0;
    }
    let intensity = smoothstep(0.0, 1.0, (max_radius - distance_from_edge) / max_radius);
    darkness.min(1.0) * intensity
}

/// Drop shadow alpha for a point outside the element.
///
/// The element outline is shifted down by `elevation / 2`; alpha falls off linearly over
/// `2 * elevation` from that shifted outline and is zero inside the element itself.
pub fn elevation_shadow(local: Vec2, half: Vec2, radius: f64, elevation: f64) -> f64 {
    if !(elevation > 0.0) {
        return 0.0;
    }
    let offset_y = elevation * SHADOW_OFFSET_PER_ELEVATION;
    let shadow_blur = elevation * SHADOW_BLUR_PER_ELEVATION;

    let original = rounded_rect_sdf(local, half, radius);
    let shadow = rounded_rect_sdf(local - Vec2::new(0.0, offset_y), half, radius);
    if original <= 0.0 || shadow > shadow_blur {
        return 0.0;
    }
    (1.0 - shadow / shadow_blur) * SHADOW_MAX_ALPHA
}

/// Rim highlight intensity for a point in the thin band just outside the edge.
///
/// Decays linearly with distance from the edge and is brighter toward the top of the element
/// (factor 1.2 at the top edge down to 0.7 at the bottom).
pub fn rim_intensity(local: Vec2, half: Vec2, radius: f64) -> f64 {
    let sdf = rounded_rect_sdf(local, half, radius);
    if !(sdf > 0.0 && sdf < RIM_WIDTH) {
        return 0.0;
    }
    let intensity = (RIM_WIDTH - sdf) / RIM_WIDTH;
    let vertical = local.y / half.y;
    let lighting = mix(1.2, 0.7, (vertical + 1.0) * 0.5);
    intensity * RIM_GAIN * lighting
}

/// Brighten a reflected background sample so the rim stays visible on dark content.
pub(crate) fn brighten_reflection(c: Color) -> Color {
    c.map_rgb(|v| (v * RIM_BRIGHTEN_MUL + RIM_BRIGHTEN_BIAS).max(RIM_FLOOR))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/shading.rs"]
mod tests;
