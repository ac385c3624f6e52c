//! Convex lens refraction.

use kurbo::{Point, Vec2};

use crate::foundation::math::smoothstep;
use crate::pipeline::sdf::ElementGeometry;

/// Magnification applied at `local`, or `None` when the lens does not act there.
///
/// `finalScale = (1 + scale) * (1 + centerDistortion * (1 - smoothstep(0, 1, |local / half|)))`.
/// The lens only acts strictly inside the element and only for `scale > 0`.
pub(crate) fn lens_factor(
    geom: &ElementGeometry,
    local: Vec2,
    scale: f64,
    center_distortion: f64,
) -> Option<f64> {
    if !(scale > 0.0) {
        return None;
    }
    if geom.sdf_local(local) >= 0.0 {
        return None;
    }

    let rel = Vec2::new(local.x / geom.half.x, local.y / geom.half.y);
    let normalized_dist = rel.hypot();

    let distortion = if center_distortion > 0.0 {
        let convex = 1.0 - smoothstep(0.0, 1.0, normalized_dist);
        1.0 + center_distortion * convex
    } else {
        1.0
    };
    Some((1.0 + scale) * distortion)
}

/// Pull `p` toward the element centre by the lens factor; identity outside the lens.
pub(crate) fn lens_map(
    geom: &ElementGeometry,
    p: Point,
    scale: f64,
    center_distortion: f64,
) -> Point {
    let local = geom.local(p);
    match lens_factor(geom, local, scale, center_distortion) {
        Some(k) => geom.center + local / k,
        None => p,
    }
}

/// Base-scale lens mapping without centre distortion, used per blur tap.
pub(crate) fn lens_map_simple(geom: &ElementGeometry, p: Point, scale: f64) -> Point {
    lens_map(geom, p, scale, 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/lens.rs"]
mod tests;
