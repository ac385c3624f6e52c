//! Inward edge warp confined to a band along the element boundary.

use kurbo::Vec2;

use crate::foundation::math::normalize_or_zero;
use crate::pipeline::sdf::{ElementGeometry, rounded_rect_sdf};

/// Fraction of the smaller half-dimension the band reaches at `warp_edges = 1`.
const MAX_INSET_FRACTION: f64 = 0.5;
const PULL_GAIN: f64 = 0.8;
const RADIAL_GAIN: f64 = 0.3;
const SWIRL_THRESHOLD: f64 = 0.7;
const SWIRL_BAND: f64 = 0.8;
const MIN_TARGET_SCALE: f64 = 0.1;

/// Inner boundary of the warp band.
#[derive(Clone, Copy, Debug, PartialEq)]
struct InnerBoundary {
    half: Vec2,
    radius: f64,
    inset: f64,
}

fn inner_boundary(geom: &ElementGeometry, warp_edges: f64) -> InnerBoundary {
    let min_half = geom.half.x.min(geom.half.y);
    let inset = warp_edges * MAX_INSET_FRACTION * min_half;
    let half = geom.half - Vec2::new(inset, inset);
    let shrink = (half.x / geom.half.x).min(half.y / geom.half.y);
    let radius = (geom.radius * shrink).min(half.x.min(half.y)).max(0.0);
    InnerBoundary {
        half,
        radius,
        inset,
    }
}

fn effective_warp(warp_edges: f64) -> Option<f64> {
    if warp_edges > 0.0 {
        Some(warp_edges.min(1.0))
    } else {
        None
    }
}

/// Return `true` when `local` lies inside the element but outside the inner boundary.
pub(crate) fn in_warp_band(geom: &ElementGeometry, local: Vec2, warp_edges: f64) -> bool {
    let Some(warp) = effective_warp(warp_edges) else {
        return false;
    };
    if geom.sdf_local(local) >= 0.0 {
        return false;
    }
    let inner = inner_boundary(geom, warp);
    rounded_rect_sdf(local, inner.half, inner.radius) > 0.0
}

/// Warped local coordinate for a point in the band; identity elsewhere.
///
/// The point is scaled toward the centre with quadratic strength in its normalised depth into
/// the band (1 at the outer edge, 0 at the inner boundary), plus a small radial push. Strong
/// warps additionally swirl the outermost fifth of the band.
pub(crate) fn warp_local(geom: &ElementGeometry, local: Vec2, warp_edges: f64) -> Vec2 {
    let Some(warp) = effective_warp(warp_edges) else {
        return local;
    };
    let inner = inner_boundary(geom, warp);
    let inner_sdf = rounded_rect_sdf(local, inner.half, inner.radius);
    if inner_sdf <= 0.0 || inner.inset <= 0.0 {
        return local;
    }

    let depth = inner_sdf.min(inner.inset) / inner.inset;
    let intensity = depth * depth * warp * 2.0;

    let target_scale = (1.0 - intensity * PULL_GAIN).max(MIN_TARGET_SCALE);
    let mut pulled = local * target_scale;

    let radial = normalize_or_zero(local) * (intensity * RADIAL_GAIN * local.hypot() * 0.1);

    if warp > SWIRL_THRESHOLD && depth > SWIRL_BAND {
        let angle = local.atan2() + depth * warp * 0.5;
        pulled = Vec2::from_angle(angle) * pulled.hypot();
    }

    pulled + radial
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/warp.rs"]
mod tests;
