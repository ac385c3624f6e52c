use kurbo::Vec2;

/// Hermite smoothstep with GLSL semantics (`x` is clamped into the edge range).
pub(crate) fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub(crate) fn mix(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Component-wise absolute value.
pub(crate) fn abs2(v: Vec2) -> Vec2 {
    Vec2::new(v.x.abs(), v.y.abs())
}

/// Component-wise `max(v, s)`.
pub(crate) fn max2(v: Vec2, s: f64) -> Vec2 {
    Vec2::new(v.x.max(s), v.y.max(s))
}

/// Unit vector in the direction of `v`, or zero for a zero-length input.
pub(crate) fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len > 0.0 && len.is_finite() {
        v / len
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
