use super::*;
use kurbo::Point;

fn square() -> ElementGeometry {
    ElementGeometry {
        center: Point::new(50.0, 50.0),
        half: Vec2::new(50.0, 50.0),
        radius: 0.0,
    }
}

#[test]
fn band_membership() {
    let g = square();
    assert!(in_warp_band(&g, Vec2::new(45.0, 0.0), 0.5));
    assert!(!in_warp_band(&g, Vec2::new(10.0, 0.0), 0.5));
    assert!(!in_warp_band(&g, Vec2::new(55.0, 0.0), 0.5));
    assert!(!in_warp_band(&g, Vec2::new(45.0, 0.0), 0.0));
    assert!(!in_warp_band(&g, Vec2::new(45.0, 0.0), -1.0));
}

#[test]
fn band_pixels_are_pulled_inward() {
    let g = square();
    let w = warp_local(&g, Vec2::new(45.0, 0.0), 0.5);
    assert!((w.x - 32.526).abs() < 1e-9, "{w:?}");
    assert!(w.y.abs() < 1e-12);
}

#[test]
fn pull_grows_toward_outer_edge() {
    let g = square();
    let shift = |x: f64| x - warp_local(&g, Vec2::new(x, 0.0), 0.5).x;
    assert!(shift(49.0) > shift(44.0));
    assert!(shift(44.0) > shift(39.0));
}

#[test]
fn inner_region_is_identity() {
    let g = square();
    let v = Vec2::new(10.0, -5.0);
    assert_eq!(warp_local(&g, v, 0.5), v);
    assert_eq!(warp_local(&g, v, 0.0), v);
}

#[test]
fn strong_warp_swirls_outer_band() {
    let g = square();
    let w = warp_local(&g, Vec2::new(49.5, 0.0), 0.9);
    assert!(w.y > 0.0, "{w:?}");

    let calm = warp_local(&g, Vec2::new(49.5, 0.0), 0.6);
    assert!(calm.y.abs() < 1e-12);
}

#[test]
fn warp_above_one_is_clamped() {
    let g = square();
    let v = Vec2::new(45.0, 0.0);
    assert_eq!(warp_local(&g, v, 1.0), warp_local(&g, v, 5.0));
}
