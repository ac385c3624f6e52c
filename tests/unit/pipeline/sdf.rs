use super::*;

#[test]
fn rectangle_sign_inside_and_outside() {
    let half = Vec2::new(40.0, 20.0);
    for &(x, y) in &[(0.0, 0.0), (39.5, 19.5), (-39.9, 0.0), (10.0, -19.99)] {
        assert!(rounded_rect_sdf(Vec2::new(x, y), half, 0.0) < 0.0, "({x},{y})");
    }
    for &(x, y) in &[(40.5, 20.5), (-41.0, -21.0), (100.0, 30.0)] {
        assert!(rounded_rect_sdf(Vec2::new(x, y), half, 0.0) > 0.0, "({x},{y})");
    }
    assert_eq!(rounded_rect_sdf(Vec2::new(40.0, 0.0), half, 0.0), 0.0);
}

#[test]
fn distance_is_euclidean_outside_corner() {
    let half = Vec2::new(10.0, 10.0);
    let d = rounded_rect_sdf(Vec2::new(13.0, 14.0), half, 0.0);
    assert!((d - 5.0).abs() < 1e-12);
}

#[test]
fn circle_radius_matches_disc() {
    let half = Vec2::new(50.0, 50.0);
    let d = rounded_rect_sdf(Vec2::new(30.0, 40.0), half, 50.0);
    assert!(d.abs() < 1e-12);
    let d = rounded_rect_sdf(Vec2::new(0.0, 0.0), half, 50.0);
    assert!((d + 50.0).abs() < 1e-12);
}

#[test]
fn oversized_radius_behaves_as_capsule() {
    let half = Vec2::new(50.0, 20.0);
    let a = rounded_rect_sdf(Vec2::new(45.0, 15.0), half, 20.0);
    let b = rounded_rect_sdf(Vec2::new(45.0, 15.0), half, 500.0);
    assert_eq!(a, b);
}

#[test]
fn normal_points_outward() {
    let half = Vec2::new(20.0, 20.0);
    let n = sdf_normal(Vec2::new(0.0, -22.0), half, 0.0, 1.0);
    assert!(n.y < -0.99);
    let n = sdf_normal(Vec2::new(22.0, 0.0), half, 0.0, 1.0);
    assert!(n.x > 0.99);
}

#[test]
fn degenerate_geometry_is_rejected() {
    let mut e = PackedElement {
        position: [10.0, 10.0],
        size: [0.0, 0.0],
        scale: 1.0,
        blur: 0.0,
        corner_radius: 0.0,
        elevation: 8.0,
        center_distortion: 0.0,
        tint: crate::foundation::core::Color::TRANSPARENT,
        darkness: 0.0,
        warp_edges: 0.0,
    };
    assert!(ElementGeometry::from_packed(&e).is_none());
    e.size = [20.0, 10.0];
    let g = ElementGeometry::from_packed(&e).unwrap();
    assert_eq!(g.center, Point::new(20.0, 15.0));
    assert!(g.sdf_local(g.local(Point::new(20.0, 15.0))) < 0.0);
}
