use super::*;

fn base() -> GlassElement {
    let mut e = GlassElement::new(GlassId(7), Point::new(10.0, 20.0), Size::new(100.0, 50.0));
    e.scale = 0.5;
    e.tint = Color::new(0.0, 0.0, 1.0, 0.5);
    e
}

#[test]
fn position_within_tolerance_is_unchanged() {
    let a = base();
    let mut b = a;
    b.position = Point::new(10.005, 20.0);
    assert!(a.equals_with_tolerance(&b));
}

#[test]
fn position_beyond_tolerance_is_changed() {
    let a = base();
    let mut b = a;
    b.position = Point::new(10.02, 20.0);
    assert!(!a.equals_with_tolerance(&b));
}

#[test]
fn scalar_deltas_follow_tolerance() {
    let a = base();
    let mut b = a;
    b.scale += 0.005;
    assert!(a.equals_with_tolerance(&b));
    b.scale += 0.02;
    assert!(!a.equals_with_tolerance(&b));

    let mut c = a;
    c.size.width += 0.02;
    assert!(!a.equals_with_tolerance(&c));
}

#[test]
fn tint_compares_exactly() {
    let a = base();
    let mut b = a;
    b.tint.a += 0.001;
    assert!(!a.equals_with_tolerance(&b));
}

#[test]
fn different_ids_are_never_equal() {
    let a = base();
    let mut b = a;
    b.id = GlassId(8);
    assert!(!a.equals_with_tolerance(&b));
}

#[test]
fn negative_or_nan_size_is_sanitized_to_degenerate() {
    let e = GlassElement::new(GlassId(1), Point::ZERO, Size::new(-5.0, f64::NAN));
    assert_eq!(e.size, Size::ZERO);
    assert!(e.is_degenerate());
}

#[test]
fn shape_radius_resolution() {
    let size = Size::new(80.0, 40.0);
    let d = Density(2.0);
    assert_eq!(GlassShape::Rect.corner_radius_px(size, d), 0.0);
    assert_eq!(GlassShape::Circle.corner_radius_px(size, d), 20.0);
    assert_eq!(GlassShape::Rounded { radius: 8.0 }.corner_radius_px(size, d), 16.0);
    assert_eq!(
        GlassShape::Percent { percent: 25.0 }.corner_radius_px(size, d),
        10.0
    );
}

#[test]
fn from_placement_converts_elevation_with_density() {
    let params = GlassParams {
        elevation: 8.0,
        shape: GlassShape::Circle,
        ..GlassParams::default()
    };
    let placement = Placement::new(Point::new(50.0, 50.0), Size::new(100.0, 100.0));
    let e = GlassElement::from_placement(GlassId(3), placement, &params, Density(1.5));
    assert_eq!(e.elevation, 12.0);
    assert_eq!(e.corner_radius, 50.0);
    assert_eq!(e.center(), Point::new(100.0, 100.0));
}

#[test]
fn params_default_is_all_disabled() {
    let p: GlassParams = serde_json::from_str("{}").unwrap();
    assert_eq!(p, GlassParams::default());
    assert_eq!(p.tint, Color::TRANSPARENT);
}

#[test]
fn id_display_and_allocation() {
    let mut alloc = GlassIdAllocator::starting_at(5);
    let a = alloc.allocate();
    let b = alloc.allocate();
    assert_eq!(a.to_string(), "glass_5");
    assert_eq!(b, GlassId(6));
}
