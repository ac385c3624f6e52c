use super::*;
use crate::element::model::{GlassElement, GlassId};
use crate::pack::params::pack;
use kurbo::Size;

fn gradient(p: Point) -> Color {
    Color::new((p.x / 400.0) as f32, (p.y / 400.0) as f32, 0.25, 1.0)
}

fn element(id: u64, x: f64, y: f64, w: f64, h: f64) -> GlassElement {
    GlassElement::new(GlassId(id), Point::new(x, y), Size::new(w, h))
}

fn bind(elements: &[GlassElement]) -> GlassEvaluator {
    GlassEvaluator::bind(&pack(elements, MAX_PACKED_ELEMENTS), PipelineOpts::default())
}

fn grid() -> impl Iterator<Item = Point> {
    (0..40).flat_map(|y| (0..40).map(move |x| Point::new(x as f64 * 5.0 + 0.5, y as f64 * 5.0 + 0.5)))
}

#[test]
fn empty_block_is_pass_through() {
    let eval = bind(&[]);
    assert!(eval.is_identity());
    for p in grid() {
        assert_eq!(eval.evaluate(p, &gradient), gradient(p));
    }
}

#[test]
fn disabled_element_is_pass_through() {
    let mut e = element(1, 20.0, 20.0, 120.0, 80.0);
    e.corner_radius = 16.0;
    let eval = bind(&[e]);
    assert!(eval.is_identity());
    for p in grid() {
        assert!(eval.trace(p).is_identity());
        assert_eq!(eval.evaluate(p, &gradient), gradient(p));
    }
}

#[test]
fn degenerate_element_is_skipped() {
    let mut e = element(1, 20.0, 20.0, 0.0, 80.0);
    e.tint = Color::new(1.0, 0.0, 0.0, 1.0);
    e.scale = 1.0;
    let eval = bind(&[e]);
    for p in grid() {
        assert_eq!(eval.evaluate(p, &gradient), gradient(p));
    }
}

#[test]
fn lens_magnifies_toward_centre() {
    let mut e = element(1, 50.0, 50.0, 100.0, 100.0);
    e.corner_radius = 50.0;
    e.scale = 0.5;
    let eval = bind(&[e]);

    let centre = Point::new(100.0, 100.0);
    assert_eq!(eval.trace(centre).sample_coord, centre);
    assert_eq!(eval.evaluate(centre, &gradient), gradient(centre));

    let inner = eval.trace(Point::new(130.0, 100.0)).sample_coord;
    assert!((inner.x - 120.0).abs() < 1e-9);
    assert!((inner.y - 100.0).abs() < 1e-9);

    let edge = Point::new(150.0, 100.0);
    let t = eval.trace(edge);
    assert_eq!(t.sample_coord, edge);
    assert_eq!(t.rim_highlight, 0.0);
    assert_eq!(eval.evaluate(edge, &gradient), gradient(edge));
}

#[test]
fn elevation_shadow_darkens_below_only() {
    let white = |_: Point| Color::WHITE;
    let mut e = element(1, 0.0, 0.0, 100.0, 60.0);
    e.elevation = 8.0;
    let eval = bind(&[e]);

    assert_eq!(eval.trace(Point::new(50.0, 30.0)).shadow_alpha, 0.0);
    assert_eq!(eval.evaluate(Point::new(50.0, 30.0), &white), Color::WHITE);

    let below = eval.trace(Point::new(50.0, 62.0));
    assert!(below.shadow_alpha > 0.0);

    let c = eval.evaluate(Point::new(50.0, 72.0), &white);
    assert!((c.r - 0.925).abs() < 1e-5, "{c:?}");
    assert_eq!(c.a, 1.0);

    assert_eq!(eval.evaluate(Point::new(50.0, 120.0), &white), Color::WHITE);
}

#[test]
fn tint_applies_before_darkness() {
    let white = |_: Point| Color::WHITE;
    let mut e = element(1, 0.0, 0.0, 100.0, 100.0);
    e.tint = Color::new(1.0, 0.0, 0.0, 1.0);
    e.darkness = 1.0;
    let eval = bind(&[e]);

    let tinted = Color::new(1.0, 0.5, 0.5, 1.0);
    assert_eq!(eval.evaluate(Point::new(50.0, 50.0), &white), tinted);

    let near_edge = Point::new(50.0, 1.5);
    let t = eval.trace(near_edge);
    assert!(t.darkness > 0.9);
    let expected = tinted.mix_rgb(Color::BLACK, (t.darkness * 0.5) as f32);
    assert_eq!(eval.shade(&t, &white), expected);
}

#[test]
fn overlapping_tints_blend_in_order() {
    let mut a = element(1, 0.0, 0.0, 100.0, 100.0);
    a.tint = Color::new(1.0, 0.0, 0.0, 0.5);
    let mut b = element(2, 50.0, 0.0, 100.0, 100.0);
    b.tint = Color::new(0.0, 0.0, 1.0, 0.5);

    let t = bind(&[a, b]).trace(Point::new(75.0, 50.0));
    let expected = Color::TRANSPARENT
        .mix(a.tint, 0.5)
        .mix(b.tint, 0.5);
    assert_eq!(t.tint, expected);

    let swapped = bind(&[b, a]).trace(Point::new(75.0, 50.0));
    assert_ne!(swapped.tint, t.tint);
}

#[test]
fn blur_preserves_flat_background() {
    let flat = |_: Point| Color::new(0.2, 0.4, 0.6, 1.0);
    let mut e = element(1, 0.0, 0.0, 200.0, 200.0);
    e.blur = 0.5;
    e.scale = 0.2;

    for mode in [BlurMode::Gaussian, BlurMode::LensAware] {
        let eval = GlassEvaluator::bind(
            &pack(&[e], MAX_PACKED_ELEMENTS),
            PipelineOpts { blur_mode: mode },
        );
        let t = eval.trace(Point::new(100.0, 100.0));
        assert_eq!(t.blur_radius, 10.0);
        let c = eval.shade(&t, &flat);
        assert!((c.r - 0.2).abs() < 1e-4, "{mode:?} {c:?}");
        assert!((c.g - 0.4).abs() < 1e-4, "{mode:?} {c:?}");
        assert!((c.b - 0.6).abs() < 1e-4, "{mode:?} {c:?}");
    }
}

#[test]
fn blur_radius_is_largest_containing_element() {
    let mut a = element(1, 0.0, 0.0, 100.0, 100.0);
    a.blur = 0.25;
    let mut b = element(2, 50.0, 50.0, 100.0, 100.0);
    b.blur = 1.0;
    let eval = bind(&[a, b]);
    assert_eq!(eval.trace(Point::new(25.0, 25.0)).blur_radius, 5.0);
    assert_eq!(eval.trace(Point::new(75.0, 75.0)).blur_radius, 20.0);
    assert_eq!(eval.trace(Point::new(180.0, 20.0)).blur_radius, 0.0);
}

#[test]
fn rim_normal_points_outward() {
    let mut e = element(1, 0.0, 20.0, 100.0, 60.0);
    e.scale = 0.1;
    let eval = bind(&[e]);

    let above = eval.trace(Point::new(50.0, 18.0));
    assert!(above.rim_highlight > 0.0);
    assert!(above.rim_normal.y < -0.99, "{:?}", above.rim_normal);

    let right = eval.trace(Point::new(102.0, 50.0));
    assert!(right.rim_normal.x > 0.99, "{:?}", right.rim_normal);

    let far = eval.trace(Point::new(50.0, 10.0));
    assert_eq!(far.rim_highlight, 0.0);
    assert_eq!(far.rim_normal, Vec2::ZERO);
}

#[test]
fn free_function_matches_bound_evaluator() {
    let mut e = element(1, 10.0, 10.0, 120.0, 90.0);
    e.scale = 0.3;
    e.center_distortion = 0.5;
    e.tint = Color::new(0.1, 0.8, 0.3, 0.4);
    e.warp_edges = 0.6;
    let params = pack(&[e], MAX_PACKED_ELEMENTS);
    let eval = GlassEvaluator::bind(&params, PipelineOpts::default());
    for p in grid() {
        assert_eq!(evaluate(p, &params, &gradient), eval.evaluate(p, &gradient));
    }
}

#[test]
fn extreme_blur_is_bounded() {
    let bg = crate::pipeline::sampler::BackgroundImage::from_fn(32, 32, gradient).unwrap();
    let mut e = element(1, 0.0, 0.0, 40.0, 40.0);
    e.blur = 1.0e18;
    e.scale = 0.5;
    let params = pack(&[e], MAX_PACKED_ELEMENTS);

    let frag = Point::new(20.5, 17.5);
    let eval = bind(&[e]);
    assert_eq!(eval.trace(frag).blur_radius, MAX_BLUR_RADIUS);
    let c = evaluate(frag, &params, &bg);
    assert!(c.is_finite(), "{c:?}");
    assert_eq!(c.a, 1.0);
}
