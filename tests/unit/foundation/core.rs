use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(3, 2).unwrap();
    assert_eq!(c.rgba8_len().unwrap(), 24);
}

#[test]
fn color_from_argb_matches_channels() {
    let c = Color::from_argb(0xFF1a_1a2e);
    assert_eq!(c.to_rgba8(), [0x1a, 0x1a, 0x2e, 0xff]);
}

#[test]
fn color_mix_rgb_keeps_alpha() {
    let a = Color::new(0.0, 0.0, 0.0, 0.25);
    let b = Color::new(1.0, 1.0, 1.0, 1.0);
    let m = a.mix_rgb(b, 0.5);
    assert_eq!(m, Color::new(0.5, 0.5, 0.5, 0.25));
}

#[test]
fn color_to_rgba8_clamps_out_of_range() {
    let c = Color::new(1.8, -0.2, f32::NAN, 0.5);
    assert_eq!(c.to_rgba8(), [255, 0, 0, 128]);
}

#[test]
fn color_serializes_as_array() {
    let c = Color::new(0.25, 0.5, 0.75, 1.0);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "[0.25,0.5,0.75,1.0]");
    let back: Color = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}

#[test]
fn density_scales_dp() {
    assert_eq!(Density(2.5).to_px(8.0), 20.0);
    assert_eq!(Density::default().to_px(8.0), 8.0);
}

#[test]
fn over_respects_alpha() {
    let red = Color::new(1.0, 0.0, 0.0, 1.0);
    assert_eq!(red.over(Color::WHITE), red);
    assert_eq!(Color::TRANSPARENT.over(Color::WHITE), Color::WHITE);
    assert_eq!(Color::TRANSPARENT.over(Color::TRANSPARENT), Color::TRANSPARENT);

    let half = Color::new(0.0, 0.0, 0.0, 0.5).over(Color::WHITE);
    assert!((half.r - 0.5).abs() < 1e-6);
    assert_eq!(half.a, 1.0);
}
