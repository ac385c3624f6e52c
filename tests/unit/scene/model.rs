use super::*;
use crate::element::registry::ReportOutcome;

const MOVING: &str = r#"{
    "canvas": { "width": 64, "height": 48 },
    "frames": 4,
    "regions": [
        {
            "id": 1,
            "bounds": { "x": 4, "y": 4, "width": 20, "height": 20 },
            "params": { "scale": 0.5, "shape": { "kind": "circle" } },
            "motion": { "velocity": { "x": 2.0, "y": 0.0 } }
        },
        {
            "id": 2,
            "bounds": { "x": 30, "y": 10, "width": 24, "height": 16 },
            "params": { "blur": 0.2 },
            "visible": { "start": 0, "end": 2 }
        }
    ]
}"#;

#[test]
fn defaults_fill_missing_fields() {
    let scene = Scene::from_json_str(r#"{ "canvas": { "width": 8, "height": 8 } }"#).unwrap();
    assert_eq!(scene.frames, 1);
    assert_eq!(scene.density, Density(1.0));
    assert!(scene.regions.is_empty());
    assert!(scene.background.is_empty());
}

#[test]
fn motion_and_visibility_drive_placements() {
    let scene = Scene::from_json_str(MOVING).unwrap();
    let p0 = scene.placements_at(0);
    assert_eq!(p0.len(), 2);
    assert_eq!(p0[&GlassId(1)].position, Point::new(4.0, 4.0));

    let p3 = scene.placements_at(3);
    assert_eq!(p3.len(), 1);
    assert_eq!(p3[&GlassId(1)].position, Point::new(10.0, 4.0));
    assert!(!p3.contains_key(&GlassId(2)));
}

#[test]
fn report_frame_expires_hidden_regions() {
    let scene = Scene::from_json_str(MOVING).unwrap();
    let mut driver = scene.driver();
    for frame in 0..scene.frames {
        let mut pass = driver.begin_frame();
        let reported = scene.report_frame(&mut pass, frame);
        assert_eq!(reported, if frame < 2 { 2 } else { 1 });
    }
    assert_eq!(driver.registry().len(), 1);
    assert_eq!(driver.stats().removed, 1);
}

#[test]
fn stationary_region_is_reported_unchanged() {
    let scene = Scene::from_json_str(MOVING).unwrap();
    let mut driver = scene.driver();
    let mut pass = driver.begin_frame();
    let placement = scene.regions[1].placement_at(0).unwrap();
    let params = scene.regions[1].params;
    pass.on_placed(GlassId(2), placement.position, placement.size, &params);
    assert_eq!(
        pass.on_placed(GlassId(2), placement.position, placement.size, &params),
        ReportOutcome::Unchanged
    );
}

#[test]
fn validation_rejects_bad_scenes() {
    let bad = [
        r#"{ "canvas": { "width": 0, "height": 8 } }"#,
        r#"{ "canvas": { "width": 8, "height": 8 }, "density": 0 }"#,
        r#"{ "canvas": { "width": 8, "height": 8 }, "frames": 0 }"#,
        r#"{ "canvas": { "width": 8, "height": 8 }, "regions": [
            { "id": 1, "bounds": { "x": 0, "y": 0, "width": 4, "height": 4 } },
            { "id": 1, "bounds": { "x": 4, "y": 0, "width": 4, "height": 4 } } ] }"#,
        r#"{ "canvas": { "width": 8, "height": 8 }, "regions": [
            { "id": 1, "bounds": { "x": 0, "y": 0, "width": -4, "height": 4 } } ] }"#,
        r#"{ "canvas": { "width": 8, "height": 8 }, "regions": [
            { "id": 1, "bounds": { "x": 0, "y": 0, "width": 4, "height": 4 },
              "visible": { "start": 3, "end": 3 } } ] }"#,
        r#"{ "canvas": { "width": 8, "height": 8 }, "background": [
            { "kind": "checkerboard", "cell": 0 } ] }"#,
        r#"{ "canvas": { "width": 8, "height": 8 }, "background": [
            { "kind": "image", "path": "/etc/hosts" } ] }"#,
    ];
    for json in bad {
        let err = Scene::from_json_str(json).unwrap_err();
        assert!(matches!(err, GlassError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Scene::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, GlassError::Serde(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Scene::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(matches!(err, GlassError::Io(_)));
}

#[test]
fn assets_root_defaults_to_current_dir() {
    assert_eq!(assets_root(Path::new("scene.json")), PathBuf::from("."));
    assert_eq!(assets_root(Path::new("a/b/scene.json")), PathBuf::from("a/b"));
}
