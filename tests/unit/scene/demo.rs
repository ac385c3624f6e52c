use super::*;
use crate::element::registry::MAX_ACTIVE_ELEMENTS;

#[test]
fn demos_validate() {
    for demo in Demo::ALL {
        let scene = demo.scene();
        scene.validate().unwrap();
        assert_eq!(scene.canvas.width, 720, "{}", demo.name());
        assert_eq!(scene.canvas.height, 1280, "{}", demo.name());
        assert!(scene.regions.len() <= MAX_ACTIVE_ELEMENTS);
    }
}

#[test]
fn button_sits_bottom_centre() {
    let scene = Demo::Button.scene();
    let button = &scene.regions[0];
    assert_eq!(button.bounds, Bounds::new(160.0, 1096.0, 400.0, 120.0));
    assert_eq!(button.params, glass_button_params());
}

#[test]
fn preview_boxes_fill_the_row() {
    let scene = Demo::Preview.scene();
    let xs: Vec<f64> = scene.regions.iter().map(|r| r.bounds.x).collect();
    assert_eq!(xs, vec![0.0, 160.0, 560.0]);
    let right = scene.regions[2].bounds;
    assert_eq!(right.x + right.width, f64::from(scene.canvas.width));
}

#[test]
fn demo_regions_resolve_through_the_driver() {
    let scene = Demo::Preview.scene();
    let mut driver = scene.driver();
    {
        let mut pass = driver.begin_frame();
        assert_eq!(scene.report_frame(&mut pass, 0), 3);
    }
    let params = *driver.prepare().params();
    assert_eq!(params.count, 3);
    // Circle: half of the 160 px box.
    assert_eq!(params.corner_radii[0], 80.0);
    // 16 dp at density 2.
    assert_eq!(params.corner_radii[1], 32.0);
    assert_eq!(params.elevations[1], 16.0);
}

#[test]
fn demo_scenes_round_trip_through_json() {
    let scene = Demo::Button.scene();
    let json = serde_json::to_string(&scene).unwrap();
    assert_eq!(Scene::from_json_str(&json).unwrap(), scene);
}
