use super::*;
use crate::element::model::{GlassElement, GlassId};
use crate::foundation::core::{Color, Size};
use crate::pack::params::{MAX_PACKED_ELEMENTS, PackedParams, pack};
use crate::pipeline::evaluate::PipelineOpts;

fn checker(p: Point) -> Color {
    if ((p.x / 8.0).floor() as i64 + (p.y / 8.0).floor() as i64) % 2 == 0 {
        Color::WHITE
    } else {
        Color::new(0.1, 0.2, 0.3, 1.0)
    }
}

fn lens_evaluator() -> GlassEvaluator {
    let mut e = GlassElement::new(GlassId(1), Point::new(8.0, 8.0), Size::new(40.0, 24.0));
    e.corner_radius = 12.0;
    e.scale = 0.4;
    e.blur = 0.1;
    e.tint = Color::new(0.2, 0.6, 1.0, 0.3);
    e.elevation = 4.0;
    GlassEvaluator::bind(&pack(&[e], MAX_PACKED_ELEMENTS), PipelineOpts::default())
}

#[test]
fn empty_block_reproduces_background() {
    let eval = GlassEvaluator::bind(&PackedParams::default(), PipelineOpts::default());
    let canvas = Canvas::new(16, 16).unwrap();
    let frame = CpuRasterizer::new(RenderOpts::default())
        .unwrap()
        .render(&eval, &checker, canvas)
        .unwrap();
    assert_eq!(frame.data.len(), 16 * 16 * 4);
    assert!(!frame.premultiplied);
    for y in 0..16 {
        for x in 0..16 {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            assert_eq!(frame.pixel(x, y), Some(checker(p).to_rgba8()));
        }
    }
    assert_eq!(frame.pixel(16, 0), None);
}

#[test]
fn parallel_matches_sequential() {
    let eval = lens_evaluator();
    let canvas = Canvas::new(64, 48).unwrap();
    let seq = CpuRasterizer::new(RenderOpts::default())
        .unwrap()
        .render(&eval, &checker, canvas)
        .unwrap();
    let par = CpuRasterizer::new(RenderOpts {
        parallel: true,
        threads: Some(2),
    })
    .unwrap()
    .render(&eval, &checker, canvas)
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn global_pool_fills_caller_buffer() {
    let eval = lens_evaluator();
    let canvas = Canvas::new(33, 17).unwrap();
    let seq = CpuRasterizer::new(RenderOpts::default())
        .unwrap()
        .render(&eval, &checker, canvas)
        .unwrap();

    let rasterizer = CpuRasterizer::new(RenderOpts {
        parallel: true,
        threads: None,
    })
    .unwrap();
    let mut out = vec![0u8; canvas.rgba8_len().unwrap()];
    rasterizer.render_into(&eval, &checker, canvas, &mut out).unwrap();
    assert_eq!(out, seq.data);
}

#[test]
fn buffer_size_is_checked() {
    let eval = lens_evaluator();
    let canvas = Canvas::new(4, 4).unwrap();
    let r = CpuRasterizer::new(RenderOpts::default()).unwrap();
    let mut short = vec![0u8; 10];
    assert!(r.render_into(&eval, &checker, canvas, &mut short).is_err());

    let zero = Canvas {
        width: 0,
        height: 4,
    };
    assert!(r.render(&eval, &checker, zero).is_err());
}

#[test]
fn zero_threads_is_rejected() {
    let err = CpuRasterizer::new(RenderOpts {
        parallel: true,
        threads: Some(0),
    })
    .unwrap_err();
    assert!(err.to_string().contains("threads"));
}

#[test]
fn frame_converts_to_image() {
    let eval = lens_evaluator();
    let canvas = Canvas::new(8, 4).unwrap();
    let frame = CpuRasterizer::new(RenderOpts::default())
        .unwrap()
        .render(&eval, &checker, canvas)
        .unwrap();
    let img = frame.clone().into_image().unwrap();
    assert_eq!(img.dimensions(), (8, 4));
    assert_eq!(img.get_pixel(3, 2).0, frame.pixel(3, 2).unwrap());
}
