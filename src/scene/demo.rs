//! Built-in demo scenes.

use crate::element::model::{GlassId, GlassParams, GlassShape};
use crate::foundation::core::{Canvas, Color, Density};
use crate::pipeline::evaluate::PipelineOpts;
use crate::scene::background::{BackgroundLayer, Fill};
use crate::scene::model::{Bounds, GlassRegion, Scene};

const DEMO_DENSITY: f32 = 2.0;
const SCREEN_DP: (f64, f64) = (360.0, 640.0);

/// Available demo scenes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Demo {
    /// A configurable glass button and a small settings button over a scrolling page.
    Button,
    /// Three glass boxes of increasing strength side by side.
    Preview,
}

impl Demo {
    /// Every demo, in listing order.
    pub const ALL: [Demo; 2] = [Demo::Button, Demo::Preview];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Preview => "preview",
        }
    }

    /// Build the scene.
    pub fn scene(self) -> Scene {
        match self {
            Self::Button => button_scene(),
            Self::Preview => preview_scene(),
        }
    }
}

/// Parameters of the demo's main glass button.
pub fn glass_button_params() -> GlassParams {
    GlassParams {
        scale: 0.3,
        blur: 0.4,
        center_distortion: 0.0,
        shape: GlassShape::Rounded { radius: 30.0 },
        elevation: 8.0,
        tint: Color::new(1.0, 1.0, 1.0, 200.0 / 255.0),
        darkness: 0.0,
        warp_edges: 0.5,
    }
}

fn settings_button_params() -> GlassParams {
    GlassParams {
        scale: 0.1,
        blur: 0.4,
        center_distortion: 0.0,
        shape: GlassShape::Rounded { radius: 16.0 },
        elevation: 8.0,
        tint: Color::from_argb(0xFFCC_CCCC),
        darkness: 0.5,
        warp_edges: 0.8,
    }
}

/// Screen-space layout helper: converts dp rectangles to pixel [`Bounds`].
struct Layout {
    density: f64,
}

impl Layout {
    fn new() -> Self {
        Self {
            density: f64::from(DEMO_DENSITY),
        }
    }

    fn px(&self, dp: f64) -> f64 {
        dp * self.density
    }

    fn rect(&self, x: f64, y: f64, w: f64, h: f64) -> Bounds {
        Bounds::new(self.px(x), self.px(y), self.px(w), self.px(h))
    }

    fn canvas(&self) -> Canvas {
        Canvas {
            width: self.px(SCREEN_DP.0) as u32,
            height: self.px(SCREEN_DP.1) as u32,
        }
    }
}

fn button_scene() -> Scene {
    let l = Layout::new();
    let (sw, sh) = SCREEN_DP;
    let content_w = sw - 32.0;

    let mut background = vec![
        BackgroundLayer::new(Fill::Solid {
            color: Color::BLACK,
        }),
        BackgroundLayer::new(Fill::LinearGradient {
            stops: [
                0xFF1a_1a2e,
                0xFF2d_1b69,
                0xFF4a_148c,
                0xFF1a_237e,
                0xFF0d_47a1,
                0xFF6a_1b9a,
                0xFF28_3593,
                0xFF15_65c0,
                0xFF16_213e,
                0xFF0f_3460,
            ]
            .into_iter()
            .map(Color::from_argb)
            .collect(),
            start: None,
            end: None,
        }),
    ];

    // Info cards.
    let mut y = 16.0;
    for argb in [0xFF66_7eea, 0xFF76_4ba2, 0xFFf0_93fb] {
        y += 8.0;
        background.push(
            BackgroundLayer::new(Fill::Solid {
                color: Color::from_argb(argb).with_alpha(0.3),
            })
            .within(l.rect(16.0, y, content_w, 120.0), l.px(12.0)),
        );
        y += 128.0;
    }

    // Picture boxes: grid paper, black, white, rainbow, then the chessboard.
    let fills = [
        Fill::Grid {
            cell: l.px(20.0),
            line_width: l.px(1.0),
            line: Color::BLACK.with_alpha(0.3),
            paper: Color::WHITE,
        },
        Fill::Solid {
            color: Color::BLACK,
        },
        Fill::Solid {
            color: Color::WHITE,
        },
        Fill::Rainbow,
        Fill::Checkerboard {
            cell: l.px(40.0),
            even: Color::WHITE,
            odd: Color::BLACK,
        },
    ];
    for fill in fills {
        y += 8.0;
        background.push(
            BackgroundLayer::new(fill).within(l.rect(16.0, y, content_w, 164.0), l.px(12.0)),
        );
        y += 172.0;
    }

    let (bw, bh) = (200.0, 60.0);
    let regions = vec![
        GlassRegion::new(
            GlassId(1),
            l.rect((sw - bw) / 2.0, sh - 32.0 - bh, bw, bh),
            glass_button_params(),
        ),
        GlassRegion::new(
            GlassId(2),
            l.rect(sw - 16.0 - 48.0, 32.0, 48.0, 48.0),
            settings_button_params(),
        ),
    ];

    Scene {
        canvas: l.canvas(),
        density: Density(DEMO_DENSITY),
        frames: 1,
        pipeline: PipelineOpts::default(),
        background,
        regions,
    }
}

fn preview_scene() -> Scene {
    let l = Layout::new();
    let (sw, sh) = SCREEN_DP;

    let mut background = vec![BackgroundLayer::new(Fill::LinearGradient {
        stops: vec![Color::BLACK, Color::new(0.0, 0.0, 1.0, 1.0)],
        start: Some(kurbo::Point::ZERO),
        end: Some(kurbo::Point::new(0.0, l.px(sh))),
    })];
    let gray = Color::from_argb(0xFF88_8888);
    for i in 0..10 {
        let row = Color {
            r: 0.1 * i as f32,
            ..gray
        };
        background.push(
            BackgroundLayer::new(Fill::Solid { color: row })
                .within(l.rect(12.0, 12.0 + 88.0 * f64::from(i), sw - 24.0, 64.0), 0.0),
        );
    }

    let small = |id, x| {
        GlassRegion::new(GlassId(id), l.rect(x, (sh - 80.0) / 2.0, 80.0, 80.0), GlassParams::default())
    };
    let mut left = small(1, 0.0);
    left.params = GlassParams {
        scale: 0.3,
        center_distortion: 0.2,
        shape: GlassShape::Circle,
        tint: Color::new(0.0, 0.0, 1.0, 0.5),
        warp_edges: 0.5,
        ..GlassParams::default()
    };
    let centre = GlassRegion::new(
        GlassId(2),
        l.rect(80.0, (sh - 300.0) / 2.0, 200.0, 300.0),
        GlassParams {
            scale: 0.5,
            blur: 0.5,
            center_distortion: 0.5,
            shape: GlassShape::Rounded { radius: 16.0 },
            elevation: 8.0,
            darkness: 0.5,
            warp_edges: 0.7,
            ..GlassParams::default()
        },
    );
    let mut right = small(3, 280.0);
    right.params = GlassParams {
        scale: 1.0,
        blur: 1.0,
        center_distortion: 1.0,
        shape: GlassShape::Circle,
        elevation: 6.0,
        tint: Color::new(1.0, 0.0, 0.0, 0.1),
        darkness: 0.3,
        warp_edges: 0.9,
    };

    Scene {
        canvas: l.canvas(),
        density: Density(DEMO_DENSITY),
        frames: 1,
        pipeline: PipelineOpts::default(),
        background,
        regions: vec![left, centre, right],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/demo.rs"]
mod tests;
