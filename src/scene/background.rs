//! Procedural background content painted behind the glass.
//!
//! Layers paint in order (painter's algorithm, straight-alpha source-over). Each layer fills its
//! optional `bounds` (default: whole canvas), clipped to a rounded rectangle when
//! `corner_radius > 0`.

use std::path::{Path, PathBuf};

use kurbo::{Point, Vec2};

use crate::foundation::core::{Canvas, Color};
use crate::foundation::error::{GlassError, GlassResult};
use crate::pipeline::sampler::{BackgroundImage, BackgroundSampler};
use crate::pipeline::sdf::rounded_rect_sdf;
use crate::scene::model::Bounds;

/// Stops of the built-in rainbow fill.
pub const RAINBOW: [Color; 7] = [
    Color::new(1.0, 0.0, 0.0, 1.0),
    Color::new(1.0, 127.0 / 255.0, 0.0, 1.0),
    Color::new(1.0, 1.0, 0.0, 1.0),
    Color::new(0.0, 1.0, 0.0, 1.0),
    Color::new(0.0, 0.0, 1.0, 1.0),
    Color::new(75.0 / 255.0, 0.0, 130.0 / 255.0, 1.0),
    Color::new(148.0 / 255.0, 0.0, 211.0 / 255.0, 1.0),
];

/// What a layer paints.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fill {
    /// Uniform color.
    Solid {
        /// Fill color.
        color: Color,
    },
    /// Evenly spaced color stops along a line.
    ///
    /// `start`/`end` are relative to the layer bounds; the default runs from the top-left to the
    /// bottom-right corner.
    LinearGradient {
        /// At least one stop.
        stops: Vec<Color>,
        /// Gradient start, relative to the layer.
        #[serde(default)]
        start: Option<Point>,
        /// Gradient end, relative to the layer.
        #[serde(default)]
        end: Option<Point>,
    },
    /// Alternating square cells, `even` at the layer origin.
    Checkerboard {
        /// Cell edge in pixels.
        cell: f64,
        /// Color of cells where `col + row` is even.
        #[serde(default = "white")]
        even: Color,
        /// Color of the other cells.
        #[serde(default = "black")]
        odd: Color,
    },
    /// Grid paper: thin lines every `cell` pixels over a paper color.
    Grid {
        /// Line spacing in pixels.
        cell: f64,
        /// Line thickness in pixels.
        #[serde(default = "one")]
        line_width: f64,
        /// Line color, blended over the paper.
        #[serde(default = "grid_line")]
        line: Color,
        /// Paper color.
        #[serde(default = "white")]
        paper: Color,
    },
    /// Diagonal seven-color rainbow.
    Rainbow,
    /// External raster image stretched over the layer.
    Image {
        /// Path relative to the scene file.
        path: PathBuf,
    },
}

fn white() -> Color {
    Color::WHITE
}

fn black() -> Color {
    Color::BLACK
}

fn grid_line() -> Color {
    Color::BLACK.with_alpha(0.3)
}

fn one() -> f64 {
    1.0
}

/// One background layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundLayer {
    /// Layer content.
    #[serde(flatten)]
    pub fill: Fill,
    /// Area covered by the layer; the whole canvas when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    /// Rounded clip radius in pixels.
    #[serde(default)]
    pub corner_radius: f64,
}

impl BackgroundLayer {
    /// Full-canvas layer.
    pub fn new(fill: Fill) -> Self {
        Self {
            fill,
            bounds: None,
            corner_radius: 0.0,
        }
    }

    /// Restrict the layer to `bounds`, clipped with `corner_radius`.
    pub fn within(self, bounds: Bounds, corner_radius: f64) -> Self {
        Self {
            bounds: Some(bounds),
            corner_radius,
            ..self
        }
    }

    /// Check the layer for values that cannot be painted.
    pub fn validate(&self) -> GlassResult<()> {
        if let Some(b) = &self.bounds {
            b.validate("background layer")?;
        }
        if !(self.corner_radius.is_finite() && self.corner_radius >= 0.0) {
            return Err(GlassError::validation(
                "background corner_radius must be finite and >= 0",
            ));
        }
        match &self.fill {
            Fill::Solid { .. } | Fill::Rainbow => Ok(()),
            Fill::LinearGradient { stops, start, end } => {
                if stops.is_empty() {
                    return Err(GlassError::validation(
                        "linear_gradient needs at least one stop",
                    ));
                }
                if start.iter().chain(end.iter()).any(|p| !p.is_finite()) {
                    return Err(GlassError::validation(
                        "linear_gradient start/end must be finite",
                    ));
                }
                Ok(())
            }
            Fill::Checkerboard { cell, .. } => positive("checkerboard cell", *cell),
            Fill::Grid {
                cell, line_width, ..
            } => {
                positive("grid cell", *cell)?;
                positive("grid line_width", *line_width)
            }
            Fill::Image { path } => {
                if path.as_os_str().is_empty() {
                    return Err(GlassError::validation("image path must be non-empty"));
                }
                if path.is_absolute() {
                    return Err(GlassError::validation(format!(
                        "image path '{}' must be relative to the scene file",
                        path.display()
                    )));
                }
                Ok(())
            }
        }
    }
}

fn positive(what: &str, v: f64) -> GlassResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(GlassError::validation(format!("{what} must be finite and > 0")))
    }
}

enum Painter {
    Solid(Color),
    Gradient {
        stops: Vec<Color>,
        start: Point,
        dir: Vec2,
        len2: f64,
    },
    Checkerboard {
        cell: f64,
        even: Color,
        odd: Color,
    },
    Grid {
        cell: f64,
        half_width: f64,
        line: Color,
        paper: Color,
    },
    Image {
        image: BackgroundImage,
        scale: Vec2,
    },
}

impl Painter {
    fn new(fill: &Fill, size: Vec2, assets_root: &Path) -> GlassResult<Self> {
        Ok(match fill {
            Fill::Solid { color } => Self::Solid(*color),
            Fill::LinearGradient { stops, start, end } => {
                let start = start.unwrap_or(Point::ZERO);
                let end = end.unwrap_or(Point::new(size.x, size.y));
                Self::gradient(stops.clone(), start, end)
            }
            Fill::Rainbow => Self::gradient(RAINBOW.to_vec(), Point::ZERO, Point::new(size.x, size.y)),
            Fill::Checkerboard { cell, even, odd } => Self::Checkerboard {
                cell: *cell,
                even: *even,
                odd: *odd,
            },
            Fill::Grid {
                cell,
                line_width,
                line,
                paper,
            } => Self::Grid {
                cell: *cell,
                half_width: line_width * 0.5,
                line: *line,
                paper: *paper,
            },
            Fill::Image { path } => {
                let full = assets_root.join(path);
                let decoded = image::open(&full).map_err(|e| {
                    GlassError::io(format!("read background image '{}': {e}", full.display()))
                })?;
                let image = BackgroundImage::new(decoded.into_rgba32f())?;
                let scale = Vec2::new(
                    f64::from(image.width()) / size.x.max(1.0),
                    f64::from(image.height()) / size.y.max(1.0),
                );
                Self::Image { image, scale }
            }
        })
    }

    fn gradient(stops: Vec<Color>, start: Point, end: Point) -> Self {
        let dir = end - start;
        Self::Gradient {
            stops,
            start,
            dir,
            len2: dir.hypot2(),
        }
    }

    fn color_at(&self, p: Point) -> Color {
        match self {
            Self::Solid(c) => *c,
            Self::Gradient {
                stops,
                start,
                dir,
                len2,
            } => {
                let t = if *len2 > 0.0 {
                    ((p - *start).dot(*dir) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                gradient_at(stops, t)
            }
            Self::Checkerboard { cell, even, odd } => {
                let parity = ((p.x / cell).floor() + (p.y / cell).floor()).rem_euclid(2.0);
                if parity < 1.0 { *even } else { *odd }
            }
            Self::Grid {
                cell,
                half_width,
                line,
                paper,
            } => {
                let near = |v: f64| {
                    let m = v.rem_euclid(*cell);
                    m.min(cell - m) <= *half_width
                };
                if near(p.x) || near(p.y) {
                    line.over(*paper)
                } else {
                    *paper
                }
            }
            Self::Image { image, scale } => {
                image.sample(Point::new(p.x * scale.x, p.y * scale.y))
            }
        }
    }
}

fn gradient_at(stops: &[Color], t: f64) -> Color {
    match stops {
        [] => Color::TRANSPARENT,
        [only] => *only,
        _ => {
            let segments = (stops.len() - 1) as f64;
            let pos = t * segments;
            let i = (pos.floor() as usize).min(stops.len() - 2);
            stops[i].mix(stops[i + 1], (pos - i as f64) as f32)
        }
    }
}

/// Paint `layers` into a background raster of `canvas` size.
///
/// The raster starts fully transparent. Image paths resolve against `assets_root`.
#[tracing::instrument(skip(layers), fields(layers = layers.len()))]
pub fn paint_background(
    layers: &[BackgroundLayer],
    canvas: Canvas,
    assets_root: &Path,
) -> GlassResult<BackgroundImage> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(GlassError::validation("canvas width/height must be > 0"));
    }
    let mut pixels = image::Rgba32FImage::new(canvas.width, canvas.height);
    let full = Bounds::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height));

    for layer in layers {
        layer.validate()?;
        let bounds = layer.bounds.unwrap_or(full);
        let size = Vec2::new(bounds.width, bounds.height);
        if size.x <= 0.0 || size.y <= 0.0 {
            continue;
        }
        let painter = Painter::new(&layer.fill, size, assets_root)?;
        let origin = Point::new(bounds.x, bounds.y);
        let half = size * 0.5;

        let x0 = bounds.x.floor().max(0.0) as u32;
        let y0 = bounds.y.floor().max(0.0) as u32;
        let x1 = (bounds.x + bounds.width).ceil().clamp(0.0, f64::from(canvas.width)) as u32;
        let y1 = (bounds.y + bounds.height).ceil().clamp(0.0, f64::from(canvas.height)) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                let local = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5) - origin;
                let centred = local - half;
                if rounded_rect_sdf(centred, half, layer.corner_radius) > 0.0 {
                    continue;
                }
                let px = pixels.get_pixel_mut(x, y);
                let src = painter.color_at(local.to_point());
                px.0 = src.over(Color::from(px.0)).to_array();
            }
        }
    }

    tracing::debug!(width = canvas.width, height = canvas.height, "painted background");
    BackgroundImage::new(pixels)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/background.rs"]
mod tests;
