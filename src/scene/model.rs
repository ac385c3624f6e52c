use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use kurbo::{Point, Size, Vec2};

use crate::element::model::{GlassId, GlassParams, Placement};
use crate::foundation::core::{Canvas, Density};
use crate::foundation::error::{GlassError, GlassResult};
use crate::pipeline::evaluate::PipelineOpts;
use crate::pipeline::sampler::BackgroundImage;
use crate::render::driver::{FrameDriver, LayoutPass};
use crate::scene::background::{BackgroundLayer, paint_background};

/// Axis-aligned rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width, `>= 0`.
    pub width: f64,
    /// Height, `>= 0`.
    pub height: f64,
}

impl Bounds {
    /// Rectangle from its top-left corner and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub(crate) fn validate(&self, what: &str) -> GlassResult<()> {
        let all_finite = [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(GlassError::validation(format!("{what} bounds must be finite")));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(GlassError::validation(format!(
                "{what} bounds must have width/height >= 0"
            )));
        }
        Ok(())
    }
}

/// Linear per-frame motion of a region.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Motion {
    /// Position change per frame, in pixels.
    pub velocity: Vec2,
    /// Size change per frame, in pixels (clamped at zero).
    pub growth: Vec2,
}

/// Half-open frame interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameSpan {
    /// First frame, inclusive.
    pub start: u64,
    /// Last frame, exclusive.
    pub end: u64,
}

impl FrameSpan {
    /// Return `true` when `frame` lies in the span.
    pub fn contains(&self, frame: u64) -> bool {
        self.start <= frame && frame < self.end
    }
}

/// One glass region declared by a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlassRegion {
    /// Stable identity.
    pub id: GlassId,
    /// Layout rectangle at frame 0.
    pub bounds: Bounds,
    /// Declared effect parameters.
    #[serde(default)]
    pub params: GlassParams,
    /// Optional movement over the frame sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<Motion>,
    /// Frames in which the region is laid out; every frame when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<FrameSpan>,
}

impl GlassRegion {
    /// Region with the given parameters and no motion.
    pub fn new(id: GlassId, bounds: Bounds, params: GlassParams) -> Self {
        Self {
            id,
            bounds,
            params,
            motion: None,
            visible: None,
        }
    }

    /// Placement at `frame`, or `None` when the region is not laid out then.
    pub fn placement_at(&self, frame: u64) -> Option<Placement> {
        if let Some(span) = self.visible
            && !span.contains(frame)
        {
            return None;
        }
        let b = self.bounds;
        let mut position = Point::new(b.x, b.y);
        let mut size = Vec2::new(b.width, b.height);
        if let Some(m) = self.motion {
            let t = frame as f64;
            position += m.velocity * t;
            size += m.growth * t;
        }
        Some(Placement::new(
            position,
            Size::new(size.x.max(0.0), size.y.max(0.0)),
        ))
    }

    fn validate(&self) -> GlassResult<()> {
        let what = format!("region {}", self.id);
        self.bounds.validate(&what)?;
        let p = &self.params;
        let scalars = [
            ("scale", p.scale),
            ("blur", p.blur),
            ("center_distortion", p.center_distortion),
            ("elevation", p.elevation),
            ("darkness", p.darkness),
            ("warp_edges", p.warp_edges),
        ];
        for (name, v) in scalars {
            if !v.is_finite() {
                return Err(GlassError::validation(format!("{what}: {name} must be finite")));
            }
        }
        if !p.tint.is_finite() {
            return Err(GlassError::validation(format!("{what}: tint must be finite")));
        }
        if let Some(m) = &self.motion
            && !(m.velocity.is_finite() && m.growth.is_finite())
        {
            return Err(GlassError::validation(format!("{what}: motion must be finite")));
        }
        if let Some(span) = &self.visible
            && span.start >= span.end
        {
            return Err(GlassError::validation(format!(
                "{what}: visible span must have start < end"
            )));
        }
        Ok(())
    }
}

fn default_frames() -> u64 {
    1
}

/// Declarative description of a glass scene: canvas, background and regions.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Output size in pixels.
    pub canvas: Canvas,
    /// Pixels per density-independent unit.
    #[serde(default)]
    pub density: Density,
    /// Length of the frame sequence.
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Pixel pipeline options.
    #[serde(default)]
    pub pipeline: PipelineOpts,
    /// Background layers, bottom first.
    #[serde(default)]
    pub background: Vec<BackgroundLayer>,
    /// Glass regions in registration order.
    #[serde(default)]
    pub regions: Vec<GlassRegion>,
}

impl Scene {
    /// Parse and validate scene JSON.
    pub fn from_json_str(s: &str) -> GlassResult<Self> {
        let scene: Self = serde_json::from_str(s)
            .map_err(|e| GlassError::serde(format!("parse scene JSON: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Read, parse and validate a scene file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> GlassResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GlassError::io(format!("read scene '{}': {e}", path.display())))?;
        let scene = Self::from_json_str(&text)?;
        tracing::debug!(
            regions = scene.regions.len(),
            layers = scene.background.len(),
            frames = scene.frames,
            "loaded scene"
        );
        Ok(scene)
    }

    /// Check structural and numeric constraints.
    pub fn validate(&self) -> GlassResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(GlassError::validation("canvas width/height must be > 0"));
        }
        if !(self.density.0.is_finite() && self.density.0 > 0.0) {
            return Err(GlassError::validation("density must be finite and > 0"));
        }
        if self.frames == 0 {
            return Err(GlassError::validation("frames must be > 0"));
        }

        let mut ids = HashSet::new();
        for region in &self.regions {
            if !ids.insert(region.id) {
                return Err(GlassError::validation(format!(
                    "duplicate region id '{}'",
                    region.id
                )));
            }
            region.validate()?;
        }
        for layer in &self.background {
            layer.validate()?;
        }
        Ok(())
    }

    /// Placements of every region laid out at `frame`.
    pub fn placements_at(&self, frame: u64) -> HashMap<GlassId, Placement> {
        self.regions
            .iter()
            .filter_map(|r| r.placement_at(frame).map(|p| (r.id, p)))
            .collect()
    }

    /// Run the layout phase for `frame`: every placed region reports into `pass`.
    ///
    /// Returns the number of reported regions.
    pub fn report_frame(&self, pass: &mut LayoutPass<'_>, frame: u64) -> usize {
        let placements = self.placements_at(frame);
        let mut scope = pass.scope(&placements);
        self.regions
            .iter()
            .filter_map(|r| scope.glass_background(r.id, &r.params))
            .count()
    }

    /// Frame driver configured with this scene's density and pipeline options.
    pub fn driver(&self) -> FrameDriver {
        FrameDriver::new(self.density, self.pipeline)
    }

    /// Paint the background layers; image paths resolve against `assets_root`.
    pub fn paint_background(&self, assets_root: &Path) -> GlassResult<BackgroundImage> {
        paint_background(&self.background, self.canvas, assets_root)
    }
}

/// Directory that relative asset paths of the scene file at `path` resolve against.
pub fn assets_root(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
