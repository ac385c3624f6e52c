//! Per-pixel glass evaluation.
//!
//! Evaluation is split in two halves: [`GlassEvaluator::trace`] walks the elements and gathers
//! everything that depends only on geometry (remapped sample coordinate, blur radius, tint,
//! darkness, rim and shadow terms); [`GlassEvaluator::shade`] reads the background and applies
//! the terms in their fixed order:
//!
//! 1. lens / warp remapping, composed in element order
//! 2. background sample (or blur)
//! 3. tint
//! 4. darkness
//! 5. rim highlight
//! 6. shadow

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::foundation::core::Color;
use crate::pack::params::{MAX_PACKED_ELEMENTS, PackedElement, PackedParams};
use crate::pipeline::blur::{BLUR_RADIUS_PER_UNIT, BlurMode, MAX_BLUR_RADIUS, blur_sample};
use crate::pipeline::lens::{lens_map, lens_map_simple};
use crate::pipeline::sampler::BackgroundSampler;
use crate::pipeline::sdf::{ElementGeometry, sdf_normal};
use crate::pipeline::shading::{
    RIM_NORMAL_BAND, RIM_NORMAL_EPSILON, RIM_REFLECTION_OFFSET, accumulate_tint,
    brighten_reflection, edge_darkness, elevation_shadow, rim_intensity,
};
use crate::pipeline::warp::{in_warp_band, warp_local};

/// Tunables of the pixel pipeline that are not per-element parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineOpts {
    /// Blur tap placement.
    pub blur_mode: BlurMode,
}

/// Geometry-only result of evaluating one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelTrace {
    /// Fragment coordinate that was traced.
    pub frag: Point,
    /// Background coordinate after lens and warp remapping.
    pub sample_coord: Point,
    /// Largest blur radius (px) among elements containing the pixel; `0` means no blur.
    pub blur_radius: f64,
    /// Accumulated tint.
    pub tint: Color,
    /// Strongest edge darkness among containing elements.
    pub darkness: f64,
    /// Strongest rim highlight intensity.
    pub rim_highlight: f64,
    /// Outward surface normal used for the rim reflection.
    pub rim_normal: Vec2,
    /// Strongest elevation shadow alpha.
    pub shadow_alpha: f64,
}

impl PixelTrace {
    fn new(frag: Point) -> Self {
        Self {
            frag,
            sample_coord: frag,
            blur_radius: 0.0,
            tint: Color::TRANSPARENT,
            darkness: 0.0,
            rim_highlight: 0.0,
            rim_normal: Vec2::ZERO,
            shadow_alpha: 0.0,
        }
    }

    /// Return `true` when shading this trace returns the unmodified background at `frag`.
    pub fn is_identity(&self) -> bool {
        self.sample_coord == self.frag
            && self.blur_radius <= 0.0
            && self.tint.a <= 0.0
            && self.darkness <= 0.0
            && self.rim_highlight <= 0.0
            && self.shadow_alpha <= 0.0
    }
}

#[derive(Clone, Copy, Debug)]
struct BoundElement {
    geom: ElementGeometry,
    scale: f64,
    blur: f64,
    center_distortion: f64,
    elevation: f64,
    tint: Color,
    darkness: f64,
    warp_edges: f64,
    active: bool,
}

impl BoundElement {
    fn bind(e: &PackedElement) -> Option<Self> {
        let geom = ElementGeometry::from_packed(e)?;
        let bound = Self {
            geom,
            scale: f64::from(e.scale),
            blur: f64::from(e.blur),
            center_distortion: f64::from(e.center_distortion),
            elevation: f64::from(e.elevation),
            tint: e.tint,
            darkness: f64::from(e.darkness),
            warp_edges: f64::from(e.warp_edges),
            active: false,
        };
        Some(Self {
            active: bound.has_enabled_effect(),
            ..bound
        })
    }

    fn has_enabled_effect(&self) -> bool {
        self.scale > 0.0
            || self.blur > 0.0
            || self.center_distortion > 0.0
            || self.elevation > 0.0
            || self.tint.a > 0.0
            || self.darkness > 0.0
            || self.warp_edges > 0.0
    }
}

/// Pixel evaluator bound to one packed parameter block.
///
/// Binding precomputes element geometry once, so per-pixel work only touches the populated
/// slots. Degenerate (zero-area) slots are dropped at bind time.
#[derive(Clone, Debug)]
pub struct GlassEvaluator {
    params: PackedParams,
    elements: SmallVec<[BoundElement; MAX_PACKED_ELEMENTS]>,
    opts: PipelineOpts,
}

impl GlassEvaluator {
    /// Bind a parameter block.
    pub fn bind(params: &PackedParams, opts: PipelineOpts) -> Self {
        let elements = params
            .elements()
            .filter_map(|e| BoundElement::bind(&e))
            .collect();
        Self {
            params: *params,
            elements,
            opts,
        }
    }

    /// Parameter block this evaluator was bound with.
    pub fn params(&self) -> &PackedParams {
        &self.params
    }

    /// Pipeline options in effect.
    pub fn opts(&self) -> PipelineOpts {
        self.opts
    }

    /// Return `true` when no bound element can change any pixel.
    pub fn is_identity(&self) -> bool {
        !self.elements.iter().any(|e| e.active)
    }

    /// Gather the geometric terms for `frag`.
    pub fn trace(&self, frag: Point) -> PixelTrace {
        let mut t = PixelTrace::new(frag);

        for e in &self.elements {
            let local = e.geom.local(frag);
            let sdf = e.geom.sdf_local(local);

            if sdf < 0.0 && e.blur > 0.0 {
                t.blur_radius = t
                    .blur_radius
                    .max((e.blur * BLUR_RADIUS_PER_UNIT).min(MAX_BLUR_RADIUS));
            }

            // A warped pixel restarts from its own warped position; elsewhere the lens composes
            // on top of the earlier elements' output.
            t.sample_coord = if in_warp_band(&e.geom, local, e.warp_edges) {
                let warped = e.geom.center + warp_local(&e.geom, local, e.warp_edges);
                lens_map(&e.geom, warped, e.scale, e.center_distortion)
            } else {
                lens_map(&e.geom, t.sample_coord, e.scale, e.center_distortion)
            };

            if e.elevation > 0.0 {
                let shadow = elevation_shadow(local, e.geom.half, e.geom.radius, e.elevation);
                t.shadow_alpha = t.shadow_alpha.max(shadow);
            }

            if e.active {
                let rim = rim_intensity(local, e.geom.half, e.geom.radius);
                t.rim_highlight = t.rim_highlight.max(rim);
            }

            if sdf < 0.0 {
                t.tint = accumulate_tint(t.tint, e.tint);
                t.darkness = t.darkness.max(edge_darkness(&e.geom, sdf, e.darkness));
            }
        }

        if t.rim_highlight > 0.0 {
            t.rim_normal = self.rim_normal(frag);
        }
        t
    }

    /// Apply the traced terms to background content.
    pub fn shade<S>(&self, t: &PixelTrace, sampler: &S) -> Color
    where
        S: BackgroundSampler + ?Sized,
    {
        let mut color = if t.blur_radius > 0.0 {
            match self.opts.blur_mode {
                BlurMode::Gaussian => {
                    blur_sample(sampler, t.blur_radius, |offset| t.sample_coord + offset)
                }
                BlurMode::LensAware => blur_sample(sampler, t.blur_radius, |offset| {
                    if offset == Vec2::ZERO {
                        t.sample_coord
                    } else {
                        self.refract_simple(t.frag + offset)
                    }
                }),
            }
        } else {
            sampler.sample(t.sample_coord)
        };

        if t.tint.a > 0.0 {
            color = color.mix_rgb(t.tint, t.tint.a * 0.5);
        }

        if t.darkness > 0.0 {
            color = color.mix_rgb(Color::BLACK, (t.darkness * 0.5) as f32);
        }

        if t.rim_highlight > 0.0 {
            let reflected =
                sampler.sample(t.frag + t.rim_normal * RIM_REFLECTION_OFFSET);
            color = color.mix(brighten_reflection(reflected), t.rim_highlight as f32);
        }

        if t.shadow_alpha > 0.0 {
            color = color.mix_rgb(Color::BLACK, t.shadow_alpha as f32);
        }

        color
    }

    /// Final color of the pixel at `frag`.
    pub fn evaluate<S>(&self, frag: Point, sampler: &S) -> Color
    where
        S: BackgroundSampler + ?Sized,
    {
        if self.elements.is_empty() {
            return sampler.sample(frag);
        }
        let t = self.trace(frag);
        self.shade(&t, sampler)
    }

    fn rim_normal(&self, frag: Point) -> Vec2 {
        for e in self.elements.iter().filter(|e| e.active) {
            let local = e.geom.local(frag);
            let sdf = e.geom.sdf_local(local);
            if sdf > 0.0 && sdf < RIM_NORMAL_BAND {
                return sdf_normal(local, e.geom.half, e.geom.radius, RIM_NORMAL_EPSILON);
            }
        }
        Vec2::ZERO
    }

    fn refract_simple(&self, p: Point) -> Point {
        self.elements
            .iter()
            .fold(p, |p, e| lens_map_simple(&e.geom, p, e.scale))
    }
}

/// Evaluate one pixel against a packed block with default pipeline options.
///
/// Convenience for one-off queries; renderers should bind a [`GlassEvaluator`] once per
/// parameter change instead.
pub fn evaluate<S>(frag: Point, params: &PackedParams, sampler: &S) -> Color
where
    S: BackgroundSampler + ?Sized,
{
    GlassEvaluator::bind(params, PipelineOpts::default()).evaluate(frag, sampler)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/evaluate.rs"]
mod tests;
