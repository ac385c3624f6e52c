use std::fmt;

use crate::foundation::core::{Color, Density, Point, Size};

/// Absolute tolerance used by [`GlassElement::equals_with_tolerance`].
///
/// Position compares by Euclidean distance, every other scalar by absolute difference.
pub const CHANGE_TOLERANCE: f64 = 0.01;

/// Stable identity of one glass region, assigned once for the region's lifetime.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct GlassId(pub u64);

impl fmt::Display for GlassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "glass_{}", self.0)
    }
}

/// Hands out fresh [`GlassId`] values for hosts that do not have their own node identities.
#[derive(Clone, Debug, Default)]
pub struct GlassIdAllocator {
    next: u64,
}

impl GlassIdAllocator {
    /// Start allocating at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Return the next unused id.
    pub fn allocate(&mut self) -> GlassId {
        let id = GlassId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Declared outline of a glass region.
///
/// Only rounded rectangles are supported; a circle is a rounded rectangle whose corner radius is
/// half of the smaller dimension.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GlassShape {
    /// Sharp corners.
    #[default]
    Rect,
    /// Uniform corner radius in density-independent units.
    Rounded {
        /// Corner radius (dp).
        radius: f32,
    },
    /// Corner radius as a percentage of the smaller dimension (`50` is a capsule).
    Percent {
        /// Percentage in `[0, 50]`.
        percent: f32,
    },
    /// Circle (or capsule for non-square regions).
    Circle,
}

impl GlassShape {
    /// Resolve the corner radius in pixels for a region of `size`.
    pub fn corner_radius_px(self, size: Size, density: Density) -> f32 {
        let min_dim = size.width.min(size.height).max(0.0) as f32;
        let r = match self {
            Self::Rect => 0.0,
            Self::Rounded { radius } => density.to_px(radius),
            Self::Percent { percent } => min_dim * percent.clamp(0.0, 50.0) / 100.0,
            Self::Circle => min_dim * 0.5,
        };
        if r.is_finite() { r.max(0.0) } else { 0.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Effect parameters declared by UI code for one region.
///
/// Every field defaults to the "disabled" value, so `GlassParams::default()` is a region that
/// leaves the background untouched.
pub struct GlassParams {
    /// Lens strength, conventionally `[0, 2]`; `<= 0` disables refraction.
    pub scale: f32,
    /// Blur strength, conventionally `[0, 2]`; `<= 0` disables blur.
    pub blur: f32,
    /// Extra convex magnification at the centre, `[0, 1]`.
    pub center_distortion: f32,
    /// Outline of the region.
    pub shape: GlassShape,
    /// Shadow driver in density-independent units; `0` disables the shadow.
    pub elevation: f32,
    /// Tint color; alpha `0` disables tinting.
    pub tint: Color,
    /// Edge darkening strength, `[0, 1]`.
    pub darkness: f32,
    /// Inward warp band strength, `[0, 1]`; `<= 0` disables edge warp.
    pub warp_edges: f32,
}

impl Default for GlassParams {
    fn default() -> Self {
        Self {
            scale: 0.0,
            blur: 0.0,
            center_distortion: 0.0,
            shape: GlassShape::Rect,
            elevation: 0.0,
            tint: Color::TRANSPARENT,
            darkness: 0.0,
            warp_edges: 0.0,
        }
    }
}

/// Screen-space placement reported by the host layout system.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Top-left corner.
    pub position: Point,
    /// Width and height.
    pub size: Size,
}

impl Placement {
    /// Build a placement from a top-left corner and a size.
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }
}

/// One tracked glass region with resolved (pixel-space) parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GlassElement {
    /// Stable identity.
    pub id: GlassId,
    /// Screen-space top-left corner.
    pub position: Point,
    /// Width and height, never negative.
    pub size: Size,
    /// Corner radius in pixels.
    pub corner_radius: f32,
    /// Lens strength.
    pub scale: f32,
    /// Blur strength.
    pub blur: f32,
    /// Convex centre distortion.
    pub center_distortion: f32,
    /// Elevation in pixels.
    pub elevation: f32,
    /// Tint color.
    pub tint: Color,
    /// Edge darkening strength.
    pub darkness: f32,
    /// Edge warp strength.
    pub warp_edges: f32,
}

impl GlassElement {
    /// Element with every effect disabled.
    pub fn new(id: GlassId, position: Point, size: Size) -> Self {
        Self {
            id,
            position,
            size: sanitize_size(size),
            corner_radius: 0.0,
            scale: 0.0,
            blur: 0.0,
            center_distortion: 0.0,
            elevation: 0.0,
            tint: Color::TRANSPARENT,
            darkness: 0.0,
            warp_edges: 0.0,
        }
    }

    /// Resolve declared parameters against a placement.
    ///
    /// Corner radius and elevation are converted from density-independent units to pixels here,
    /// so everything downstream works in screen pixels.
    pub fn from_placement(
        id: GlassId,
        placement: Placement,
        params: &GlassParams,
        density: Density,
    ) -> Self {
        let size = sanitize_size(placement.size);
        Self {
            id,
            position: placement.position,
            size,
            corner_radius: params.shape.corner_radius_px(size, density),
            scale: params.scale,
            blur: params.blur,
            center_distortion: params.center_distortion,
            elevation: density.to_px(params.elevation),
            tint: params.tint,
            darkness: params.darkness,
            warp_edges: params.warp_edges,
        }
    }

    /// Centre of the region.
    pub fn center(&self) -> Point {
        self.position + self.size.to_vec2() * 0.5
    }

    /// A zero-area element never affects any pixel.
    pub fn is_degenerate(&self) -> bool {
        !(self.size.width > 0.0 && self.size.height > 0.0)
    }

    /// Compare two snapshots of the same region, ignoring render jitter.
    ///
    /// Position deltas below [`CHANGE_TOLERANCE`] (Euclidean) and scalar deltas below the same
    /// bound count as "no functional change". Tint compares exactly.
    pub fn equals_with_tolerance(&self, other: &Self) -> bool {
        if self.id != other.id {
            return false;
        }
        let close = |a: f32, b: f32| f64::from((a - b).abs()) < CHANGE_TOLERANCE;

        (self.position - other.position).hypot() < CHANGE_TOLERANCE
            && (self.size.width - other.size.width).abs() < CHANGE_TOLERANCE
            && (self.size.height - other.size.height).abs() < CHANGE_TOLERANCE
            && close(self.corner_radius, other.corner_radius)
            && close(self.scale, other.scale)
            && close(self.blur, other.blur)
            && close(self.center_distortion, other.center_distortion)
            && close(self.elevation, other.elevation)
            && close(self.darkness, other.darkness)
            && close(self.warp_edges, other.warp_edges)
            && self.tint == other.tint
    }
}

fn sanitize_size(size: Size) -> Size {
    let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Size::new(clean(size.width), clean(size.height))
}

#[cfg(test)]
#[path = "../../tests/unit/element/model.rs"]
mod tests;
