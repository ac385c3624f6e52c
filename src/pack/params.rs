use crate::element::model::GlassElement;
use crate::element::registry::MAX_ACTIVE_ELEMENTS;
use crate::foundation::core::Color;

/// Number of element slots in a [`PackedParams`] block.
pub const MAX_PACKED_ELEMENTS: usize = MAX_ACTIVE_ELEMENTS;

/// Flat, fixed-size parameter block consumed by the pixel evaluator.
///
/// Layout mirrors the uniform arrays of the glass shader: parallel arrays indexed by element
/// slot, multi-component values interleaved (`positions[2*i..2*i+2]`, `tints[4*i..4*i+4]`).
/// Slots at or beyond `count` are zero. The block is `Pod`, so it can be uploaded verbatim with
/// [`PackedParams::as_bytes`].
///
/// Memory layout (616 bytes, no padding):
/// - positions, sizes: `[f32; 20]` each
/// - scales, blurs, corner_radii, elevations, center_distortions: `[f32; 10]` each
/// - tints: `[f32; 40]`
/// - darkness, warp_edges: `[f32; 10]` each
/// - count + 3 pad words: `[u32; 4]`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedParams {
    /// Top-left corners, `x, y` per slot.
    pub positions: [f32; MAX_PACKED_ELEMENTS * 2],
    /// Sizes, `w, h` per slot.
    pub sizes: [f32; MAX_PACKED_ELEMENTS * 2],
    /// Lens strength per slot.
    pub scales: [f32; MAX_PACKED_ELEMENTS],
    /// Blur strength per slot.
    pub blurs: [f32; MAX_PACKED_ELEMENTS],
    /// Corner radius (px) per slot.
    pub corner_radii: [f32; MAX_PACKED_ELEMENTS],
    /// Elevation (px) per slot.
    pub elevations: [f32; MAX_PACKED_ELEMENTS],
    /// Centre distortion per slot.
    pub center_distortions: [f32; MAX_PACKED_ELEMENTS],
    /// Tint, `r, g, b, a` per slot.
    pub tints: [f32; MAX_PACKED_ELEMENTS * 4],
    /// Edge darkening per slot.
    pub darkness: [f32; MAX_PACKED_ELEMENTS],
    /// Edge warp per slot.
    pub warp_edges: [f32; MAX_PACKED_ELEMENTS],
    /// Number of populated slots.
    pub count: u32,
    _pad: [u32; 3],
}

impl Default for PackedParams {
    fn default() -> Self {
        bytemuck::Zeroable::zeroed()
    }
}

/// One slot of a [`PackedParams`] block, unpacked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PackedElement {
    /// Top-left corner.
    pub position: [f32; 2],
    /// Width and height.
    pub size: [f32; 2],
    /// Lens strength.
    pub scale: f32,
    /// Blur strength.
    pub blur: f32,
    /// Corner radius in pixels.
    pub corner_radius: f32,
    /// Elevation in pixels.
    pub elevation: f32,
    /// Centre distortion.
    pub center_distortion: f32,
    /// Tint color.
    pub tint: Color,
    /// Edge darkening.
    pub darkness: f32,
    /// Edge warp.
    pub warp_edges: f32,
}

/// Flatten the first `min(elements.len(), max_count, 10)` elements into a parameter block.
///
/// Order is preserved; nothing is sorted or prioritised. Non-finite values are written as `0`,
/// which disables the corresponding effect.
pub fn pack(elements: &[GlassElement], max_count: usize) -> PackedParams {
    let count = elements.len().min(max_count).min(MAX_PACKED_ELEMENTS);
    let mut out = PackedParams::default();

    for (i, e) in elements.iter().take(count).enumerate() {
        out.positions[i * 2] = finite(e.position.x as f32);
        out.positions[i * 2 + 1] = finite(e.position.y as f32);
        out.sizes[i * 2] = finite(e.size.width as f32);
        out.sizes[i * 2 + 1] = finite(e.size.height as f32);
        out.scales[i] = finite(e.scale);
        out.blurs[i] = finite(e.blur);
        out.corner_radii[i] = finite(e.corner_radius);
        out.elevations[i] = finite(e.elevation);
        out.center_distortions[i] = finite(e.center_distortion);
        for (c, v) in e.tint.to_array().into_iter().enumerate() {
            out.tints[i * 4 + c] = finite(v);
        }
        out.darkness[i] = finite(e.darkness);
        out.warp_edges[i] = finite(e.warp_edges);
    }
    out.count = count as u32;

    if elements.len() > count {
        tracing::trace!(
            packed = count,
            dropped = elements.len() - count,
            "truncated glass elements while packing"
        );
    }
    out
}

impl PackedParams {
    /// Number of populated slots, never more than [`MAX_PACKED_ELEMENTS`].
    pub fn len(&self) -> usize {
        (self.count as usize).min(MAX_PACKED_ELEMENTS)
    }

    /// Return `true` when no slot is populated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unpack slot `i`, or `None` when `i >= count`.
    pub fn element(&self, i: usize) -> Option<PackedElement> {
        if i >= self.len() {
            return None;
        }
        Some(PackedElement {
            position: [self.positions[i * 2], self.positions[i * 2 + 1]],
            size: [self.sizes[i * 2], self.sizes[i * 2 + 1]],
            scale: self.scales[i],
            blur: self.blurs[i],
            corner_radius: self.corner_radii[i],
            elevation: self.elevations[i],
            center_distortion: self.center_distortions[i],
            tint: Color::new(
                self.tints[i * 4],
                self.tints[i * 4 + 1],
                self.tints[i * 4 + 2],
                self.tints[i * 4 + 3],
            ),
            darkness: self.darkness[i],
            warp_edges: self.warp_edges[i],
        })
    }

    /// Populated slots in order.
    pub fn elements(&self) -> impl Iterator<Item = PackedElement> + '_ {
        (0..self.len()).filter_map(|i| self.element(i))
    }

    /// Raw bytes for uniform/storage buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Uniform-style JSON view keyed by the shader's uniform names.
    pub fn to_uniform_json(&self) -> serde_json::Value {
        serde_json::json!({
            "elementsCount": self.count,
            "glassPositions": self.positions.to_vec(),
            "glassSizes": self.sizes.to_vec(),
            "glassScales": self.scales.to_vec(),
            "cornerRadii": self.corner_radii.to_vec(),
            "elevations": self.elevations.to_vec(),
            "centerDistortions": self.center_distortions.to_vec(),
            "glassTints": self.tints.to_vec(),
            "glassDarkness": self.darkness.to_vec(),
            "glassWarpEdges": self.warp_edges.to_vec(),
            "glassBlurs": self.blurs.to_vec(),
        })
    }
}

fn finite(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/pack/params.rs"]
mod tests;
