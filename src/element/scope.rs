//! Host-facing adapter that turns layout callbacks into registry reports.
//!
//! A host UI contributes two independent capabilities: it knows where each region ended up
//! ([`PlacementProvider`]) and it declares glass parameters for that region. The registry side
//! only needs somewhere to put resolved elements ([`GlassSink`]). [`GlassScope`] glues the two
//! together for one layout pass.

use std::collections::HashMap;

use crate::element::model::{GlassElement, GlassId, GlassParams, Placement};
use crate::element::registry::{GlassRegistry, ReportOutcome};
use crate::foundation::core::{Density, Point, Size};

/// Source of screen-space placements, typically the host layout system.
pub trait PlacementProvider {
    /// Placement of `id` in the current frame, or `None` if it was not laid out.
    fn placement(&self, id: GlassId) -> Option<Placement>;
}

impl PlacementProvider for HashMap<GlassId, Placement> {
    fn placement(&self, id: GlassId) -> Option<Placement> {
        self.get(&id).copied()
    }
}

/// Destination for resolved glass elements.
pub trait GlassSink {
    /// Accept one element for the current frame.
    fn report(&mut self, element: GlassElement) -> ReportOutcome;
}

impl GlassSink for GlassRegistry {
    fn report(&mut self, element: GlassElement) -> ReportOutcome {
        GlassRegistry::report(self, element)
    }
}

/// One layout pass worth of "placement provider + glass parameter sink".
pub struct GlassScope<'a, P: ?Sized, S: ?Sized> {
    placements: &'a P,
    sink: &'a mut S,
    density: Density,
}

impl<'a, P, S> GlassScope<'a, P, S>
where
    P: PlacementProvider + ?Sized,
    S: GlassSink + ?Sized,
{
    /// Combine a placement source and a sink.
    pub fn new(placements: &'a P, sink: &'a mut S, density: Density) -> Self {
        Self {
            placements,
            sink,
            density,
        }
    }

    /// Declare glass parameters for `id`.
    ///
    /// Reports the region if the provider placed it this frame; returns `None` otherwise, which
    /// lets the registry expire the region at the end of the frame.
    pub fn glass_background(&mut self, id: GlassId, params: &GlassParams) -> Option<ReportOutcome> {
        let placement = self.placements.placement(id)?;
        Some(self.report_placed(id, placement, params))
    }

    /// Direct form of the host `onPlaced(id, position, size)` callback.
    pub fn on_placed(
        &mut self,
        id: GlassId,
        position: Point,
        size: Size,
        params: &GlassParams,
    ) -> ReportOutcome {
        self.report_placed(id, Placement::new(position, size), params)
    }

    /// Density used to resolve dp-based parameters.
    pub fn density(&self) -> Density {
        self.density
    }

    fn report_placed(
        &mut self,
        id: GlassId,
        placement: Placement,
        params: &GlassParams,
    ) -> ReportOutcome {
        let element = GlassElement::from_placement(id, placement, params, self.density);
        self.sink.report(element)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/scope.rs"]
mod tests;
