//! Per-frame orchestration: layout phase, repack on revision change, render phase.
//!
//! ```text
//! begin_frame() ── report / on_placed ... ──> end_frame (on finish or drop)
//!      │
//!      └─ prepare(): revision changed? ── yes ──> pack + bind
//!                                       └─ no ──> reuse bound evaluator
//!      └─ render() / eval_pixel()
//! ```

use crate::element::model::{GlassElement, GlassId, GlassParams, Placement};
use crate::element::registry::{GlassRegistry, MAX_ACTIVE_ELEMENTS, ReportOutcome, Revision};
use crate::element::scope::{GlassScope, GlassSink, PlacementProvider};
use crate::foundation::core::{Canvas, Color, Density, Point, Size};
use crate::foundation::error::GlassResult;
use crate::pack::params::{PackedParams, pack};
use crate::pipeline::evaluate::{GlassEvaluator, PipelineOpts};
use crate::pipeline::sampler::BackgroundSampler;
use crate::render::cpu::{CpuRasterizer, FrameRGBA, RenderOpts};

/// Counters accumulated by a [`FrameDriver`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct FrameStats {
    /// Layout passes started.
    pub frames: u64,
    /// Times the parameter block was rebuilt.
    pub repacks: u64,
    /// Times [`FrameDriver::prepare`] reused the bound evaluator.
    pub reused: u64,
    /// Elements removed at the end of a layout pass.
    pub removed: u64,
}

/// Evaluator bound to the registry state at one revision.
#[derive(Clone, Debug)]
pub struct BoundEvaluator {
    revision: Revision,
    evaluator: GlassEvaluator,
    dropped: usize,
}

impl BoundEvaluator {
    fn bind(registry: &GlassRegistry, opts: PipelineOpts) -> Self {
        let snapshot = registry.snapshot();
        let params = pack(snapshot.elements(), MAX_ACTIVE_ELEMENTS);
        Self {
            revision: snapshot.revision(),
            evaluator: GlassEvaluator::bind(&params, opts),
            dropped: snapshot.dropped(),
        }
    }

    /// Registry revision the block was packed at.
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// The bound pixel evaluator.
    pub fn evaluator(&self) -> &GlassEvaluator {
        &self.evaluator
    }

    /// The packed parameter block.
    pub fn params(&self) -> &PackedParams {
        self.evaluator.params()
    }

    /// Tracked elements left out of the block by the element cap.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

/// Owns the registry and the bound evaluator, and sequences the two phases of a frame.
#[derive(Debug)]
pub struct FrameDriver {
    registry: GlassRegistry,
    density: Density,
    pipeline: PipelineOpts,
    bound: Option<BoundEvaluator>,
    rasterizer: Option<CpuRasterizer>,
    stats: FrameStats,
}

impl FrameDriver {
    /// Driver with an empty registry.
    pub fn new(density: Density, pipeline: PipelineOpts) -> Self {
        Self {
            registry: GlassRegistry::new(),
            density,
            pipeline,
            bound: None,
            rasterizer: None,
            stats: FrameStats::default(),
        }
    }

    /// Read access to the registry.
    pub fn registry(&self) -> &GlassRegistry {
        &self.registry
    }

    /// Density used to resolve dp parameters.
    pub fn density(&self) -> Density {
        self.density
    }

    /// Counters so far.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Start the layout phase of a new frame.
    pub fn begin_frame(&mut self) -> LayoutPass<'_> {
        self.stats.frames += 1;
        LayoutPass {
            registry: &mut self.registry,
            stats: &mut self.stats,
            density: self.density,
            finished: false,
        }
    }

    /// Make sure the bound evaluator reflects the current registry revision.
    ///
    /// Packing and binding only happen when the revision differs from the one bound last.
    pub fn prepare(&mut self) -> &BoundEvaluator {
        let revision = self.registry.revision();
        let bound = match self.bound.take() {
            Some(b) if b.revision == revision => {
                self.stats.reused += 1;
                tracing::trace!(revision = revision.0, "glass parameters unchanged; skipping repack");
                b
            }
            _ => {
                let b = BoundEvaluator::bind(&self.registry, self.pipeline);
                self.stats.repacks += 1;
                tracing::debug!(
                    revision = revision.0,
                    count = b.params().len(),
                    dropped = b.dropped,
                    "repacked glass parameters"
                );
                b
            }
        };
        self.bound.insert(bound)
    }

    /// Render the current frame over `sampler`.
    #[tracing::instrument(
        skip_all,
        fields(frame = self.stats.frames, width = canvas.width, height = canvas.height)
    )]
    pub fn render<S>(
        &mut self,
        sampler: &S,
        canvas: Canvas,
        opts: &RenderOpts,
    ) -> GlassResult<FrameRGBA>
    where
        S: BackgroundSampler + Sync + ?Sized,
    {
        let rasterizer = match self.rasterizer.take() {
            Some(r) if r.opts() == opts => r,
            _ => CpuRasterizer::new(opts.clone())?,
        };
        let frame = rasterizer.render(self.prepare().evaluator(), sampler, canvas);
        self.rasterizer = Some(rasterizer);
        frame
    }

    /// Final color of one pixel of the current frame.
    pub fn eval_pixel<S>(&mut self, frag: Point, sampler: &S) -> Color
    where
        S: BackgroundSampler + ?Sized,
    {
        self.prepare().evaluator().evaluate(frag, sampler)
    }

    /// Forget every tracked element (container teardown).
    pub fn clear(&mut self) {
        self.registry.clear();
    }
}

/// Layout phase of one frame.
///
/// Holds the registry mutably, so nothing can render while layout is in progress. Finishing or
/// dropping the pass removes every element that was not reported.
#[derive(Debug)]
pub struct LayoutPass<'a> {
    registry: &'a mut GlassRegistry,
    stats: &'a mut FrameStats,
    density: Density,
    finished: bool,
}

impl<'a> LayoutPass<'a> {
    /// Report a resolved element.
    pub fn report(&mut self, element: GlassElement) -> ReportOutcome {
        self.registry.report(element)
    }

    /// Host `onPlaced(id, position, size)` callback with the region's declared parameters.
    pub fn on_placed(
        &mut self,
        id: GlassId,
        position: Point,
        size: Size,
        params: &GlassParams,
    ) -> ReportOutcome {
        let element =
            GlassElement::from_placement(id, Placement::new(position, size), params, self.density);
        self.registry.report(element)
    }

    /// Adapter that pulls placements from `placements` and reports into this pass.
    pub fn scope<'s, P>(&'s mut self, placements: &'s P) -> GlassScope<'s, P, Self>
    where
        P: PlacementProvider + ?Sized,
    {
        let density = self.density;
        GlassScope::new(placements, self, density)
    }

    /// End the layout phase. Returns the number of removed elements.
    pub fn finish(mut self) -> usize {
        self.close()
    }

    fn close(&mut self) -> usize {
        if self.finished {
            return 0;
        }
        self.finished = true;
        let removed = self.registry.end_frame();
        self.stats.removed += removed as u64;
        removed
    }
}

impl GlassSink for LayoutPass<'_> {
    fn report(&mut self, element: GlassElement) -> ReportOutcome {
        LayoutPass::report(self, element)
    }
}

impl Drop for LayoutPass<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
