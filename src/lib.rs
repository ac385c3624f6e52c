//! Liquid glass is a screen-space lens effect engine.
//!
//! Glass regions refract, blur, tint and relight whatever is drawn behind them. The crate is
//! organized around one frame:
//!
//! - The host layout pass reports regions into a [`GlassRegistry`] through a [`LayoutPass`]
//! - The [`FrameDriver`] repacks the active set into a [`PackedParams`] block when the registry
//!   revision changes
//! - A [`GlassEvaluator`] bound to that block computes the final color of every pixel, either
//!   one pixel at a time or through the [`CpuRasterizer`]
//!
//! Scenes can also be described declaratively as JSON ([`Scene`]) with procedural backgrounds.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod element;
pub(crate) mod pack;
pub(crate) mod pipeline;
pub(crate) mod render;
pub(crate) mod scene;

pub use crate::foundation::core::{Canvas, Color, Density, Point, Size, Vec2};
pub use crate::foundation::error::{GlassError, GlassResult};

pub use crate::element::model::{
    CHANGE_TOLERANCE, GlassElement, GlassId, GlassIdAllocator, GlassParams, GlassShape, Placement,
};
pub use crate::element::registry::{
    GlassRegistry, MAX_ACTIVE_ELEMENTS, ReportOutcome, Revision, Snapshot,
};
pub use crate::element::scope::{GlassScope, GlassSink, PlacementProvider};
pub use crate::pack::params::{MAX_PACKED_ELEMENTS, PackedElement, PackedParams, pack};
pub use crate::pipeline::blur::{BLUR_RADIUS_PER_UNIT, BlurMode, MAX_BLUR_RADIUS};
pub use crate::pipeline::evaluate::{GlassEvaluator, PipelineOpts, PixelTrace, evaluate};
pub use crate::pipeline::sampler::{BackgroundImage, BackgroundSampler};
pub use crate::pipeline::sdf::rounded_rect_sdf;
pub use crate::pipeline::shading::{RIM_WIDTH, elevation_shadow, rim_intensity};
pub use crate::render::cpu::{CpuRasterizer, FrameRGBA, RenderOpts, THREADS_ENV};
pub use crate::render::driver::{BoundEvaluator, FrameDriver, FrameStats, LayoutPass};
pub use crate::scene::background::{BackgroundLayer, Fill, RAINBOW, paint_background};
pub use crate::scene::demo::{Demo, glass_button_params};
pub use crate::scene::model::{Bounds, FrameSpan, GlassRegion, Motion, Scene, assets_root};
