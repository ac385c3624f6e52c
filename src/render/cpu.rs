use rayon::prelude::*;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{GlassError, GlassResult};
use crate::pipeline::evaluate::GlassEvaluator;
use crate::pipeline::sampler::BackgroundSampler;

/// Overrides the rayon pool size when [`RenderOpts::threads`] is unset.
pub const THREADS_ENV: &str = "LIQUID_GLASS_THREADS";

/// One rendered frame.
///
/// `data` is tightly packed RGBA8, row-major, straight alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
    /// Always `false`: glass output is straight alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert into an [`image::RgbaImage`] for encoding.
    pub fn into_image(self) -> GlassResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or_else(|| GlassError::evaluation("frame buffer does not match its dimensions"))
    }
}

/// Rasterization options.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    /// Shade rows in parallel on a rayon pool.
    pub parallel: bool,
    /// Dedicated pool size. `None` falls back to [`THREADS_ENV`], then to the global pool.
    pub threads: Option<usize>,
}

impl RenderOpts {
    fn resolved_threads(&self) -> Option<usize> {
        self.threads.or_else(|| {
            std::env::var(THREADS_ENV)
                .ok()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|&n| n > 0)
        })
    }
}

/// CPU rasterizer that runs the pixel pipeline once per output pixel.
///
/// Pixel `(x, y)` is evaluated at fragment coordinate `(x + 0.5, y + 0.5)`.
#[derive(Debug)]
pub struct CpuRasterizer {
    opts: RenderOpts,
    pool: Option<rayon::ThreadPool>,
}

impl CpuRasterizer {
    /// Build a rasterizer, creating a dedicated thread pool when a thread count is configured.
    pub fn new(opts: RenderOpts) -> GlassResult<Self> {
        let pool = if opts.parallel {
            match opts.resolved_threads() {
                Some(n) => Some(build_thread_pool(n)?),
                None => None,
            }
        } else {
            None
        };
        Ok(Self { opts, pool })
    }

    /// Options this rasterizer was built with.
    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    /// Render a full frame.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(width = canvas.width, height = canvas.height, parallel = self.opts.parallel)
    )]
    pub fn render<S>(
        &self,
        eval: &GlassEvaluator,
        sampler: &S,
        canvas: Canvas,
    ) -> GlassResult<FrameRGBA>
    where
        S: BackgroundSampler + Sync + ?Sized,
    {
        let mut data = vec![0u8; canvas.rgba8_len()?];
        self.render_into(eval, sampler, canvas, &mut data)?;
        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: false,
        })
    }

    /// Render into a caller-owned RGBA8 buffer of exactly `width * height * 4` bytes.
    pub fn render_into<S>(
        &self,
        eval: &GlassEvaluator,
        sampler: &S,
        canvas: Canvas,
        out: &mut [u8],
    ) -> GlassResult<()>
    where
        S: BackgroundSampler + Sync + ?Sized,
    {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(GlassError::validation("canvas width/height must be > 0"));
        }
        let expected = canvas.rgba8_len()?;
        if out.len() != expected {
            return Err(GlassError::validation(format!(
                "output buffer is {} bytes, expected {expected} for {}x{}",
                out.len(),
                canvas.width,
                canvas.height
            )));
        }
        let row_len = canvas.width as usize * 4;

        if !self.opts.parallel {
            for (y, row) in out.chunks_exact_mut(row_len).enumerate() {
                shade_row(eval, sampler, y, row);
            }
            return Ok(());
        }

        let mut run = || {
            out.par_chunks_exact_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| shade_row(eval, sampler, y, row));
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
        Ok(())
    }
}

fn shade_row<S>(eval: &GlassEvaluator, sampler: &S, y: usize, row: &mut [u8])
where
    S: BackgroundSampler + ?Sized,
{
    let fy = y as f64 + 0.5;
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let frag = Point::new(x as f64 + 0.5, fy);
        px.copy_from_slice(&eval.evaluate(frag, sampler).to_rgba8());
    }
}

fn build_thread_pool(threads: usize) -> GlassResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(GlassError::validation(
            "render option 'threads' must be >= 1 when set",
        ));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| GlassError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
