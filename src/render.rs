use rayon::prelude::*;

use crate::{
    foundation::{
        core::Resolution,
        error::{LensError, LensResult},
    },
    lens::compositor::{Compositor, Uniforms},
    texture::{Filter, Rgba, Texture},
};

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, top row first.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

#[derive(Clone, Debug)]
pub struct RenderOpts {
    pub filter: Filter,
    /// Shade rows on a dedicated rayon pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            filter: Filter::Linear,
            parallel: false,
            threads: None,
        }
    }
}

/// Render one transition frame at `progress` with default options.
pub fn render_frame(
    resolution: Resolution,
    progress: f64,
    texture1: &Texture,
    texture2: &Texture,
) -> LensResult<FrameRGBA> {
    render_frame_with_opts(
        resolution,
        progress,
        texture1,
        texture2,
        &RenderOpts::default(),
    )
}

#[tracing::instrument(skip(texture1, texture2))]
pub fn render_frame_with_opts(
    resolution: Resolution,
    progress: f64,
    texture1: &Texture,
    texture2: &Texture,
    opts: &RenderOpts,
) -> LensResult<FrameRGBA> {
    if resolution.width == 0 || resolution.height == 0 {
        return Err(LensError::validation("resolution width/height must be > 0"));
    }

    let uniforms = Uniforms::for_textures(progress, resolution.as_vec2(), texture1, texture2);
    let compositor = Compositor::new(uniforms, texture1, texture2, opts.filter);
    tracing::debug!(
        radius = compositor.geometry().radius,
        max_radius = compositor.geometry().max_radius,
        "bubble geometry"
    );

    let row_len = (resolution.width as usize) * 4;
    let mut data = vec![0u8; resolution.pixel_count() * 4];

    if opts.parallel {
        let pool = build_thread_pool(opts.threads)?;
        pool.install(|| {
            data.par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| shade_row(&compositor, resolution, y as u32, row));
        });
    } else {
        for (y, row) in data.chunks_mut(row_len).enumerate() {
            shade_row(&compositor, resolution, y as u32, row);
        }
    }

    Ok(FrameRGBA {
        width: resolution.width,
        height: resolution.height,
        data,
    })
}

fn shade_row(compositor: &Compositor<'_>, resolution: Resolution, y: u32, row: &mut [u8]) {
    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let color = compositor.shade(resolution.pixel_center_uv(x as u32, y));
        px.copy_from_slice(&to_rgba8(color));
    }
}

/// Quantize a shaded color; NaN channels from degenerate pixels become 0.
pub fn to_rgba8(color: Rgba) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn build_thread_pool(threads: Option<usize>) -> LensResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LensError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    tracing::debug!(?threads, "building render thread pool");
    builder
        .build()
        .map_err(|e| LensError::evaluation(format!("failed to build rayon thread pool: {e}")))
}
