use std::{path::Path, sync::Arc};

use anyhow::Context;
use kurbo::Vec2;

use crate::foundation::error::{LensError, LensResult};

/// Straight-alpha RGBA color with channels in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Texture filtering used when sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    Nearest,
    /// Bilinear between the four nearest texel centers (GL `LINEAR`).
    #[default]
    Linear,
}

/// Immutable RGBA8 image sampled with clamp-to-edge addressing.
///
/// Uv origin is the top-left texel corner.
#[derive(Clone, Debug)]
pub struct Texture {
    width: u32,
    height: u32,
    /// Straight-alpha RGBA8, row-major, tightly packed.
    rgba8: Arc<Vec<u8>>,
}

impl Texture {
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> LensResult<Self> {
        if width == 0 || height == 0 {
            return Err(LensError::validation("texture width/height must be > 0"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| LensError::validation("texture size overflow"))?;
        if rgba8.len() != expected {
            return Err(LensError::validation(format!(
                "texture expects {expected} rgba8 bytes for {width}x{height}, got {}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    pub fn from_image(img: image::RgbaImage) -> LensResult<Self> {
        let (width, height) = img.dimensions();
        Self::from_rgba8(width, height, img.into_raw())
    }

    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> LensResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .filter(|len| len.checked_mul(4).is_some())
            .ok_or_else(|| LensError::validation("texture size overflow"))?;
        Self::from_rgba8(width, height, rgba.repeat(len))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Native size in pixels, as fed to the `uTextureNSize` uniforms.
    pub fn size(&self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    /// Texel at integer coordinates, clamped to the edge.
    pub fn texel(&self, x: i64, y: i64) -> Rgba {
        let x = x.clamp(0, i64::from(self.width) - 1) as usize;
        let y = y.clamp(0, i64::from(self.height) - 1) as usize;
        let idx = (y * self.width as usize + x) * 4;
        let px = &self.rgba8[idx..idx + 4];
        [
            f32::from(px[0]) / 255.0,
            f32::from(px[1]) / 255.0,
            f32::from(px[2]) / 255.0,
            f32::from(px[3]) / 255.0,
        ]
    }

    pub fn sample(&self, uv: Vec2, filter: Filter) -> Rgba {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        match filter {
            Filter::Nearest => self.texel((uv.x * w).floor() as i64, (uv.y * h).floor() as i64),
            Filter::Linear => {
                // Past one texel outside the image every tap clamps to the same edge texel.
                let fx = (uv.x * w - 0.5).clamp(-1.0, w);
                let fy = (uv.y * h - 0.5).clamp(-1.0, h);
                let x0 = fx.floor();
                let y0 = fy.floor();
                let tx = (fx - x0) as f32;
                let ty = (fy - y0) as f32;
                let (x0, y0) = (x0 as i64, y0 as i64);

                let c00 = self.texel(x0, y0);
                let c10 = self.texel(x0 + 1, y0);
                let c01 = self.texel(x0, y0 + 1);
                let c11 = self.texel(x0 + 1, y0 + 1);

                let mut out = [0.0f32; 4];
                for i in 0..4 {
                    let top = c00[i] + (c10[i] - c00[i]) * tx;
                    let bottom = c01[i] + (c11[i] - c01[i]) * tx;
                    out[i] = top + (bottom - top) * ty;
                }
                out
            }
        }
    }
}

pub fn decode_texture(bytes: &[u8]) -> LensResult<Texture> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Texture::from_image(dyn_img.to_rgba8())
}

#[tracing::instrument]
pub fn load_texture(path: &Path) -> LensResult<Texture> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let tex =
        decode_texture(&bytes).with_context(|| format!("decode image '{}'", path.display()))?;
    tracing::debug!(width = tex.width, height = tex.height, "loaded texture");
    Ok(tex)
}
