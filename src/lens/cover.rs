use kurbo::Vec2;

use crate::foundation::math::{div, mul};

/// `background-size: cover` placement of an image inside a viewport.
///
/// The image is scaled uniformly until both axes cover the viewport, then centered, so the
/// longer axis is cropped equally on both sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    pub resolution: Vec2,
    /// Uniform scale from image pixels to viewport pixels.
    pub scale: f64,
    /// Image footprint in viewport pixels after scaling.
    pub scaled_size: Vec2,
    /// Top-left of the scaled footprint relative to the viewport; non-positive on cropped axes.
    pub offset: Vec2,
}

impl CoverFit {
    /// Zero `image_size` components are not rejected; they yield infinite or NaN uvs.
    pub fn new(resolution: Vec2, image_size: Vec2) -> Self {
        let s = div(resolution, image_size);
        let scale = s.x.max(s.y);
        let scaled_size = image_size * scale;
        let offset = (resolution - scaled_size) * 0.5;
        Self {
            resolution,
            scale,
            scaled_size,
            offset,
        }
    }

    /// Map a normalized viewport uv to an (unclamped) uv into the image.
    pub fn apply(&self, uv: Vec2) -> Vec2 {
        div(mul(uv, self.resolution) - self.offset, self.scaled_size)
    }
}

pub fn cover_uv(uv: Vec2, resolution: Vec2, image_size: Vec2) -> Vec2 {
    CoverFit::new(resolution, image_size).apply(uv)
}
