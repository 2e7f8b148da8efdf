use crate::foundation::error::{LensError, LensResult};

pub use kurbo::Vec2;

/// Viewport dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Create a validated resolution with both axes non-zero.
    pub fn new(width: u32, height: u32) -> LensResult<Self> {
        if width == 0 || height == 0 {
            return Err(LensError::validation("resolution width/height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Resolution as a floating-point vector, the form the pixel function consumes.
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Normalized uv at the center of pixel `(x, y)`.
    ///
    /// Origin is the top-left corner, `y` grows downward.
    pub fn pixel_center_uv(self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (f64::from(x) + 0.5) / f64::from(self.width),
            (f64::from(y) + 0.5) / f64::from(self.height),
        )
    }
}
