use kurbo::Vec2;

use crate::foundation::math::smoothstep;

/// Fraction of the bubble radius where the lens is strongest.
pub const FOCUS_FACTOR: f64 = 0.25;

/// Divisor tying distortion strength to bubble radius.
pub const FOCUS_STRENGTH_DIVISOR: f64 = 3000.0;

/// Width of the `inside` transition band as a fraction of the focus radius.
pub const EDGE_SOFTNESS: f64 = 0.001;

/// Exponent concentrating the lens effect near the bubble edge.
pub const MAGNIFIER_EXPONENT: i32 = 5;

/// Result of [`lens_distortion`] for one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensDistortion {
    /// Uv to sample the incoming image at (unclamped).
    pub distortion_uv: Vec2,
    /// How far inside the bubble the pixel is, `0.0` outside to `1.0` inside.
    pub inside: f64,
}

/// Shift `uv` against `direction` by `factor`, weighting the vertical axis twice.
pub fn distorted_uv(uv: Vec2, direction: Vec2, factor: f64) -> Vec2 {
    let scale_direction = Vec2::new(direction.x, direction.y * 2.0);
    uv - scale_direction * factor
}

/// Position of `dist` across the annulus between the focus circle and the bubble edge.
///
/// `0.0` on the focus circle, `1.0` on the bubble edge, negative inside the focus circle. A
/// zero-width annulus yields `0.0`.
pub fn magnifier_factor(dist: f64, sphere_radius: f64, focus_radius: f64) -> f64 {
    let span = sphere_radius - focus_radius;
    if span != 0.0 {
        (dist - focus_radius) / span
    } else {
        0.0
    }
}

/// Smooth inside test against the bubble edge.
pub fn insideness(dist: f64, sphere_radius: f64, focus_radius: f64) -> f64 {
    let sphere_sdf = dist - sphere_radius;
    smoothstep(0.0, 1.0, -sphere_sdf / (focus_radius * EDGE_SOFTNESS))
}

/// Lens weight in `[0, 1]` before scaling by the focus strength.
pub fn lens_weight(magnifier: f64, inside: f64) -> f64 {
    (magnifier * inside).clamp(0.0, 1.0).powi(MAGNIFIER_EXPONENT)
}

/// Compute the lens-distorted sampling uv and the soft inside value for pixel `p`.
///
/// `p` and `sphere_center` are in viewport pixels; `uv` is the undistorted image uv. When
/// `p == sphere_center` the radial direction is NaN and so is the returned uv.
pub fn lens_distortion(
    p: Vec2,
    uv: Vec2,
    sphere_center: Vec2,
    sphere_radius: f64,
    focus_factor: f64,
) -> LensDistortion {
    let direction = (p - sphere_center).normalize();
    let focus_radius = sphere_radius * focus_factor;
    let focus_strength = sphere_radius / FOCUS_STRENGTH_DIVISOR;
    let dist = (sphere_center - p).length();

    let inside = insideness(dist, sphere_radius, focus_radius);
    let m = lens_weight(magnifier_factor(dist, sphere_radius, focus_radius), inside);

    LensDistortion {
        distortion_uv: distorted_uv(uv, direction, m * focus_strength),
        inside,
    }
}
