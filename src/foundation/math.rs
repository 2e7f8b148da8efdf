//! Scalar and vector helpers mirroring the GLSL built-ins the fragment program uses.
//!
//! These follow GLSL semantics rather than "safe" variants: NaN inputs stay NaN
//! (except through `f64::max`, which prefers the non-NaN operand).

use kurbo::Vec2;

/// GLSL `step(edge, x)`: `0.0` when `x < edge`, else `1.0`.
pub fn step(edge: f64, x: f64) -> f64 {
    if x < edge { 0.0 } else { 1.0 }
}

/// GLSL `smoothstep(edge0, edge1, x)` with Hermite interpolation.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// GLSL `mix(x, y, a)`: `x * (1 - a) + y * a`.
pub fn mix(x: f64, y: f64, a: f64) -> f64 {
    x * (1.0 - a) + y * a
}

/// Per-channel `mix` for RGBA colors.
pub fn mix_rgba(x: [f32; 4], y: [f32; 4], a: f64) -> [f32; 4] {
    let a = a as f32;
    let mut out = [0.0f32; 4];
    for i in 0..4 {
        out[i] = x[i] * (1.0 - a) + y[i] * a;
    }
    out
}

/// Component-wise `clamp(v, 0.0, 1.0)`.
pub fn clamp01(v: Vec2) -> Vec2 {
    Vec2::new(v.x.clamp(0.0, 1.0), v.y.clamp(0.0, 1.0))
}

/// Component-wise product.
pub fn mul(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x * b.x, a.y * b.y)
}

/// Component-wise quotient.
pub fn div(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x / b.x, a.y / b.y)
}
