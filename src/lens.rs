//! The lens-bubble pixel function, leaves first: cover fit, lens distortion, compositing.

pub mod compositor;
pub mod cover;
pub mod distortion;
