//! Lens-bubble image transition.
//!
//! A circular bubble grows from the viewport center as progress goes from 0 to 1. Inside it
//! the incoming image is shown with a magnifying-lens distortion near the edge; outside it the
//! outgoing image is shown unchanged. Both images are placed with `cover` semantics.
//!
//! The crate ships the effect twice:
//!
//! - [`shaders`]: the GLSL vertex/fragment programs for GPU hosts
//! - [`Compositor`] and [`render_frame`]: a deterministic CPU evaluation of the same per-pixel
//!   function
#![forbid(unsafe_code)]

pub mod config;
pub mod foundation;
pub mod lens;
pub mod render;
pub mod shaders;
pub mod texture;

pub use config::{LoadedTextures, TransitionConfig};
pub use foundation::core::{Resolution, Vec2};
pub use foundation::error::{LensError, LensResult};
pub use lens::compositor::{BubbleGeometry, Compositor, Fragment, Uniforms, shade_pixel};
pub use lens::cover::{CoverFit, cover_uv};
pub use lens::distortion::{LensDistortion, distorted_uv, lens_distortion, magnifier_factor};
pub use render::{FrameRGBA, RenderOpts, render_frame, render_frame_with_opts};
pub use shaders::{FRAGMENT_SHADER, UNIFORM_NAMES, VERTEX_SHADER};
pub use texture::{Filter, Rgba, Texture, decode_texture, load_texture};
