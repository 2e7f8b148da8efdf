use kurbo::Vec2;

use crate::{
    foundation::math::{clamp01, mix_rgba, mul, step},
    lens::{
        cover::CoverFit,
        distortion::{FOCUS_FACTOR, lens_distortion},
    },
    texture::{Filter, Rgba, Texture},
};

/// Bubble radius at `progress == 1`, as a multiple of the viewport diagonal.
pub const MAX_RADIUS_FACTOR: f64 = 1.5;

/// Per-frame inputs shared by every pixel.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Uniforms {
    /// Transition progress, nominally `[0, 1]`. Not clamped.
    pub progress: f64,
    /// Viewport size in pixels.
    pub resolution: Vec2,
    pub texture1_size: Vec2,
    pub texture2_size: Vec2,
}

impl Uniforms {
    pub fn for_textures(
        progress: f64,
        resolution: Vec2,
        texture1: &Texture,
        texture2: &Texture,
    ) -> Self {
        Self {
            progress,
            resolution,
            texture1_size: texture1.size(),
            texture2_size: texture2.size(),
        }
    }
}

/// Reveal circle for a given viewport and progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleGeometry {
    /// Viewport center in pixels.
    pub center: Vec2,
    pub max_radius: f64,
    /// Current radius, `max_radius * progress`.
    pub radius: f64,
}

impl BubbleGeometry {
    pub fn new(resolution: Vec2, progress: f64) -> Self {
        let max_radius = resolution.length() * MAX_RADIUS_FACTOR;
        Self {
            center: resolution * 0.5,
            max_radius,
            radius: max_radius * progress,
        }
    }

    /// Hard outside test: `1.0` when `p` is at or beyond the radius.
    pub fn mask(&self, p: Vec2) -> f64 {
        step(self.radius, (self.center - p).length())
    }
}

/// Sampling decisions for one pixel, before any texture is read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    /// Clamped uv into the outgoing image.
    pub current_uv: Vec2,
    /// Clamped, lens-distorted uv into the incoming image.
    pub new_uv: Vec2,
    /// `1.0` shows the outgoing image, `0.0` the incoming one.
    pub final_mask: f64,
}

/// Evaluates the lens-bubble transition for individual pixels of one frame.
///
/// Everything uniform across the frame (cover fits, bubble geometry) is computed once here.
#[derive(Clone, Debug)]
pub struct Compositor<'a> {
    uniforms: Uniforms,
    geometry: BubbleGeometry,
    fit1: CoverFit,
    fit2: CoverFit,
    texture1: &'a Texture,
    texture2: &'a Texture,
    filter: Filter,
}

impl<'a> Compositor<'a> {
    pub fn new(
        uniforms: Uniforms,
        texture1: &'a Texture,
        texture2: &'a Texture,
        filter: Filter,
    ) -> Self {
        Self {
            geometry: BubbleGeometry::new(uniforms.resolution, uniforms.progress),
            fit1: CoverFit::new(uniforms.resolution, uniforms.texture1_size),
            fit2: CoverFit::new(uniforms.resolution, uniforms.texture2_size),
            uniforms,
            texture1,
            texture2,
            filter,
        }
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn geometry(&self) -> &BubbleGeometry {
        &self.geometry
    }

    pub fn fragment(&self, uv: Vec2) -> Fragment {
        let p = mul(uv, self.uniforms.resolution);
        let mask = self.geometry.mask(p);

        let distortion = lens_distortion(
            p,
            self.fit2.apply(uv),
            self.geometry.center,
            self.geometry.radius,
            FOCUS_FACTOR,
        );

        Fragment {
            current_uv: clamp01(self.fit1.apply(uv)),
            new_uv: clamp01(distortion.distortion_uv),
            final_mask: mask.max(1.0 - distortion.inside),
        }
    }

    /// Final color for the pixel at normalized viewport coordinate `uv`.
    pub fn shade(&self, uv: Vec2) -> Rgba {
        let frag = self.fragment(uv);
        let current = self.texture1.sample(frag.current_uv, self.filter);
        let new = self.texture2.sample(frag.new_uv, self.filter);
        mix_rgba(new, current, frag.final_mask)
    }
}

/// One-off evaluation of a single pixel; prefer [`Compositor`] when shading many.
pub fn shade_pixel(
    uv: Vec2,
    uniforms: &Uniforms,
    texture1: &Texture,
    texture2: &Texture,
    filter: Filter,
) -> Rgba {
    Compositor::new(*uniforms, texture1, texture2, filter).shade(uv)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const RED_F: Rgba = [1.0, 0.0, 0.0, 1.0];
    const BLUE_F: Rgba = [0.0, 0.0, 1.0, 1.0];

    fn textures(size: u32) -> (Texture, Texture) {
        (
            Texture::solid(size, size, RED).unwrap(),
            Texture::solid(size, size, BLUE).unwrap(),
        )
    }

    // Even step counts never land exactly on the viewport center, where the lens direction is NaN.
    fn grid(steps: u32) -> impl Iterator<Item = Vec2> {
        (0..steps).flat_map(move |j| {
            (0..steps).map(move |i| {
                Vec2::new(
                    (f64::from(i) + 0.5) / f64::from(steps),
                    (f64::from(j) + 0.5) / f64::from(steps),
                )
            })
        })
    }

    #[test]
    fn geometry_scales_with_progress() {
        let res = Vec2::new(300.0, 400.0);
        let g0 = BubbleGeometry::new(res, 0.0);
        let g1 = BubbleGeometry::new(res, 1.0);
        let g2 = BubbleGeometry::new(res, 2.0);
        assert_eq!(g0.center, Vec2::new(150.0, 200.0));
        assert_eq!(g0.radius, 0.0);
        assert_eq!(g1.max_radius, 750.0);
        assert_eq!(g1.radius, 750.0);
        // out-of-range progress extrapolates linearly
        assert_eq!(g2.radius, 1500.0);
    }

    #[test]
    fn progress_zero_shows_first_image_everywhere() {
        let (t1, t2) = textures(8);
        let res = Vec2::new(64.0, 48.0);
        let u = Uniforms::for_textures(0.0, res, &t1, &t2);
        let c = Compositor::new(u, &t1, &t2, Filter::Linear);
        for uv in grid(16) {
            assert_eq!(c.fragment(uv).final_mask, 1.0);
            assert_eq!(c.shade(uv), RED_F);
        }
    }

    #[test]
    fn progress_one_shows_second_image_everywhere() {
        let (t1, t2) = textures(8);
        let res = Vec2::new(64.0, 48.0);
        let u = Uniforms::for_textures(1.0, res, &t1, &t2);
        let c = Compositor::new(u, &t1, &t2, Filter::Linear);
        assert_eq!(c.geometry().radius, 120.0);
        for uv in grid(16) {
            assert_eq!(c.fragment(uv).final_mask, 0.0);
            assert_eq!(c.shade(uv), BLUE_F);
        }
    }

    #[test]
    fn half_progress_covers_a_square_viewport() {
        let (t1, t2) = textures(1000);
        let res = Vec2::new(1000.0, 1000.0);
        let u = Uniforms::for_textures(0.5, res, &t1, &t2);
        let c = Compositor::new(u, &t1, &t2, Filter::Nearest);
        let expected = 1.5 * 2f64.sqrt() * 1000.0 * 0.5;
        assert!((c.geometry().radius - expected).abs() < 1e-9);
        assert!(c.geometry().radius > 2f64.sqrt() * 500.0);
        for uv in grid(24) {
            assert_eq!(c.fragment(uv).final_mask, 0.0);
            assert_eq!(c.shade(uv), BLUE_F);
        }
    }

    #[test]
    fn small_bubble_splits_inside_and_outside() {
        let (t1, t2) = textures(4);
        let res = Vec2::new(100.0, 100.0);
        // radius = 1.5 * |(100, 100)| * p ~= 21.2
        let u = Uniforms::for_textures(0.1, res, &t1, &t2);
        let c = Compositor::new(u, &t1, &t2, Filter::Linear);
        assert_eq!(c.shade(Vec2::new(0.55, 0.5)), BLUE_F);
        assert_eq!(c.shade(Vec2::new(0.05, 0.05)), RED_F);
        assert_eq!(c.shade(Vec2::new(0.5, 0.9)), RED_F);
    }

    #[test]
    fn sampled_coordinates_stay_in_unit_square() {
        let (t1, _) = textures(4);
        let t2 = Texture::solid(30, 7, BLUE).unwrap();
        let res = Vec2::new(90.0, 160.0);
        for progress in [0.05, 0.2, 0.35, 0.6, 5.0, 40.0, -0.5] {
            let c = Compositor::new(
                Uniforms::for_textures(progress, res, &t1, &t2),
                &t1,
                &t2,
                Filter::Linear,
            );
            for uv in grid(40) {
                let f = c.fragment(uv);
                for v in [f.current_uv, f.new_uv] {
                    assert!((0.0..=1.0).contains(&v.x), "x={} at p={progress}", v.x);
                    assert!((0.0..=1.0).contains(&v.y), "y={} at p={progress}", v.y);
                }
            }
        }
    }

    #[test]
    fn shading_is_repeatable() {
        let t1 = Texture::from_rgba8(2, 1, vec![10, 20, 30, 255, 200, 100, 50, 255]).unwrap();
        let t2 = Texture::from_rgba8(1, 2, vec![5, 6, 7, 255, 250, 240, 230, 128]).unwrap();
        let u = Uniforms::for_textures(0.23, Vec2::new(37.0, 23.0), &t1, &t2);
        for uv in grid(10) {
            let a = shade_pixel(uv, &u, &t1, &t2, Filter::Linear);
            let b = shade_pixel(uv, &u, &t1, &t2, Filter::Linear);
            assert_eq!(a.map(f32::to_bits), b.map(f32::to_bits));
        }
    }
}
