//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by the camera's maximum depth
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction on output

use crate::{Camera, HitRecord, Hittable};
use glint_core::Color;
use glint_math::{Interval, Ray};
use rand::RngCore;

/// Lower bound on secondary hit distances, so a scattered ray does not
/// re-hit the surface it left.
pub const SELF_INTERSECTION_EPSILON: f32 = 0.001;

/// Compute the radiance carried back along a ray.
///
/// `depth` is the number of bounces left; at zero the path contributes
/// nothing.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    camera: &Camera,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if !world.hit(
        ray,
        Interval::new(SELF_INTERSECTION_EPSILON, f32::INFINITY),
        &mut rec,
        rng,
    ) {
        return camera.background(ray);
    }

    let emission = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let scattered_color = ray_color(&result.scattered, world, depth - 1, camera, rng);
            emission + result.attenuation * scattered_color
        }
        // Absorbed
        None => emission,
    }
}

/// Render a single pixel as the mean of its samples (linear color).
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), camera, rng);
    }

    pixel_color * camera.samples_scale()
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
///
/// Channels are gamma corrected and clamped to [0, 0.999] before scaling,
/// so 1.0 maps to 255.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Row-major buffer of linear pixel colors.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Copy a row-major block of `width` x `height` pixels with its
    /// top-left corner at (x, y).
    pub fn write_region(&mut self, x: u32, y: u32, width: u32, block: &[Color]) {
        for (row, line) in block.chunks(width as usize).enumerate() {
            let start = self.index(x, y + row as u32);
            self.pixels[start..start + line.len()].copy_from_slice(line);
        }
    }

    /// Convert to display RGB triples.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|c| color_to_rgb(*c)).collect()
    }
}

/// Render the entire scene on the calling thread.
///
/// Pixels are visited row by row from the top, all drawing from `rng`.
pub fn render(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> ImageBuffer {
    let width = camera.image_width();
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let color = render_pixel(camera, world, x, y, rng);
            image.set(x, y, color);
        }
    }

    image
}
