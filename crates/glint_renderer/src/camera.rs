//! Camera for primary ray generation.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigResult};
use crate::random::{gen_f32, random_in_unit_disk};
use glint_core::Color;
use glint_math::{Ray, Vec3};
use rand::RngCore;

/// Largest image `validate` accepts, in pixels.
pub const MAX_IMAGE_PIXELS: usize = 1 << 28;

/// Frame vectors shorter than this (or closer to parallel) are degenerate.
const FRAME_EPSILON: f32 = 1e-6;

/// User-facing camera and sampling options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    // Image settings
    pub image_width: u32,
    /// Width over height; the image height is derived from it.
    pub aspect_ratio: f32,
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene.
    pub max_depth: u32,

    // Lens settings
    /// Vertical field of view in degrees.
    pub vfov: f32,
    /// Variation angle of rays through each pixel, in degrees.
    pub defocus_angle: f32,
    /// Distance from the camera to the plane of perfect focus.
    pub focus_dist: f32,

    // Camera positioning
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub vup: Vec3,

    /// Radiance of rays that escape the scene.
    pub background: Color,
    /// Use a white to blue vertical gradient instead of `background`.
    pub sky_gradient: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 1.0,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            look_from: Vec3::ZERO,
            look_at: Vec3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            background: Color::ZERO,
            sky_gradient: false,
        }
    }
}

impl CameraConfig {
    /// Set image width and aspect ratio.
    pub fn with_image(mut self, width: u32, aspect_ratio: f32) -> Self {
        self.image_width = width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_sky_gradient(mut self, enabled: bool) -> Self {
        self.sky_gradient = enabled;
        self
    }

    /// Image height derived from width and aspect ratio, never below 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f32 / self.aspect_ratio) as u32).max(1)
    }

    /// Reject options that cannot produce an image.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.image_width == 0 {
            return Err(ConfigError::InvalidImageWidth(self.image_width));
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::InvalidSamplesPerPixel(self.samples_per_pixel));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(ConfigError::InvalidFieldOfView(self.vfov));
        }
        if !(self.focus_dist > 0.0) {
            return Err(ConfigError::InvalidFocusDistance(self.focus_dist));
        }
        if !(self.defocus_angle >= 0.0 && self.defocus_angle < 180.0) {
            return Err(ConfigError::InvalidDefocusAngle(self.defocus_angle));
        }

        // Checked in floating point before the saturating cast in image_height
        let height = (self.image_width as f32 / self.aspect_ratio).floor().max(1.0);
        let too_large = ConfigError::ImageTooLarge {
            width: self.image_width,
            height,
            max: MAX_IMAGE_PIXELS,
        };
        if height > u32::MAX as f32 {
            return Err(too_large);
        }
        match (self.image_width as usize).checked_mul(height as usize) {
            Some(pixels) if pixels <= MAX_IMAGE_PIXELS => {}
            _ => return Err(too_large),
        }

        let view = self.look_from - self.look_at;
        if !view.is_finite() || view.length() < FRAME_EPSILON {
            return Err(ConfigError::DegenerateView);
        }
        let up = self.vup;
        if !up.is_finite()
            || up.length() < FRAME_EPSILON
            || up.normalize().cross(view.normalize()).length() < FRAME_EPSILON
        {
            return Err(ConfigError::DegenerateUp);
        }
        Ok(())
    }
}

/// Camera for generating rays into the scene.
///
/// Built from a validated [`CameraConfig`]; all derived frame values are
/// computed once up front.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    image_height: u32,

    // Derived frame
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    samples_scale: f32,
}

impl Camera {
    /// Validate `config` and derive the camera frame.
    pub fn new(config: CameraConfig) -> ConfigResult<Self> {
        config.validate()?;

        let image_width = config.image_width;
        let image_height = config.image_height();
        let center = config.look_from;

        // Viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        // Orthonormal basis
        let w = (config.look_from - config.look_at).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        // Edges of the viewport, v running down the image
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();

        log::debug!(
            "Camera {}x{}, viewport {:.3}x{:.3}, defocus radius {:.4}",
            image_width,
            image_height,
            viewport_width,
            viewport_height,
            defocus_radius
        );

        Ok(Self {
            samples_scale: 1.0 / config.samples_per_pixel as f32,
            config,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }

    /// Camera basis `(u, v, w)`: right, up, and backwards.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The ray starts on the defocus disk (or at the camera centre with a
    /// pinhole lens) and passes through a jittered point inside the pixel.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new_simple(ray_origin, pixel_sample - ray_origin)
    }

    /// Radiance for a ray that escapes the scene.
    pub fn background(&self, ray: &Ray) -> Color {
        if self.config.sky_gradient {
            sky_gradient(ray)
        } else {
            self.config.background
        }
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

/// White at the horizon blending to sky blue straight up.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_image_height_derived_and_floored() {
        let config = CameraConfig::default().with_image(400, 2.0);
        assert_eq!(config.image_height(), 200);

        let config = CameraConfig::default().with_image(401, 2.0);
        assert_eq!(config.image_height(), 200);

        // Very wide images still get one row
        let config = CameraConfig::default().with_image(10, 100.0);
        assert_eq!(config.image_height(), 1);
    }

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(
            CameraConfig::default()
                .with_image(800, 2.0)
                .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
                .with_lens(90.0, 0.0, 1.0),
        )
        .unwrap();

        let (u, v, w) = camera.basis();
        assert!((u - Vec3::X).length() < 0.001);
        assert!((v - Vec3::Y).length() < 0.001);
        assert!((w - Vec3::Z).length() < 0.001);
        assert_eq!(camera.image_height(), 400);
    }

    #[test]
    fn test_centre_ray_points_at_target() {
        let camera = Camera::new(
            CameraConfig::default()
                .with_image(101, 1.0)
                .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
                .with_lens(90.0, 0.0, 1.0),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(50, 50, &mut rng);
        let dir = ray.direction().normalize();
        assert!(dir.z < -0.99);
        assert_eq!(ray.origin(), Vec3::ZERO);
    }

    #[test]
    fn test_corner_rays_diverge() {
        let camera = Camera::new(CameraConfig::default().with_image(100, 1.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let top_left = camera.get_ray(0, 0, &mut rng).direction();
        let bottom_right = camera.get_ray(99, 99, &mut rng).direction();
        assert!(top_left.x < 0.0 && top_left.y > 0.0);
        assert!(bottom_right.x > 0.0 && bottom_right.y < 0.0);
    }

    #[test]
    fn test_defocus_origins_stay_on_disk() {
        let focus_dist = 5.0;
        let defocus_angle = 10.0;
        let camera = Camera::new(
            CameraConfig::default().with_lens(40.0, defocus_angle, focus_dist),
        )
        .unwrap();
        let radius = focus_dist * (defocus_angle / 2.0_f32).to_radians().tan();
        let mut rng = StdRng::seed_from_u64(3);

        let mut moved = false;
        for _ in 0..100 {
            let ray = camera.get_ray(200, 200, &mut rng);
            let offset = ray.origin();
            assert!(offset.length() <= radius + 1e-5);
            assert!(offset.z.abs() < 1e-5);
            moved |= offset.length() > 1e-4;
        }
        assert!(moved);
    }

    #[test]
    fn test_background_selection() {
        let flat = Camera::new(CameraConfig::default().with_background(Color::new(0.1, 0.2, 0.3)))
            .unwrap();
        let up = Ray::new_simple(Vec3::ZERO, Vec3::Y);
        assert_eq!(flat.background(&up), Color::new(0.1, 0.2, 0.3));

        let sky = Camera::new(CameraConfig::default().with_sky_gradient(true)).unwrap();
        let down = Ray::new_simple(Vec3::ZERO, -Vec3::Y);
        assert!((sky.background(&up) - Color::new(0.5, 0.7, 1.0)).length() < 1e-5);
        assert!((sky.background(&down) - Color::ONE).length() < 1e-5);
    }

    #[test]
    fn test_validation() {
        let ok = CameraConfig::default();
        assert!(ok.validate().is_ok());
        assert!(ok.clone().with_quality(1, 0).validate().is_ok());

        assert!(matches!(
            ok.clone().with_image(0, 1.0).validate(),
            Err(ConfigError::InvalidImageWidth(0))
        ));
        assert!(matches!(
            ok.clone().with_image(10, f32::NAN).validate(),
            Err(ConfigError::InvalidAspectRatio(_))
        ));
        assert!(matches!(
            ok.clone().with_image(10, -1.0).validate(),
            Err(ConfigError::InvalidAspectRatio(_))
        ));
        assert!(matches!(
            ok.clone().with_quality(0, 5).validate(),
            Err(ConfigError::InvalidSamplesPerPixel(0))
        ));
        assert!(matches!(
            ok.clone().with_lens(180.0, 0.0, 1.0).validate(),
            Err(ConfigError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            ok.clone().with_lens(90.0, 0.0, 0.0).validate(),
            Err(ConfigError::InvalidFocusDistance(_))
        ));
        assert!(matches!(
            ok.clone().with_lens(90.0, -1.0, 1.0).validate(),
            Err(ConfigError::InvalidDefocusAngle(_))
        ));
        assert!(Camera::new(ok.clone().with_image(0, 1.0)).is_err());
    }

    #[test]
    fn test_degenerate_frames_rejected() {
        let ok = CameraConfig::default();

        let same_point = ok.clone().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(matches!(same_point.validate(), Err(ConfigError::DegenerateView)));
        assert!(Camera::new(same_point).is_err());

        let looking_up = ok.clone().with_position(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(matches!(looking_up.validate(), Err(ConfigError::DegenerateUp)));

        let looking_down = ok.clone().with_position(Vec3::ZERO, Vec3::new(0.0, -2.0, 0.0), Vec3::Y);
        assert!(matches!(looking_down.validate(), Err(ConfigError::DegenerateUp)));

        let zero_up = ok.clone().with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO);
        assert!(matches!(zero_up.validate(), Err(ConfigError::DegenerateUp)));

        // Tilted up vectors are fine
        let tilted = ok.with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.3, 1.0, 0.2));
        assert!(tilted.validate().is_ok());
    }

    #[test]
    fn test_oversized_images_rejected() {
        let tall = CameraConfig::default().with_image(2, 1e-9);
        assert!(matches!(tall.validate(), Err(ConfigError::ImageTooLarge { .. })));
        assert!(Camera::new(tall).is_err());

        let wide = CameraConfig::default().with_image(u32::MAX, 1.0);
        assert!(matches!(wide.validate(), Err(ConfigError::ImageTooLarge { .. })));

        // Exactly at the limit is accepted
        let limit = CameraConfig::default().with_image(1 << 14, 1.0);
        assert!(limit.validate().is_ok());
    }
}
