//! Glint Renderer - CPU Monte Carlo path tracing.
//!
//! The scene is a graph of [`Hittable`] objects shared through `Arc`:
//! leaf shapes ([`Sphere`], [`Quad`]), the [`HittableList`] composite,
//! the [`BvhNode`] acceleration tree, and wrappers ([`Translate`],
//! [`Rotate`], [`ConstantMedium`]). Surfaces scatter light through a
//! [`Material`]. A [`Camera`] generates primary rays and [`render`] or
//! [`render_parallel`] integrate them into an [`ImageBuffer`].
//!
//! ```ignore
//! use glint_renderer::*;
//!
//! let mut world = HittableList::new();
//! world.push(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Arc::new(Lambertian::new(Color::splat(0.5)))));
//! let mut rng = StdRng::seed_from_u64(0);
//! let bvh = BvhNode::new(&world, &mut rng);
//!
//! let camera = Camera::new(CameraConfig::default().with_sky_gradient(true))?;
//! let image = render_parallel(&camera, &bvh, 0, DEFAULT_BUCKET_SIZE);
//! save_ppm("out.ppm", &image)?;
//! ```

mod bucket;
mod bvh;
mod camera;
mod config;
mod constant_medium;
mod hittable;
mod instance;
mod material;
mod ppm;
mod quad;
pub mod random;
mod renderer;
mod sphere;

pub use bucket::{
    generate_buckets, render_bucket, render_parallel, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use bvh::BvhNode;
pub use camera::{Camera, CameraConfig};
pub use config::{CameraOverrides, ConfigError, ConfigResult, RenderSettings};
pub use constant_medium::ConstantMedium;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use instance::{Axis, Rotate, Translate};
pub use material::{
    Dielectric, DiffuseLight, Isotropic, Lambertian, Material, Metal, ScatterResult,
};
pub use ppm::{save_ppm, write_ppm};
pub use quad::{make_box, Quad};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, ImageBuffer,
    SELF_INTERSECTION_EPSILON,
};
pub use sphere::Sphere;

/// Re-export math and color types used throughout the scene API
pub use glint_core::Color;
pub use glint_math::{Aabb, Interval, Point3, Ray, Vec3};
