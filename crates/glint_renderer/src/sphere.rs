//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::Material;
use glint_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

/// A sphere primitive.
///
/// A negative radius keeps the same surface but flips the normal inwards,
/// which models a hollow shell (e.g. an air bubble inside glass).
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let rvec = Vec3::splat(radius.abs());
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f32, f32) {
        // theta: angle down from +Y
        // phi: angle around Y axis from -X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::get_sphere_uv((rec.p - self.center) / self.radius.abs());
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
