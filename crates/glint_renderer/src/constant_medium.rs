//! Constant-density participating medium (fog, smoke).

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::material::{Isotropic, Material};
use crate::random::gen_f32;
use glint_core::{Color, Texture};
use glint_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

/// Gap between the entry crossing and the exit search.
const EXIT_EPSILON: f32 = 0.0001;

/// A volume of uniform density bounded by another hittable.
///
/// The boundary must be convex: only the first entry/exit pair along a ray
/// is considered, so a concave boundary loses the gaps between its lobes.
pub struct ConstantMedium {
    boundary: Arc<dyn Hittable>,
    neg_inv_density: f32,
    phase_function: Arc<dyn Material>,
}

impl ConstantMedium {
    pub fn new(boundary: Arc<dyn Hittable>, density: f32, albedo: Color) -> Self {
        Self::with_phase_function(boundary, density, Arc::new(Isotropic::new(albedo)))
    }

    pub fn from_texture(boundary: Arc<dyn Hittable>, density: f32, albedo: Arc<dyn Texture>) -> Self {
        Self::with_phase_function(boundary, density, Arc::new(Isotropic::from_texture(albedo)))
    }

    fn with_phase_function(
        boundary: Arc<dyn Hittable>,
        density: f32,
        phase_function: Arc<dyn Material>,
    ) -> Self {
        Self {
            boundary,
            neg_inv_density: -1.0 / density,
            phase_function,
        }
    }
}

impl Hittable for ConstantMedium {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut entry = HitRecord::default();
        let mut exit = HitRecord::default();

        if !self.boundary.hit(ray, Interval::UNIVERSE, &mut entry, rng) {
            return false;
        }
        let exit_window = Interval::new(entry.t + EXIT_EPSILON, f32::INFINITY);
        if !self.boundary.hit(ray, exit_window, &mut exit, rng) {
            return false;
        }

        let t_enter = entry.t.max(ray_t.min).max(0.0);
        let t_exit = exit.t.min(ray_t.max);
        if t_enter >= t_exit {
            return false;
        }

        let ray_length = ray.direction().length();
        let distance_inside_boundary = (t_exit - t_enter) * ray_length;
        let hit_distance = self.neg_inv_density * gen_f32(rng).ln();

        // The ray crosses the volume without scattering
        if hit_distance > distance_inside_boundary {
            return false;
        }

        rec.t = t_enter + hit_distance / ray_length;
        rec.p = ray.at(rec.t);
        // Arbitrary; isotropic scattering ignores the normal
        rec.normal = Vec3::X;
        rec.front_face = true;
        rec.u = 0.0;
        rec.v = 0.0;
        rec.material = self.phase_function.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.boundary.bounding_box()
    }
}
