//! Hittable trait and HitRecord for ray-object intersection.

use std::sync::Arc;

use crate::material::{Material, ScatterResult};
use glint_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

/// A dummy material used for HitRecord::default().
/// Always absorbs light (returns None from scatter).
struct DummyMaterial;

impl Material for DummyMaterial {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        None
    }
}

/// Static dummy material instance for Default impl.
static DUMMY_MATERIAL: DummyMaterial = DummyMaterial;

/// Record of a ray-object intersection.
///
/// Reused across candidate tests; only the closest hit inside the active
/// parameter window survives a query.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Surface parameters
    pub u: f32,
    pub v: f32,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: &DUMMY_MATERIAL,
            u: 0.0,
            v: 0.0,
            t: 0.0,
            front_face: false,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// `outward_normal` must have unit length.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
///
/// Leaves, lists, BVH nodes, instance wrappers and volumes all answer the same
/// two questions.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object with `t` inside `ray_t`.
    ///
    /// Returns true if hit and fills in the hit record; on a miss the record
    /// is left untouched. `rng` is only consumed by stochastic objects such as
    /// participating media.
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

/// A list of hittable objects, tested by linear scan.
#[derive(Clone)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
    bbox: Aabb,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            bbox: Aabb::EMPTY,
        }
    }

    /// Add a shared object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.bbox = Aabb::surrounding(&self.bbox, &object.bounding_box());
        self.objects.push(object);
    }

    /// Add an object the list takes ownership of.
    pub fn push(&mut self, object: impl Hittable + 'static) {
        self.add(Arc::new(object));
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.bbox = Aabb::EMPTY;
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let interval = Interval::new(ray_t.min, closest_so_far);
            if object.hit(ray, interval, rec, rng) {
                hit_anything = true;
                closest_so_far = rec.t;
            }
        }

        hit_anything
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere_at(z: f32) -> Sphere {
        Sphere::new(
            Vec3::new(0.0, 0.0, z),
            0.5,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        )
    }

    #[test]
    fn test_set_face_normal() {
        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        rec.set_face_normal(&ray, Vec3::Z);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);

        rec.set_face_normal(&ray, -Vec3::Z);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_list_reports_closest_hit() {
        let mut list = HittableList::new();
        list.push(sphere_at(-5.0));
        list.push(sphere_at(-2.0));
        list.push(sphere_at(-8.0));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(list.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert!((rec.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_list_miss_leaves_record_untouched() {
        let mut list = HittableList::new();
        list.push(sphere_at(-5.0));

        let ray = Ray::new_simple(Vec3::ZERO, Vec3::Y);
        let mut rec = HitRecord::default();
        rec.t = 42.0;
        let mut rng = StdRng::seed_from_u64(0);

        assert!(!list.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert_eq!(rec.t, 42.0);
    }

    #[test]
    fn test_list_bbox_is_running_union() {
        let mut list = HittableList::new();
        assert!(list.is_empty());

        list.push(sphere_at(-5.0));
        list.push(sphere_at(3.0));

        let bbox = list.bounding_box();
        for object in list.objects() {
            assert!(bbox.encloses(&object.bounding_box()));
        }
        assert_eq!(list.len(), 2);

        list.clear();
        assert_eq!(list.bounding_box(), Aabb::EMPTY);
    }
}
