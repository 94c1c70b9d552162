//! Instance wrappers: place a shared object in a transformed frame.
//!
//! Rather than duplicating geometry, incoming rays are moved into the
//! wrapped object's local space and the resulting hit is moved back out.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

/// A wrapped object displaced by a constant offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self {
            object,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        // Move the ray backwards by the offset
        let local_ray = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());

        if !self.object.hit(&local_ray, ray_t, rec, rng) {
            return false;
        }

        // Normals are unchanged by translation
        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// Coordinate axis a [`Rotate`] wrapper turns about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// The component pair `(i, j)` rotated as `i' = cos i - sin j`,
    /// `j' = sin i + cos j`. The remaining component is left alone.
    fn plane(self) -> (usize, usize) {
        match self {
            Axis::X => (1, 2),
            Axis::Y => (2, 0),
            Axis::Z => (0, 1),
        }
    }
}

/// A wrapped object rotated about one coordinate axis.
pub struct Rotate {
    object: Arc<dyn Hittable>,
    axis: Axis,
    sin_theta: f32,
    cos_theta: f32,
    bbox: Aabb,
}

impl Rotate {
    /// Rotate `object` by `angle` degrees (counter-clockwise looking down
    /// the positive axis).
    pub fn new(object: Arc<dyn Hittable>, axis: Axis, angle: f32) -> Self {
        let (sin_theta, cos_theta) = angle.to_radians().sin_cos();

        let mut rotate = Self {
            object,
            axis,
            sin_theta,
            cos_theta,
            bbox: Aabb::EMPTY,
        };

        // A rotated box is no longer axis-aligned, so re-enclose its corners
        let local = rotate.object.bounding_box();
        let (min, max) = local.corners().iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), &corner| {
                let world = rotate.object_to_world(corner);
                (min.min(world), max.max(world))
            },
        );
        rotate.bbox = Aabb::from_points(min, max);

        rotate
    }

    pub fn around_x(object: Arc<dyn Hittable>, angle: f32) -> Self {
        Self::new(object, Axis::X, angle)
    }

    pub fn around_y(object: Arc<dyn Hittable>, angle: f32) -> Self {
        Self::new(object, Axis::Y, angle)
    }

    pub fn around_z(object: Arc<dyn Hittable>, angle: f32) -> Self {
        Self::new(object, Axis::Z, angle)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Forward rotation, local frame to world frame.
    pub fn object_to_world(&self, v: Vec3) -> Vec3 {
        self.rotate(v, self.sin_theta)
    }

    /// Inverse rotation (the transpose), world frame to local frame.
    pub fn world_to_object(&self, v: Vec3) -> Vec3 {
        self.rotate(v, -self.sin_theta)
    }

    fn rotate(&self, v: Vec3, sin_theta: f32) -> Vec3 {
        let (i, j) = self.axis.plane();
        let mut out = v;
        out[i] = self.cos_theta * v[i] - sin_theta * v[j];
        out[j] = sin_theta * v[i] + self.cos_theta * v[j];
        out
    }
}

impl Hittable for Rotate {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        let local_ray = Ray::new(
            self.world_to_object(ray.origin()),
            self.world_to_object(ray.direction()),
            ray.time(),
        );

        if !self.object.hit(&local_ray, ray_t, rec, rng) {
            return false;
        }

        rec.p = self.object_to_world(rec.p);
        rec.normal = self.object_to_world(rec.normal);
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
