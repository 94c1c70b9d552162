//! Parallelogram primitive and the six-sided box built from it.

use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::Material;
use glint_math::{Aabb, Interval, Ray, Vec3};
use rand::RngCore;

/// Rays this close to parallel with the plane never hit it.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A parallelogram spanned by corner `q` and edges `u`, `v`.
///
/// Hits report the planar coordinates `(alpha, beta)` of the intersection
/// as `(u, v)`.
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    /// `n / (n . n)`, maps planar offsets to (alpha, beta)
    w: Vec3,
    normal: Vec3,
    /// Plane offset: normal . x = d
    d: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let w = n / n.dot(n);

        // Both diagonals, so any winding of u and v is covered
        let bbox = Aabb::surrounding(
            &Aabb::from_points(q, q + u + v),
            &Aabb::from_points(q + u, q + v),
        );

        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            material,
            bbox,
        }
    }

    /// Interior test in plane coordinates.
    fn is_interior(alpha: f32, beta: f32) -> bool {
        let unit = Interval::new(0.0, 1.0);
        unit.contains(alpha) && unit.contains(beta)
    }
}

impl Hittable for Quad {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        _rng: &mut dyn RngCore,
    ) -> bool {
        let denom = self.normal.dot(ray.direction());
        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        let intersection = ray.at(t);
        let planar_hitpt = intersection - self.q;
        let alpha = self.w.dot(planar_hitpt.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hitpt));

        if !Self::is_interior(alpha, beta) {
            return false;
        }

        rec.t = t;
        rec.p = intersection;
        rec.u = alpha;
        rec.v = beta;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

/// The closed box with opposite corners `a` and `b`, as six quads.
pub fn make_box(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> HittableList {
    let mut sides = HittableList::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Vec3::new(min.x, min.y, max.z), dx, dy),  // front
        (Vec3::new(max.x, min.y, max.z), -dz, dy), // right
        (Vec3::new(max.x, min.y, min.z), -dx, dy), // back
        (Vec3::new(min.x, min.y, min.z), dz, dy),  // left
        (Vec3::new(min.x, max.y, max.z), dx, -dz), // top
        (Vec3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];

    for (q, u, v) in faces {
        sides.push(Quad::new(q, u, v, material.clone()));
    }

    sides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    fn unit_quad() -> Quad {
        // Unit square in the z = 0 plane
        Quad::new(Vec3::ZERO, Vec3::X, Vec3::Y, gray())
    }

    #[test]
    fn test_quad_hit_reports_planar_coordinates() {
        let quad = unit_quad();
        let ray = Ray::new_simple(Vec3::new(0.25, 0.75, 2.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(quad.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.u - 0.25).abs() < 1e-5);
        assert!((rec.v - 0.75).abs() < 1e-5);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_quad_rejects_outside_points() {
        let quad = unit_quad();
        let ray = Ray::new_simple(Vec3::new(1.5, 0.5, 2.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(!quad.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
    }

    #[test]
    fn test_quad_rejects_parallel_rays() {
        let quad = unit_quad();
        let ray = Ray::new_simple(Vec3::new(0.5, 0.5, 0.0), Vec3::X);
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(!quad.hit(&ray, Interval::UNIVERSE, &mut rec, &mut rng));
    }

    #[test]
    fn test_quad_respects_interval() {
        let quad = unit_quad();
        let ray = Ray::new_simple(Vec3::new(0.5, 0.5, 2.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(!quad.hit(&ray, Interval::new(0.001, 1.0), &mut rec, &mut rng));
    }

    #[test]
    fn test_flat_quad_bbox_is_padded() {
        let bbox = unit_quad().bounding_box();
        assert!(bbox.z.size() > 0.0);
        assert!(bbox.z.contains(0.0));
    }

    #[test]
    fn test_box_has_six_sides_and_tight_bounds() {
        let sides = make_box(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, gray());
        assert_eq!(sides.len(), 6);

        let bbox = sides.bounding_box();
        assert!((bbox.min() - Vec3::ZERO).length() < 1e-3);
        assert!((bbox.max() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-3);
    }

    #[test]
    fn test_box_is_closed() {
        let sides = make_box(Vec3::splat(-1.0), Vec3::splat(1.0), gray());
        let mut rng = StdRng::seed_from_u64(3);

        // Rays from the center escape through exactly one face
        for dir in [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z] {
            let ray = Ray::new_simple(Vec3::new(0.1, -0.2, 0.3), dir);
            let mut rec = HitRecord::default();
            assert!(sides.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec, &mut rng));
            assert!(!rec.front_face);
        }
    }
}
