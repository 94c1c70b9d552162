//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over a list's members. Each node caches the union of its
//! branches' boxes so whole subtrees are skipped when a ray misses them.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::random::random_axis;
use crate::{HitRecord, Hittable, HittableList};
use glint_math::{Aabb, Interval, Ray};
use rand::RngCore;

/// BVH node.
///
/// A branch over a single object aliases that object on both sides.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Arc<dyn Hittable>,
        right: Arc<dyn Hittable>,
        bbox: Aabb,
    },
    /// Tree over an empty list.
    Empty,
}

impl BvhNode {
    /// Create a BVH over the members of a list.
    pub fn new(list: &HittableList, rng: &mut dyn RngCore) -> Self {
        Self::from_objects(list.objects().to_vec(), rng)
    }

    /// Create a BVH from a set of shared objects.
    pub fn from_objects(mut objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }

        let node = Self::build(&mut objects, rng);
        log::debug!(
            "Built BVH over {} objects, bounds {:?}",
            objects.len(),
            node.bounding_box()
        );
        node
    }

    /// Recursive construction over a non-empty slice.
    ///
    /// Picks a random axis, orders members by the minimum of their boxes on
    /// that axis and splits at the midpoint.
    fn build(objects: &mut [Arc<dyn Hittable>], rng: &mut dyn RngCore) -> Self {
        let axis = random_axis(rng);

        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match objects.len() {
            1 => (objects[0].clone(), objects[0].clone()),
            2 => {
                if box_compare(&objects[0], &objects[1], axis) == Ordering::Greater {
                    (objects[1].clone(), objects[0].clone())
                } else {
                    (objects[0].clone(), objects[1].clone())
                }
            }
            n => {
                objects.sort_by(|a, b| box_compare(a, b, axis));

                let (lower, upper) = objects.split_at_mut(n / 2);
                let left: Arc<dyn Hittable> = Arc::new(Self::build(lower, rng));
                let right: Arc<dyn Hittable> = Arc::new(Self::build(upper, rng));
                (left, right)
            }
        };

        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
        BvhNode::Branch { left, right, bbox }
    }
}

/// Order two objects by the lower bound of their boxes on `axis`.
fn box_compare(a: &Arc<dyn Hittable>, b: &Arc<dyn Hittable>, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
}

impl Hittable for BvhNode {
    fn hit<'a>(
        &'a self,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
        rng: &mut dyn RngCore,
    ) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec, rng);

                // A single aliased member was already tested; a second test
                // would resample stochastic objects such as media
                if Arc::ptr_eq(left, right) {
                    return hit_left;
                }

                // Only check right up to closest hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec, rng);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
