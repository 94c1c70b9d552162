//! Randomized checks of the intersection contract and the BVH.

use std::sync::Arc;

use glint_renderer::random::{gen_range, random_unit_vector};
use glint_renderer::{
    make_box, Aabb, Axis, BvhNode, Color, HitRecord, Hittable, HittableList, Interval, Lambertian,
    Material, Quad, Ray, Rotate, Sphere, Translate, Vec3,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

fn random_point(rng: &mut dyn RngCore, extent: f32) -> Vec3 {
    Vec3::new(
        gen_range(rng, -extent, extent),
        gen_range(rng, -extent, extent),
        gen_range(rng, -extent, extent),
    )
}

fn random_object(rng: &mut dyn RngCore, material: &Arc<dyn Material>) -> Arc<dyn Hittable> {
    if gen_range(rng, 0.0, 1.0) < 0.6 {
        let radius = gen_range(rng, 0.1, 1.5);
        Arc::new(Sphere::new(random_point(rng, 5.0), radius, material.clone()))
    } else {
        let u = random_point(rng, 2.0);
        let v = random_point(rng, 2.0);
        Arc::new(Quad::new(random_point(rng, 5.0), u, v, material.clone()))
    }
}

fn random_scene(rng: &mut dyn RngCore, count: usize) -> HittableList {
    let material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
    let mut list = HittableList::new();
    for _ in 0..count {
        list.add(random_object(rng, &material));
    }
    list
}

fn random_ray(rng: &mut dyn RngCore) -> Ray {
    Ray::new_simple(random_point(rng, 10.0), random_unit_vector(rng))
}

fn window() -> Interval {
    Interval::new(0.001, f32::INFINITY)
}

fn scene_size() -> impl Strategy<Value = usize> {
    prop::sample::select(vec![1usize, 2, 3, 50])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn bvh_agrees_with_linear_scan(seed in any::<u64>(), count in scene_size()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let list = random_scene(&mut rng, count);
        let bvh = BvhNode::new(&list, &mut rng);

        for _ in 0..64 {
            let ray = random_ray(&mut rng);

            let mut linear = HitRecord::default();
            let mut tree = HitRecord::default();
            let hit_linear = list.hit(&ray, window(), &mut linear, &mut rng);
            let hit_tree = bvh.hit(&ray, window(), &mut tree, &mut rng);

            prop_assert_eq!(hit_linear, hit_tree);
            if hit_linear {
                prop_assert!((linear.t - tree.t).abs() < 1e-4, "t {} vs {}", linear.t, tree.t);
                prop_assert!((linear.p - tree.p).length() < 1e-3);
            }
        }
    }

    #[test]
    fn hits_lie_on_ray_inside_window(seed in any::<u64>(), count in scene_size()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let list = random_scene(&mut rng, count);
        let bvh = BvhNode::new(&list, &mut rng);

        for _ in 0..64 {
            let ray = random_ray(&mut rng);
            let ray_t = Interval::new(gen_range(&mut rng, 0.001, 2.0), gen_range(&mut rng, 2.0, 30.0));
            let mut rec = HitRecord::default();
            if bvh.hit(&ray, ray_t, &mut rec, &mut rng) {
                prop_assert!(rec.t > ray_t.min && rec.t < ray_t.max);
                prop_assert!((ray.at(rec.t) - rec.p).length() < 1e-3);
                prop_assert!((rec.normal.length() - 1.0).abs() < 1e-3);
                // Normals always face against the incoming ray
                prop_assert!(rec.normal.dot(ray.direction()) <= 1e-5);
            }
        }
    }

    #[test]
    fn bvh_box_encloses_members(seed in any::<u64>(), count in scene_size()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let list = random_scene(&mut rng, count);
        let bvh = BvhNode::new(&list, &mut rng);

        let root = bvh.bounding_box();
        for object in list.objects() {
            prop_assert!(root.encloses(&object.bounding_box()));
            prop_assert!(list.bounding_box().encloses(&object.bounding_box()));
        }
    }

    #[test]
    fn wrapper_boxes_contain_moved_corners(
        seed in any::<u64>(),
        angle in -360.0f32..360.0,
        axis in prop::sample::select(vec![Axis::X, Axis::Y, Axis::Z]),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::ONE));
        let a = random_point(&mut rng, 3.0);
        let b = random_point(&mut rng, 3.0);
        let object: Arc<dyn Hittable> = Arc::new(make_box(a, b, material));
        let local = object.bounding_box();

        let rotated = Rotate::new(object.clone(), axis, angle);
        for corner in local.corners() {
            prop_assert!(rotated.bounding_box().contains_point(rotated.object_to_world(corner)));
        }

        let offset = random_point(&mut rng, 10.0);
        let moved = Translate::new(object, offset);
        let expected = Aabb::from_points(local.min() + offset, local.max() + offset);
        prop_assert!((moved.bounding_box().min() - expected.min()).length() < 1e-4);
        prop_assert!((moved.bounding_box().max() - expected.max()).length() < 1e-4);
    }
}

#[test]
fn rotated_translated_box_hit_matches_world_box() {
    // A unit box rotated 180 degrees about Y then moved by (1, 0, 1) fills
    // the same region as the untransformed unit box.
    let material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::ONE));
    let unit: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::ONE, material.clone()));
    let rotated: Arc<dyn Hittable> = Arc::new(Rotate::around_y(unit, 180.0));
    let placed = Translate::new(rotated, Vec3::new(1.0, 0.0, 1.0));
    let reference = make_box(Vec3::ZERO, Vec3::ONE, material);

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let target = Vec3::new(
            gen_range(&mut rng, 0.05, 0.95),
            gen_range(&mut rng, 0.05, 0.95),
            gen_range(&mut rng, 0.05, 0.95),
        );
        let origin = target + random_unit_vector(&mut rng) * 5.0;
        let ray = Ray::new_simple(origin, target - origin);

        let mut expected = HitRecord::default();
        let mut actual = HitRecord::default();
        assert!(reference.hit(&ray, window(), &mut expected, &mut rng));
        assert!(placed.hit(&ray, window(), &mut actual, &mut rng));
        assert!((expected.t - actual.t).abs() < 1e-3);
        assert!((expected.p - actual.p).length() < 1e-3);
        assert!((expected.normal - actual.normal).length() < 1e-3);
    }
}
