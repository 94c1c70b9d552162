//! End-to-end renders of small scenes.

use std::sync::Arc;

use glint_renderer::{
    color_to_rgb, render, render_parallel, BvhNode, Camera, CameraConfig, Color, ConstantMedium,
    DiffuseLight, HittableList, Lambertian, Quad, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn camera(config: CameraConfig) -> Camera {
    Camera::new(
        config
            .with_image(20, 1.0)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0),
    )
    .unwrap()
}

#[test]
fn empty_scene_renders_background_at_any_sample_count() {
    let background = Color::new(0.3, 0.5, 0.8);
    let world = HittableList::new();

    for spp in [1, 3, 4, 16] {
        let camera = camera(
            CameraConfig::default()
                .with_quality(spp, 8)
                .with_background(background),
        );
        let mut rng = StdRng::seed_from_u64(u64::from(spp));
        let image = render(&camera, &world, &mut rng);

        for (color, rgb) in image.pixels.iter().zip(image.to_rgb8()) {
            assert!((*color - background).length() < 1e-6, "spp {spp}: {color}");
            assert_eq!(rgb, color_to_rgb(background));
        }
    }
}

/// With one bounce a Lambertian hit scatters into depth 0 and returns
/// black, so the whole sphere silhouette is black (its centre is no darker
/// than its rim) while every sky pixel carries the gradient.
#[test]
fn single_bounce_sphere_is_darker_than_sky() {
    let mut world = HittableList::new();
    world.push(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::ONE)),
    ));
    let camera = camera(
        CameraConfig::default()
            .with_quality(1, 1)
            .with_sky_gradient(true),
    );
    let mut rng = StdRng::seed_from_u64(0);
    let image = render(&camera, &world, &mut rng);

    // The sphere subtends 30 degrees, i.e. radius tan(30) on the z = -1
    // viewport. Pixels are 0.1 wide and jitter up to half a pixel per axis.
    let silhouette = 30.0f32.to_radians().tan();
    let jitter = 0.05 * std::f32::consts::SQRT_2;
    let (mut sphere_pixels, mut sky_pixels) = (0, 0);

    for j in 0..20 {
        for i in 0..20 {
            let x = -1.0 + (i as f32 + 0.5) * 0.1;
            let y = 1.0 - (j as f32 + 0.5) * 0.1;
            let r = (x * x + y * y).sqrt();
            let color = image.get(i, j);

            if r + jitter < silhouette {
                assert_eq!(color, Color::ZERO, "sphere pixel ({i}, {j})");
                sphere_pixels += 1;
            } else if r - jitter > silhouette {
                assert!(color.min_element() > 0.4, "sky pixel ({i}, {j}): {color}");
                sky_pixels += 1;
            }
        }
    }

    assert!(sphere_pixels > 0 && sky_pixels > 0);
    assert_eq!(image.get(10, 10), Color::ZERO);
    assert!(image.get(0, 0).length() > 0.0);
}

#[test]
fn zero_depth_renders_black_even_with_lights() {
    let mut world = HittableList::new();
    world.push(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(DiffuseLight::new(Color::splat(10.0))),
    ));
    let camera = camera(
        CameraConfig::default()
            .with_quality(2, 0)
            .with_background(Color::ONE),
    );
    let mut rng = StdRng::seed_from_u64(0);
    let image = render(&camera, &world, &mut rng);

    assert!(image.pixels.iter().all(|c| *c == Color::ZERO));
}

#[test]
fn light_is_visible_against_black_background() {
    let mut world = HittableList::new();
    world.push(Quad::new(
        Vec3::new(-2.0, -2.0, -1.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        Arc::new(DiffuseLight::new(Color::splat(0.25))),
    ));
    let camera = camera(CameraConfig::default().with_quality(4, 3));
    let mut rng = StdRng::seed_from_u64(0);
    let image = render(&camera, &world, &mut rng);

    // The quad covers more than the whole 90 degree view
    for color in &image.pixels {
        assert!((*color - Color::splat(0.25)).length() < 1e-6);
    }
}

#[test]
fn seeded_parallel_smoke_render_is_reproducible() {
    let mut rng = StdRng::seed_from_u64(9);
    let boundary = Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, -2.0),
        1.0,
        Arc::new(Lambertian::new(Color::ONE)),
    ));
    let mut world = HittableList::new();
    world.push(ConstantMedium::new(boundary, 0.8, Color::splat(0.7)));
    world.push(Sphere::new(
        Vec3::new(0.0, -101.0, -2.0),
        100.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.6, 0.2))),
    ));
    let bvh = BvhNode::new(&world, &mut rng);

    let camera = camera(
        CameraConfig::default()
            .with_quality(4, 6)
            .with_sky_gradient(true),
    );
    let first = render_parallel(&camera, &bvh, 77, 8);
    let second = render_parallel(&camera, &bvh, 77, 8);

    assert_eq!(first.pixels, second.pixels);
    assert!(first.pixels.iter().all(|c| c.is_finite()));
}
