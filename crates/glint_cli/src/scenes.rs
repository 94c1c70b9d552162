//! Preset scenes.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use glint_core::{CheckerTexture, ImageTexture, NoiseTexture, Texture};
use glint_renderer::{
    make_box, CameraConfig, Color, ConstantMedium, Dielectric, DiffuseLight, Hittable,
    HittableList, Lambertian, Material, Metal, Quad, Rotate, Sphere, Translate, Vec3,
};
use rand::RngCore;

/// Image used by the `earth` scene, relative to the working directory.
const EARTH_TEXTURE: &str = "earthmap.jpg";

/// One of the built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Materials,
    Checkered,
    Perlin,
    Quads,
    SimpleLight,
    CornellBox,
    CornellSmoke,
    Earth,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::Materials,
        Preset::Checkered,
        Preset::Perlin,
        Preset::Quads,
        Preset::SimpleLight,
        Preset::CornellBox,
        Preset::CornellSmoke,
        Preset::Earth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Materials => "materials",
            Preset::Checkered => "checkered",
            Preset::Perlin => "perlin",
            Preset::Quads => "quads",
            Preset::SimpleLight => "simple-light",
            Preset::CornellBox => "cornell-box",
            Preset::CornellSmoke => "cornell-smoke",
            Preset::Earth => "earth",
        }
    }

    /// Populate the world and its default camera.
    pub fn build(self, rng: &mut dyn RngCore) -> Scene {
        match self {
            Preset::Materials => materials(),
            Preset::Checkered => checkered(),
            Preset::Perlin => perlin(rng),
            Preset::Quads => quads(),
            Preset::SimpleLight => simple_light(rng),
            Preset::CornellBox => cornell_box(),
            Preset::CornellSmoke => cornell_smoke(),
            Preset::Earth => earth(),
        }
    }
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| anyhow!("Unknown scene '{}'", s))
    }
}

/// A world plus the camera it was composed for.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraConfig,
}

fn lambertian(color: Color) -> Arc<dyn Material> {
    Arc::new(Lambertian::new(color))
}

fn light(color: Color) -> Arc<dyn Material> {
    Arc::new(DiffuseLight::new(color))
}

/// Ground plus glass bubble, mirror and brushed metal spheres.
fn materials() -> Scene {
    let ground = lambertian(Color::new(0.8, 0.8, 0.0));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.8, 0.8), 0.0));
    let brushed: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.7));

    let mut world = HittableList::new();
    world.push(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground));
    world.push(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, glass.clone()));
    // Negative radius flips the normals, hollowing out the glass sphere
    world.push(Sphere::new(Vec3::new(0.0, 0.0, -1.0), -0.4, glass));
    world.push(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, mirror));
    world.push(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, brushed));

    let camera = CameraConfig::default()
        .with_image(400, 16.0 / 9.0)
        .with_quality(40, 10)
        .with_position(Vec3::new(-2.0, 2.0, 1.0), Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(40.0, 4.0, 3.4)
        .with_sky_gradient(true);

    Scene { world, camera }
}

fn checkered() -> Scene {
    let checker: Arc<dyn Texture> = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    let material: Arc<dyn Material> = Arc::new(Lambertian::from_texture(checker));

    let mut world = HittableList::new();
    world.push(Sphere::new(Vec3::new(0.0, -10.0, 0.0), 10.0, material.clone()));
    world.push(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 10.0, material));

    Scene {
        world,
        camera: outdoor_camera(),
    }
}

fn perlin(rng: &mut dyn RngCore) -> Scene {
    let noise: Arc<dyn Texture> = Arc::new(NoiseTexture::new(4.0, rng));
    let material: Arc<dyn Material> = Arc::new(Lambertian::from_texture(noise));

    let mut world = HittableList::new();
    world.push(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, material.clone()));
    world.push(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, material));

    Scene {
        world,
        camera: outdoor_camera(),
    }
}

fn quads() -> Scene {
    let mut world = HittableList::new();
    let panels = [
        (Vec3::new(-3.0, -2.0, 5.0), Vec3::new(0.0, 0.0, -4.0), Vec3::new(0.0, 4.0, 0.0), Color::new(1.0, 0.2, 0.2)),
        (Vec3::new(-2.0, -2.0, 0.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 0.0), Color::new(0.2, 1.0, 0.2)),
        (Vec3::new(3.0, -2.0, 1.0), Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 4.0, 0.0), Color::new(0.2, 0.2, 1.0)),
        (Vec3::new(-2.0, 3.0, 1.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 4.0), Color::new(1.0, 0.5, 0.0)),
        (Vec3::new(-2.0, -3.0, 5.0), Vec3::new(4.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -4.0), Color::new(0.2, 0.8, 0.8)),
    ];
    for (q, u, v, color) in panels {
        world.push(Quad::new(q, u, v, lambertian(color)));
    }

    let camera = CameraConfig::default()
        .with_image(400, 1.0)
        .with_quality(100, 50)
        .with_position(Vec3::new(0.0, 0.0, 9.0), Vec3::ZERO, Vec3::Y)
        .with_lens(80.0, 0.0, 10.0)
        .with_background(Color::new(0.7, 0.8, 1.0));

    Scene { world, camera }
}

fn simple_light(rng: &mut dyn RngCore) -> Scene {
    let noise: Arc<dyn Texture> = Arc::new(NoiseTexture::new(4.0, rng));
    let material: Arc<dyn Material> = Arc::new(Lambertian::from_texture(noise));
    let lamp = light(Color::splat(4.0));

    let mut world = HittableList::new();
    world.push(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, material.clone()));
    world.push(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, material));
    world.push(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 2.0, lamp.clone()));
    world.push(Quad::new(
        Vec3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        lamp,
    ));

    let camera = CameraConfig::default()
        .with_image(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(Vec3::new(26.0, 3.0, 6.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Color::ZERO);

    Scene { world, camera }
}

/// Five walls of a 555 unit box with a ceiling light.
fn cornell_room(world: &mut HittableList, lamp: Color, lamp_half_size: f32) {
    let red = lambertian(Color::new(0.65, 0.05, 0.05));
    let white = lambertian(Color::splat(0.73));
    let green = lambertian(Color::new(0.12, 0.45, 0.15));

    world.push(Quad::new(Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), green));
    world.push(Quad::new(Vec3::ZERO, Vec3::new(0.0, 555.0, 0.0), Vec3::new(0.0, 0.0, 555.0), red));
    world.push(Quad::new(Vec3::new(0.0, 555.0, 0.0), Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 555.0), white.clone()));
    world.push(Quad::new(Vec3::ZERO, Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 555.0), white.clone()));
    world.push(Quad::new(Vec3::new(0.0, 0.0, 555.0), Vec3::new(555.0, 0.0, 0.0), Vec3::new(0.0, 555.0, 0.0), white));

    let corner = Vec3::new(277.5 - lamp_half_size, 554.0, 277.5 - lamp_half_size);
    world.push(Quad::new(
        corner,
        Vec3::new(2.0 * lamp_half_size, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0 * lamp_half_size),
        light(lamp),
    ));
}

/// The two Cornell blocks, turned and placed on the floor.
fn cornell_blocks() -> [Arc<dyn Hittable>; 2] {
    let white = lambertian(Color::splat(0.73));

    let tall: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::new(165.0, 330.0, 165.0), white.clone()));
    let tall: Arc<dyn Hittable> = Arc::new(Rotate::around_y(tall, 15.0));
    let tall: Arc<dyn Hittable> = Arc::new(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0)));

    let short: Arc<dyn Hittable> = Arc::new(make_box(Vec3::ZERO, Vec3::splat(165.0), white));
    let short: Arc<dyn Hittable> = Arc::new(Rotate::around_y(short, -18.0));
    let short: Arc<dyn Hittable> = Arc::new(Translate::new(short, Vec3::new(130.0, 0.0, 65.0)));

    [tall, short]
}

fn cornell_camera() -> CameraConfig {
    CameraConfig::default()
        .with_image(600, 1.0)
        .with_quality(200, 50)
        .with_position(Vec3::new(278.0, 278.0, -800.0), Vec3::new(278.0, 278.0, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 10.0)
        .with_background(Color::ZERO)
}

fn cornell_box() -> Scene {
    let mut world = HittableList::new();
    cornell_room(&mut world, Color::splat(15.0), 65.0);
    for block in cornell_blocks() {
        world.add(block);
    }

    Scene {
        world,
        camera: cornell_camera(),
    }
}

fn cornell_smoke() -> Scene {
    let mut world = HittableList::new();
    cornell_room(&mut world, Color::splat(7.0), 150.0);

    let [tall, short] = cornell_blocks();
    world.push(ConstantMedium::new(tall, 0.01, Color::ZERO));
    world.push(ConstantMedium::new(short, 0.01, Color::ONE));

    Scene {
        world,
        camera: cornell_camera(),
    }
}

fn earth() -> Scene {
    let texture: Arc<dyn Texture> = Arc::new(ImageTexture::open(EARTH_TEXTURE));
    let surface: Arc<dyn Material> = Arc::new(Lambertian::from_texture(texture));

    let mut world = HittableList::new();
    world.push(Sphere::new(Vec3::ZERO, 2.0, surface));

    let camera = CameraConfig::default()
        .with_image(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(Vec3::new(0.0, 0.0, 12.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Color::new(0.7, 0.8, 1.0));

    Scene { world, camera }
}

fn outdoor_camera() -> CameraConfig {
    CameraConfig::default()
        .with_image(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_background(Color::new(0.7, 0.8, 1.0))
}
