//! Material trait for surface scattering.

use std::sync::Arc;

use crate::hittable::HitRecord;
use crate::random::{gen_f32, random_unit_vector};
use glint_core::{Color, SolidColor, Texture};
use glint_math::{Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Outcome of a scattering event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Color filter applied to the light arriving along `scattered`
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and the new ray, or None if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;

    /// Get emitted light from this material.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _u: f32, _v: f32, _p: Vec3) -> Color {
        Color::ZERO
    }
}

fn solid(color: Color) -> Arc<dyn Texture> {
    Arc::new(SolidColor::new(color))
}

/// Lambertian (diffuse) material.
#[derive(Clone)]
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(solid(albedo))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if scatter_direction.near_zero() {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scatter_direction, ray_in.time()),
        })
    }
}

/// Metal (specular) material.
#[derive(Clone)]
pub struct Metal {
    albedo: Arc<dyn Texture>,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self::from_texture(solid(albedo), fuzz)
    }

    pub fn from_texture(albedo: Arc<dyn Texture>, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = ray_in.direction().reflected(rec.normal).normalize();
        let scattered_dir = reflected + self.fuzz * random_unit_vector(rng);

        // Fuzz must not push the reflection below the surface
        if scattered_dir.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, scattered_dir, ray_in.time()),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            unit_direction.reflected(rec.normal)
        } else {
            unit_direction.refracted(rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction, ray_in.time()),
        })
    }
}

/// Diffuse light emitter.
#[derive(Clone)]
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::from_texture(solid(emit))
    }

    pub fn from_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, u: f32, v: f32, p: Vec3) -> Color {
        self.emit.value(u, v, p)
    }
}

/// Phase function of a participating medium: scatters uniformly in all
/// directions.
#[derive(Clone)]
pub struct Isotropic {
    albedo: Arc<dyn Texture>,
}

impl Isotropic {
    pub fn new(albedo: Color) -> Self {
        Self::from_texture(solid(albedo))
    }

    pub fn from_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Isotropic {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        Some(ScatterResult {
            attenuation: self.albedo.value(rec.u, rec.v, rec.p),
            scattered: Ray::new(rec.p, random_unit_vector(rng), ray_in.time()),
        })
    }
}
