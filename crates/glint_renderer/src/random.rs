//! Sampling helpers over an explicitly passed random source.
//!
//! Nothing in the renderer reaches for a global generator; every stochastic
//! routine takes `&mut dyn RngCore` so renders are reproducible from a seed.

use glint_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform sample in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform sample in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Uniformly chosen axis index (0=X, 1=Y, 2=Z).
#[inline]
pub fn random_axis(rng: &mut dyn RngCore) -> usize {
    rng.gen_range(0..3)
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling for uniform distribution on sphere
    loop {
        let v = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Sample a random point in the unit disk (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Independent generator for one stream of a seeded render.
pub fn stream_rng(seed: u64, stream: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}
