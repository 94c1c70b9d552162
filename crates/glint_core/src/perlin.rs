//! Perlin gradient noise.

use glint_math::Vec3;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

const POINT_COUNT: usize = 256;

/// Octaves summed by [`Perlin::turb`].
pub const DEFAULT_TURBULENCE_DEPTH: u32 = 7;

/// Gradient noise field over 3-D space.
///
/// Random unit gradients live on a 256-entry lattice addressed through three
/// shuffled permutation tables, one per axis.
#[derive(Clone, Debug)]
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    /// Build a noise field from the given random source.
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..POINT_COUNT).map(|_| random_gradient(rng)).collect();

        Self {
            gradients,
            perm_x: generate_perm(rng),
            perm_y: generate_perm(rng),
            perm_z: generate_perm(rng),
        }
    }

    /// Smoothed noise value at `p`, roughly in [-1, 1].
    pub fn noise(&self, p: Vec3) -> f32 {
        let frac = p - p.floor();
        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    let index = self.perm_x[((i + di as i32) & 255) as usize]
                        ^ self.perm_y[((j + dj as i32) & 255) as usize]
                        ^ self.perm_z[((k + dk as i32) & 255) as usize];
                    *cell = self.gradients[index];
                }
            }
        }

        trilinear_interp(&c, frac)
    }

    /// Turbulence: sum of `depth` octaves of absolute noise.
    pub fn turb(&self, p: Vec3, depth: u32) -> f32 {
        let mut accum = 0.0;
        let mut temp_p = p;
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(temp_p);
            weight *= 0.5;
            temp_p *= 2.0;
        }

        accum.abs()
    }
}

/// Hermite-smoothed trilinear blend of lattice gradients.
fn trilinear_interp(c: &[[[Vec3; 2]; 2]; 2], frac: Vec3) -> f32 {
    let smooth = frac * frac * (Vec3::splat(3.0) - 2.0 * frac);
    let mut accum = 0.0;

    for (i, plane) in c.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, gradient) in row.iter().enumerate() {
                let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                let weight = frac - Vec3::new(fi, fj, fk);
                accum += (fi * smooth.x + (1.0 - fi) * (1.0 - smooth.x))
                    * (fj * smooth.y + (1.0 - fj) * (1.0 - smooth.y))
                    * (fk * smooth.z + (1.0 - fk) * (1.0 - smooth.z))
                    * gradient.dot(weight);
            }
        }
    }

    accum
}

fn generate_perm(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
    perm.shuffle(rng);
    perm
}

fn random_gradient(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        if v.length_squared() > 1e-6 {
            return v.normalize();
        }
    }
}
