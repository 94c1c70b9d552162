// Extension methods for glam::Vec3 used by the path tracer.

use glam::Vec3;

/// Components below this magnitude count as zero.
const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Extension trait for Vec3 to provide ray tracing helpers.
pub trait Vec3Ext {
    /// True if every component is within `1e-8` of zero.
    fn near_zero(&self) -> bool;

    /// Mirror reflection of `self` about the unit normal `n`.
    fn reflected(&self, n: Vec3) -> Vec3;

    /// Refract the unit vector `self` through a surface with unit normal `n`.
    ///
    /// `etai_over_etat` is the ratio of refractive indices (incident / transmitted).
    fn refracted(&self, n: Vec3, etai_over_etat: f32) -> Vec3;
}

impl Vec3Ext for Vec3 {
    fn near_zero(&self) -> bool {
        self.abs().max_element() < NEAR_ZERO_EPSILON
    }

    fn reflected(&self, n: Vec3) -> Vec3 {
        *self - 2.0 * self.dot(n) * n
    }

    fn refracted(&self, n: Vec3, etai_over_etat: f32) -> Vec3 {
        let cos_theta = (-*self).dot(n).min(1.0);
        let r_out_perp = etai_over_etat * (*self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}
