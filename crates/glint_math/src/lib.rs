// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod interval;
mod ray;
mod vec_ext;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vec_ext::Vec3Ext;

/// Point in world or object space.
pub type Point3 = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_alias_is_vec3() {
        let p: Point3 = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(p + Vec3::ONE, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_vec3_axis_index() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v[2] = 5.0;
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 2.0);
        assert_eq!(v[2], 5.0);
    }
}
