use crate::Vec3;

/// A ray `P(t) = origin + t * direction` with a time tag.
///
/// The direction is not required to be unit length; intersection routines
/// work with whatever scale the caller provides. `time` is carried through
/// scattering and instancing but nothing consumes it yet.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Create a ray at time 0.
    #[inline]
    pub fn new_simple(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0.0)
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new_simple(Vec3::ZERO, Vec3::Z)
    }
}
