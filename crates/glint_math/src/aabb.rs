use crate::{Interval, Ray, Vec3};

/// Minimum extent of any box axis. Flat primitives such as quads still get a
/// box that rays can hit.
const MIN_EXTENT: f32 = 0.0001;

/// Axis-aligned bounding box used by the BVH and the instance wrappers.
///
/// Defined by three intervals, one per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };

    /// Create a new AABB from three intervals, padding degenerate axes.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points given in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(
            Interval::new(a.x.min(b.x), a.x.max(b.x)),
            Interval::new(a.y.min(b.y), a.y.max(b.y)),
            Interval::new(a.z.min(b.z), a.z.max(b.z)),
        )
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Corner with the smallest coordinates.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Corner with the largest coordinates.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// All eight corners, ordered by the (x, y, z) bit pattern of the index.
    pub fn corners(&self) -> [Vec3; 8] {
        let mut corners = [Vec3::ZERO; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner = Vec3::new(
                if i & 1 == 0 { self.x.min } else { self.x.max },
                if i & 2 == 0 { self.y.min } else { self.y.max },
                if i & 4 == 0 { self.z.min } else { self.z.max },
            );
        }
        corners
    }

    /// True if `other` lies entirely inside this box.
    pub fn encloses(&self, other: &Aabb) -> bool {
        self.x.encloses(&other.x) && self.y.encloses(&other.y) && self.z.encloses(&other.z)
    }

    /// True if the point lies inside the box (inclusive).
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method: the parameter window is narrowed axis by axis and the
    /// test fails as soon as it closes.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];

            let mut t0 = (slab.min - r.origin[axis]) * adinv;
            let mut t1 = (slab.max - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// Translate (move) the AABB by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(
            self.x.offset(offset.x),
            self.y.offset(offset.y),
            self.z.offset(offset.z),
        )
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        if self.x.size() < MIN_EXTENT {
            self.x = self.x.expand(MIN_EXTENT);
        }
        if self.y.size() < MIN_EXTENT {
            self.y = self.y.expand(MIN_EXTENT);
        }
        if self.z.size() < MIN_EXTENT {
            self.z = self.z.expand(MIN_EXTENT);
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
