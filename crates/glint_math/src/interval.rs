/// Closed scalar range `[min, max]`.
///
/// Used both as the valid parameter window of a ray and as the extent of a
/// bounding box along one axis. An interval with `min > max` contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// True when no value lies in the interval.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Returns true if `other` lies entirely inside this interval.
    pub fn encloses(&self, other: &Interval) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Widens the interval by `delta / 2` on each side.
    pub fn expand(&self, delta: f32) -> Interval {
        let padding = delta / 2.0;
        Interval::new(self.min - padding, self.max + padding)
    }

    /// Shifts both ends by a scalar displacement.
    pub fn offset(&self, displacement: f32) -> Interval {
        Interval::new(self.min + displacement, self.max + displacement)
    }

    /// Smallest interval enclosing both `a` and `b`.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval::new(a.min.min(b.min), a.max.max(b.max))
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}
