/// Real-valued interval with `min` and `max` bounds.
///
/// Used as the open window of acceptable ray parameters while searching for
/// a hit, and as the `[0, 1]` range colors are clipped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    ///
    /// NaN is mapped to `min` so the result always lies inside the interval.
    pub fn clamp(&self, x: f64) -> f64 {
        if x.is_nan() {
            return self.min;
        }
        x.clamp(self.min, self.max)
    }

    /// The unit interval [0, 1], used for color clipping.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}
