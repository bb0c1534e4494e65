/// A closed interval of real values, used for ray parameter bounds and color clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Valid range for an output color channel before quantization.
    pub const COLOR: Interval = Interval {
        min: 0.0,
        max: 0.999,
    };

    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Same lower bound, upper bound shrunk to `max`.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_unbounded_max() {
        let interval = Interval::new(0.001, f32::INFINITY);
        assert!(interval.contains(1e30));
        assert!(!interval.contains(0.0));
    }

    #[test]
    fn test_interval_clamp() {
        assert_eq!(Interval::COLOR.clamp(-5.0), 0.0);
        assert_eq!(Interval::COLOR.clamp(0.5), 0.5);
        assert_eq!(Interval::COLOR.clamp(1.5), 0.999);
    }

    #[test]
    fn test_interval_with_max() {
        let shrunk = Interval::new(0.001, f32::INFINITY).with_max(3.0);
        assert_eq!(shrunk.min, 0.001);
        assert_eq!(shrunk.max, 3.0);
    }
}
