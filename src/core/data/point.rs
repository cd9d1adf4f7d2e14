use std::ops::{Add, Mul, Sub};

/// A 2D point or vector in any of the view's coordinate spaces.
///
/// The space a `Point` lives in is implied by the function that produced it;
/// nothing in the type distinguishes screen pixels from fractal units.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_squared(&self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[must_use]
    pub fn approx_eq(&self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);

        assert_eq!(a + b, Point::new(4.0, 6.0));
    }

    #[test]
    fn test_sub() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(-3.0, 7.0);

        assert_eq!(a - b, Point::new(4.0, -5.0));
    }

    #[test]
    fn test_mul_by_scalar() {
        let p = Point::new(1.5, -2.0);

        assert_eq!(p * 2.0, Point::new(3.0, -4.0));
        assert_eq!(p * 0.0, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_distance_squared() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);

        assert_eq!(a.distance_squared(b), 25.0); // 3² + 4² = 25
    }

    #[test]
    fn test_approx_eq_respects_tolerance() {
        let a = Point::new(1.0, 1.0);

        assert!(a.approx_eq(Point::new(1.0 + 1e-10, 1.0 - 1e-10), 1e-9));
        assert!(!a.approx_eq(Point::new(1.1, 1.0), 1e-9));
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(1.0, -2.0).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }
}
