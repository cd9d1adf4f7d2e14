use crate::core::data::point::Point;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum RectangleError {
    #[error("rectangle size must be positive and finite: {size}")]
    InvalidSize { size: f64 },
    #[error("rectangle aspect ratio must be positive and finite: {aspect_ratio}")]
    InvalidAspectRatio { aspect_ratio: f64 },
    #[error("rectangle center must be finite: ({x}, {y})")]
    InvalidCenter { x: f64, y: f64 },
}

/// A window onto fractal space, described by its center and full width.
///
/// The height is `size / aspect_ratio`; `top` is the smaller y value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rectangle {
    center: Point,
    size: f64,
    aspect_ratio: f64,
}

impl Rectangle {
    pub fn new(center: Point, size: f64, aspect_ratio: f64) -> Result<Self, RectangleError> {
        if !center.is_finite() {
            return Err(RectangleError::InvalidCenter {
                x: center.x,
                y: center.y,
            });
        }

        if !(size > 0.0 && size.is_finite()) {
            return Err(RectangleError::InvalidSize { size });
        }

        if !(aspect_ratio > 0.0 && aspect_ratio.is_finite()) {
            return Err(RectangleError::InvalidAspectRatio { aspect_ratio });
        }

        Ok(Self {
            center,
            size,
            aspect_ratio,
        })
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.size
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.size / self.aspect_ratio
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.center.x - self.size / 2.0
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.center.x + self.size / 2.0
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.center.y - self.size / (2.0 * self.aspect_ratio)
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.center.y + self.size / (2.0 * self.aspect_ratio)
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    /// Vector from the center to the bottom-right corner.
    #[must_use]
    pub fn half_extent(&self) -> Point {
        Point::new(self.width() / 2.0, self.height() / 2.0)
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.left() <= point.x
            && self.top() <= point.y
            && self.right() >= point.x
            && self.bottom() >= point.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_new_valid() {
        let rect = Rectangle::new(Point::new(-0.5, 0.0), 3.0, 1.5).unwrap();

        assert_eq!(rect.center(), Point::new(-0.5, 0.0));
        assert_eq!(rect.size(), 3.0);
        assert_eq!(rect.aspect_ratio(), 1.5);
    }

    #[test]
    fn test_rectangle_derived_bounds() {
        let rect = Rectangle::new(Point::new(-0.5, 0.0), 3.0, 1.5).unwrap();

        assert_eq!(rect.left(), -2.0);
        assert_eq!(rect.right(), 1.0);
        assert_eq!(rect.top(), -1.0);
        assert_eq!(rect.bottom(), 1.0);
        assert_eq!(rect.width(), 3.0);
        assert_eq!(rect.height(), 2.0);
        assert_eq!(rect.half_extent(), Point::new(1.5, 1.0));
    }

    #[test]
    fn test_rectangle_size_must_be_positive() {
        let center = Point::new(0.0, 0.0);

        assert_eq!(
            Rectangle::new(center, 0.0, 1.0),
            Err(RectangleError::InvalidSize { size: 0.0 })
        );
        assert_eq!(
            Rectangle::new(center, -2.0, 1.0),
            Err(RectangleError::InvalidSize { size: -2.0 })
        );
        assert!(matches!(
            Rectangle::new(center, f64::NAN, 1.0),
            Err(RectangleError::InvalidSize { .. })
        ));
        assert!(matches!(
            Rectangle::new(center, f64::INFINITY, 1.0),
            Err(RectangleError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_rectangle_aspect_ratio_must_be_positive() {
        let center = Point::new(0.0, 0.0);

        assert_eq!(
            Rectangle::new(center, 1.0, 0.0),
            Err(RectangleError::InvalidAspectRatio { aspect_ratio: 0.0 })
        );
        assert_eq!(
            Rectangle::new(center, 1.0, -1.5),
            Err(RectangleError::InvalidAspectRatio { aspect_ratio: -1.5 })
        );
    }

    #[test]
    fn test_rectangle_center_must_be_finite() {
        assert!(matches!(
            Rectangle::new(Point::new(f64::NAN, 0.0), 1.0, 1.0),
            Err(RectangleError::InvalidCenter { .. })
        ));
    }

    #[test]
    fn test_rectangle_contains_point() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 4.0, 2.0).unwrap();

        assert!(rect.contains_point(Point::new(0.0, 0.0)));
        assert!(rect.contains_point(Point::new(-2.0, -1.0)));
        assert!(rect.contains_point(Point::new(2.0, 1.0)));
        assert!(!rect.contains_point(Point::new(2.1, 0.0)));
        assert!(!rect.contains_point(Point::new(0.0, -1.1)));
    }
}
