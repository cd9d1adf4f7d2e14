//! 2D affine transforms between the view's coordinate spaces.
//!
//! Transforms are plain values: every operation returns a new transform and
//! leaves its operands untouched.

use crate::core::data::point::Point;
use thiserror::Error;

/// Tolerance used when comparing transforms that went through inversion.
pub const TRANSFORM_EPSILON: f64 = 1e-9;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("transform is not invertible (determinant {determinant})")]
    Degenerate { determinant: f64 },
}

/// Affine matrix with the homogeneous row omitted:
///
/// ```text
///   | sx  shx tx |
///   | shy  sy ty |
///   |  0    0  1 |
/// ```
///
/// Mapping: `x' = x*sx + y*shx + tx`, `y' = x*shy + y*sy + ty`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AffineTransform {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    #[must_use]
    pub const fn new(sx: f64, shy: f64, shx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self {
            sx,
            shy,
            shx,
            sy,
            tx,
            ty,
        }
    }

    #[must_use]
    pub const fn translate(dx: f64, dy: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    #[must_use]
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Scales by `factor` around `center`, leaving `center` where it is.
    ///
    /// Built as `translate(+center) · scale(factor) · translate(-center)`.
    #[must_use]
    pub fn scale_about(center: Point, factor: f64) -> Self {
        Self::translate(center.x, center.y)
            .multiply(&Self::scale(factor, factor))
            .multiply(&Self::translate(-center.x, -center.y))
    }

    /// Returns `self · other`: the result applies `other` first, then `self`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        Self {
            sx: self.sx * other.sx + self.shx * other.shy,
            shx: self.sx * other.shx + self.shx * other.sy,
            tx: self.sx * other.tx + self.shx * other.ty + self.tx,
            shy: self.shy * other.sx + self.sy * other.shy,
            sy: self.shy * other.shx + self.sy * other.sy,
            ty: self.shy * other.tx + self.sy * other.ty + self.ty,
        }
    }

    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shx * self.shy
    }

    pub fn inverse(&self) -> Result<Self, TransformError> {
        let determinant = self.determinant();

        if determinant == 0.0 || !determinant.is_finite() {
            return Err(TransformError::Degenerate { determinant });
        }

        let sx = self.sy / determinant;
        let shx = -self.shx / determinant;
        let shy = -self.shy / determinant;
        let sy = self.sx / determinant;

        let inverse = Self {
            sx,
            shy,
            shx,
            sy,
            tx: -(sx * self.tx + shx * self.ty),
            ty: -(shy * self.tx + sy * self.ty),
        };

        // A tiny determinant can still overflow the coefficients.
        if !inverse.is_finite() {
            return Err(TransformError::Degenerate { determinant });
        }

        Ok(inverse)
    }

    #[must_use]
    pub fn transform_point(&self, x: f64, y: f64) -> Point {
        Point {
            x: x * self.sx + y * self.shx + self.tx,
            y: x * self.shy + y * self.sy + self.ty,
        }
    }

    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        self.transform_point(point.x, point.y)
    }

    /// Maps a direction vector: the linear part only, no translation.
    #[must_use]
    pub fn transform_vector(&self, vector: Point) -> Point {
        Point {
            x: vector.x * self.sx + vector.y * self.shx,
            y: vector.x * self.shy + vector.y * self.sy,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        [self.sx, self.shy, self.shx, self.sy, self.tx, self.ty]
            .iter()
            .all(|v| v.is_finite())
    }

    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.sx - other.sx).abs() <= tolerance
            && (self.shy - other.shy).abs() <= tolerance
            && (self.shx - other.shx).abs() <= tolerance
            && (self.sy - other.sy).abs() <= tolerance
            && (self.tx - other.tx).abs() <= tolerance
            && (self.ty - other.ty).abs() <= tolerance
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::identity(), TRANSFORM_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transforms() -> Vec<AffineTransform> {
        vec![
            AffineTransform::identity(),
            AffineTransform::translate(12.5, -3.0),
            AffineTransform::scale(300.0, 300.0),
            AffineTransform::scale(-2.0, 0.5),
            AffineTransform::new(0.8, 0.6, -0.6, 0.8, 4.0, 5.0),
            AffineTransform::scale_about(Point::new(-0.75, 0.1), 0.5),
            AffineTransform::translate(450.0, 300.0)
                .multiply(&AffineTransform::scale(300.0, 300.0))
                .multiply(&AffineTransform::translate(2.0, 1.0)),
        ]
    }

    #[test]
    fn test_identity_leaves_points_unchanged() {
        let p = AffineTransform::identity().transform_point(3.0, -7.0);

        assert_eq!(p, Point::new(3.0, -7.0));
    }

    #[test]
    fn test_translate_and_scale() {
        assert_eq!(
            AffineTransform::translate(1.0, 2.0).transform_point(3.0, 4.0),
            Point::new(4.0, 6.0)
        );
        assert_eq!(
            AffineTransform::scale(2.0, 3.0).transform_point(3.0, 4.0),
            Point::new(6.0, 12.0)
        );
    }

    #[test]
    fn test_multiply_applies_right_operand_first() {
        let scale = AffineTransform::scale(2.0, 2.0);
        let translate = AffineTransform::translate(10.0, 0.0);

        // scale first, then translate
        let scale_then_translate = translate.multiply(&scale);
        assert_eq!(
            scale_then_translate.transform_point(1.0, 1.0),
            Point::new(12.0, 2.0)
        );

        // translate first, then scale
        let translate_then_scale = scale.multiply(&translate);
        assert_eq!(
            translate_then_scale.transform_point(1.0, 1.0),
            Point::new(22.0, 2.0)
        );
    }

    #[test]
    fn test_multiply_does_not_mutate_operands() {
        let a = AffineTransform::translate(1.0, 2.0);
        let b = AffineTransform::scale(3.0, 4.0);

        let _ = a.multiply(&b);

        assert_eq!(a, AffineTransform::translate(1.0, 2.0));
        assert_eq!(b, AffineTransform::scale(3.0, 4.0));
    }

    #[test]
    fn test_multiply_by_inverse_is_identity() {
        for m in sample_transforms() {
            let inverse = m.inverse().expect("sample transforms are invertible");

            assert!(
                m.multiply(&inverse).approx_eq(&AffineTransform::identity(), 1e-9),
                "m · m⁻¹ should be identity for {:?}",
                m
            );
            assert!(
                inverse.multiply(&m).approx_eq(&AffineTransform::identity(), 1e-9),
                "m⁻¹ · m should be identity for {:?}",
                m
            );
        }
    }

    #[test]
    fn test_inverse_round_trips_points() {
        let m = AffineTransform::new(0.8, 0.6, -0.6, 0.8, 4.0, 5.0);
        let inverse = m.inverse().unwrap();
        let p = Point::new(-1.25, 3.5);

        assert!(inverse.apply(m.apply(p)).approx_eq(p, 1e-12));
    }

    #[test]
    fn test_inverse_of_singular_matrix_is_an_error() {
        let collapsed = AffineTransform::scale(0.0, 1.0);
        let rank_one = AffineTransform::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0);

        assert_eq!(
            collapsed.inverse(),
            Err(TransformError::Degenerate { determinant: 0.0 })
        );
        assert_eq!(
            rank_one.inverse(),
            Err(TransformError::Degenerate { determinant: 0.0 })
        );
    }

    #[test]
    fn test_inverse_of_non_finite_matrix_is_an_error() {
        let m = AffineTransform::scale(f64::NAN, 1.0);

        assert!(matches!(
            m.inverse(),
            Err(TransformError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_scale_about_keeps_center_fixed() {
        let center = Point::new(-0.75, 0.1);
        let m = AffineTransform::scale_about(center, 0.25);

        assert!(m.apply(center).approx_eq(center, 1e-12));
        assert!(
            m.apply(Point::new(0.25, 0.1))
                .approx_eq(Point::new(-0.5, 0.1), 1e-12)
        );
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let m = AffineTransform::translate(100.0, 100.0).multiply(&AffineTransform::scale(2.0, 3.0));

        assert_eq!(m.transform_vector(Point::new(1.0, 1.0)), Point::new(2.0, 3.0));
    }

    #[test]
    fn test_determinant() {
        assert_eq!(AffineTransform::scale(2.0, 3.0).determinant(), 6.0);
        assert_eq!(AffineTransform::translate(5.0, 5.0).determinant(), 1.0);
    }

    #[test]
    fn test_is_identity() {
        assert!(AffineTransform::identity().is_identity());
        assert!(AffineTransform::default().is_identity());
        assert!(!AffineTransform::translate(1e-3, 0.0).is_identity());
    }
}
