use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{Curve, CurveDomain};

/// A cubic Bezier curve given by its control polygon.
///
/// `B(t) = (1-t)^3 p0 + 3(1-t)^2 t c0 + 3(1-t) t^2 c1 + t^3 p1`
/// for `t` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point.
    pub p0: Point3,
    /// Control point leaving `p0`.
    pub c0: Point3,
    /// Control point arriving at `p1`.
    pub c1: Point3,
    /// End point.
    pub p1: Point3,
}

impl CubicBezier {
    /// Creates a curve from its four control points.
    #[must_use]
    pub fn new(p0: Point3, c0: Point3, c1: Point3, p1: Point3) -> Self {
        Self { p0, c0, c1, p1 }
    }

    /// Builds the curve leaving `start` along `start_dir` and arriving at
    /// `end` along `end_dir`, with handles of the given lengths.
    ///
    /// Directions are expected to be unit length.
    #[must_use]
    pub fn from_tangents(
        start: Point3,
        start_dir: &Vector3,
        start_handle: f64,
        end: Point3,
        end_dir: &Vector3,
        end_handle: f64,
    ) -> Self {
        Self::new(
            start,
            start + start_dir * start_handle,
            end - end_dir * end_handle,
            end,
        )
    }

    fn point_at(&self, t: f64) -> Point3 {
        let s = 1.0 - t;
        let b0 = s * s * s;
        let b1 = 3.0 * s * s * t;
        let b2 = 3.0 * s * t * t;
        let b3 = t * t * t;
        Point3::from(
            self.p0.coords * b0 + self.c0.coords * b1 + self.c1.coords * b2 + self.p1.coords * b3,
        )
    }
}

impl Curve for CubicBezier {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let t = self.domain().check(t)?;
        Ok(self.point_at(t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::UNIT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use approx::assert_relative_eq;

    fn straight() -> CubicBezier {
        CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 3.0),
        )
    }

    fn bend() -> CubicBezier {
        CubicBezier::from_tangents(
            Point3::origin(),
            &Vector3::x(),
            0.5,
            Point3::new(1.0, 1.0, 0.0),
            &Vector3::y(),
            0.5,
        )
    }

    #[test]
    fn endpoints_are_interpolated() {
        let b = bend();
        assert_relative_eq!(b.evaluate(0.0).unwrap(), b.p0);
        assert_relative_eq!(b.evaluate(1.0).unwrap(), b.p1);
    }

    #[test]
    fn evenly_spaced_polygon_is_linear() {
        let b = straight();
        let p = b.evaluate(0.5).unwrap();
        assert_relative_eq!(p, Point3::new(0.0, 0.0, 1.5), epsilon = TOLERANCE);
    }

    #[test]
    fn handles_lie_along_tangents() {
        let b = bend();
        assert_relative_eq!(b.c0, Point3::new(0.5, 0.0, 0.0));
        assert_relative_eq!(b.c1, Point3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn out_of_range_parameter() {
        let b = bend();
        assert!(b.evaluate(1.5).is_err());
        assert!(b.evaluate(-0.1).is_err());
        assert!(b.evaluate(f64::NAN).is_err());
    }
}
