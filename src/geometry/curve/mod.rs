mod bezier;

pub use bezier::CubicBezier;

use crate::error::{GeometryError, Result};
use crate::math::Point3;

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// The unit interval `[0, 1]`.
    pub const UNIT: Self = Self {
        t_min: 0.0,
        t_max: 1.0,
    };

    /// Returns `t` if it lies inside the domain.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] otherwise.
    pub fn check(&self, t: f64) -> Result<f64> {
        if t.is_finite() && (self.t_min..=self.t_max).contains(&t) {
            return Ok(t);
        }
        Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: t,
            min: self.t_min,
            max: self.t_max,
        }
        .into())
    }
}

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;
}
