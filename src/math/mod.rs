/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit-length 3D vector.
pub type UnitVector3 = nalgebra::Unit<Vector3>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Threshold below which angles and distances count as zero.
pub const EPSILON: f64 = 1.192_093e-7;

/// Standard gravity in m/s².
pub const G: f64 = 9.80665;

/// Sample rate of the node chain produced by the kinematic solver.
pub const HZ: f64 = 1000.0;

/// World up axis.
#[must_use]
pub fn up() -> Vector3 {
    Vector3::y()
}

/// Returns `true` when every component of `v` is finite.
#[must_use]
pub fn is_finite(v: &Vector3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Mirrors a world-space vector into the simulator's frame (z is flipped).
#[must_use]
pub fn to_simulator_frame(v: &Vector3) -> Vector3 {
    Vector3::new(v.x, v.y, -v.z)
}

/// Spherical interpolation between two unit directions.
///
/// Falls back to a normalized linear blend when the directions are
/// (anti)parallel and the rotation plane is undefined.
#[must_use]
pub fn slerp_direction(from: &UnitVector3, to: &UnitVector3, t: f64) -> UnitVector3 {
    from.try_slerp(to, t, TOLERANCE).unwrap_or_else(|| {
        let blend = from.into_inner() * (1.0 - t) + to.into_inner() * t;
        nalgebra::Unit::try_new(blend, TOLERANCE).unwrap_or(if t < 0.5 { *from } else { *to })
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn simulator_frame_flips_z_only() {
        let v = to_simulator_frame(&Vector3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(v, Vector3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn finite_check_rejects_nan() {
        assert!(is_finite(&Vector3::new(0.0, 1.0, 2.0)));
        assert!(!is_finite(&Vector3::new(f64::NAN, 1.0, 2.0)));
        assert!(!is_finite(&Vector3::new(0.0, f64::INFINITY, 2.0)));
    }

    #[test]
    fn slerp_halfway_between_axes() {
        let a = UnitVector3::new_normalize(Vector3::z());
        let b = UnitVector3::new_normalize(Vector3::x());
        let mid = slerp_direction(&a, &b, 0.5);
        let expected = Vector3::new(1.0, 0.0, 1.0).normalize();
        assert_relative_eq!(mid.into_inner(), expected, epsilon = 1e-12);
    }

    #[test]
    fn slerp_identical_directions() {
        let a = UnitVector3::new_normalize(Vector3::z());
        let mid = slerp_direction(&a, &a, 0.3);
        assert_relative_eq!(mid.into_inner(), Vector3::z(), epsilon = 1e-12);
    }
}
