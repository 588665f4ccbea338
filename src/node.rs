//! Track nodes: one sampled station along the heart line.
//!
//! A [`Node`] carries the position and heading handed over by the chain
//! builder, the solver-populated per-sample metrics, and the derived
//! local frame. Neighbours are never referenced from inside a node; a
//! flat slice owns the chain and callers pass `previous`/`next`/`anchor`
//! explicitly.

use nalgebra::{Rotation3, Unit};

use crate::error::{ExportError, GeometryError};
use crate::math::{is_finite, up, UnitVector3, Vector3, TOLERANCE};

/// A sampled station on the track centerline.
///
/// Angles (`roll`, `*_from_last`) are in degrees, distances in metres.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Heart-line position in world space.
    pub position: Vector3,
    /// Heading; normalized on use.
    pub direction: Vector3,
    /// Banking angle.
    pub roll: f64,
    /// Offset from the rail to the rider's centre of mass.
    pub heart: f64,
    /// Rolling friction coefficient used by the external solver.
    pub friction: f64,
    /// Air resistance coefficient used by the external solver.
    pub resistance: f64,

    /// Arc length along the heart line up to this node.
    pub total_length: f64,
    /// Turn angle since the previous node, measured in the track plane.
    pub track_angle_from_last: f64,
    /// Full 3D turn angle since the previous node.
    pub angle_from_last: f64,
    pub pitch_from_last: f64,
    pub yaw_from_last: f64,
    pub roll_from_last: f64,
    /// Heart-line distance travelled since the previous node.
    pub heart_dist_from_last: f64,
    /// Banking rate in degrees per second.
    pub roll_speed: f64,
    /// Smoothing strength; zero keeps the full one-second window.
    pub smooth_speed: f64,

    normal: Vector3,
    pub(crate) smooth_normal: f64,
    pub(crate) smooth_lateral: f64,
}

impl Node {
    /// Creates a node with zeroed metrics and an up-to-date frame.
    #[must_use]
    pub fn new(
        position: Vector3,
        direction: Vector3,
        roll: f64,
        heart: f64,
        friction: f64,
        resistance: f64,
    ) -> Self {
        let mut node = Self {
            position,
            direction,
            roll,
            heart,
            friction,
            resistance,
            total_length: 0.0,
            track_angle_from_last: 0.0,
            angle_from_last: 0.0,
            pitch_from_last: 0.0,
            yaw_from_last: 0.0,
            roll_from_last: 0.0,
            heart_dist_from_last: 0.0,
            roll_speed: 0.0,
            smooth_speed: 0.0,
            normal: up(),
            smooth_normal: 0.0,
            smooth_lateral: 0.0,
        };
        node.update_norm();
        node
    }

    /// Recomputes the frame's up vector from `direction` and `roll`.
    ///
    /// The result is a unit vector orthogonal to the heading. A zero-length
    /// heading yields world up; a vertical heading uses `-X` as the lateral
    /// reference.
    pub fn update_norm(&mut self) {
        let Some(dir) = Unit::try_new(self.direction, TOLERANCE) else {
            self.normal = up();
            return;
        };

        let lateral = Unit::try_new(dir.cross(&up()), TOLERANCE)
            .map_or_else(|| -Vector3::x(), Unit::into_inner);
        let level = lateral.cross(&dir.into_inner()).normalize();

        let bank = Rotation3::from_axis_angle(&dir, self.roll.to_radians());
        self.normal = (bank * level).normalize();
    }

    /// Up vector of the local frame.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Sideways vector of the local frame (`direction × normal`).
    #[must_use]
    pub fn lateral(&self) -> Vector3 {
        match self.unit_direction() {
            Some(dir) => dir.cross(&self.normal),
            None => -Vector3::x(),
        }
    }

    /// Normalized heading, or `None` for a zero-length direction.
    #[must_use]
    pub fn unit_direction(&self) -> Option<UnitVector3> {
        Unit::try_new(self.direction, TOLERANCE)
    }

    /// Absolute track pitch in radians.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.unit_direction()
            .map_or(0.0, |dir| dir.y.clamp(-1.0, 1.0).asin())
    }

    /// Smoothed normal force in g, written by
    /// [`calc_smooth_forces`](Node::calc_smooth_forces).
    #[must_use]
    pub fn smooth_normal(&self) -> f64 {
        self.smooth_normal
    }

    /// Smoothed lateral force in g.
    #[must_use]
    pub fn smooth_lateral(&self) -> f64 {
        self.smooth_lateral
    }

    /// Checks the fields the exporter relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidNode`] naming `role` when the position or
    /// direction is non-finite, the direction is zero-length (if required), or
    /// the solver metrics are non-finite.
    pub(crate) fn validate(
        &self,
        role: &'static str,
        require_direction: bool,
    ) -> Result<(), ExportError> {
        let fail = |source| ExportError::InvalidNode { role, source };

        if !is_finite(&self.position) {
            return Err(fail(GeometryError::NonFinite("position")));
        }
        if !is_finite(&self.direction) {
            return Err(fail(GeometryError::NonFinite("direction")));
        }
        if require_direction && self.direction.norm() < TOLERANCE {
            return Err(fail(GeometryError::ZeroVector));
        }
        if !self.roll.is_finite() {
            return Err(fail(GeometryError::NonFinite("roll")));
        }
        if !self.angle_from_last.is_finite() {
            return Err(fail(GeometryError::NonFinite("angle_from_last")));
        }
        if !self.heart_dist_from_last.is_finite() {
            return Err(fail(GeometryError::NonFinite("heart_dist_from_last")));
        }
        Ok(())
    }
}
