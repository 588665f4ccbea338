use std::f64::consts::FRAC_PI_3;

use crate::math::{EPSILON, G, HZ};
use crate::node::Node;

/// Length of the smoothing window in seconds at zero smoothing speed.
pub const SMOOTHING_WINDOW: f64 = 1.0;

/// Upper bound on the pitch swept across one smoothing window.
pub const MAX_SWEEP: f64 = FRAC_PI_3;

/// Smoothed rider forces at a node, in g.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SmoothForces {
    /// Force along the banked normal.
    pub normal: f64,
    /// Force along the banked lateral axis.
    pub lateral: f64,
}

impl SmoothForces {
    /// No force in either direction.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a force pair.
    #[must_use]
    pub const fn new(normal: f64, lateral: f64) -> Self {
        Self { normal, lateral }
    }

    /// Evaluates the smoothed forces from the node's own metrics.
    ///
    /// The pitch and yaw rates are projected into the banked frame. The
    /// normal term is the heart-line curvature over the travelled heart
    /// distance; the lateral term is the yaw rotation seen at the heart
    /// offset, widened by the pitch swept during the smoothing window. A
    /// non-zero roll speed pulls the rider towards the roll axis.
    ///
    /// A straight step or a heart distance below `EPSILON` contributes no
    /// curvature. This is a convention, not the limit of the formulas: the
    /// lateral term does not depend on the heart distance and jumps to zero
    /// at that cutoff.
    #[must_use]
    pub fn compute(node: &Node) -> Self {
        let roll_rate = node.roll_speed.to_radians();
        let roll_pull = node.heart * roll_rate * roll_rate / G;

        if node.angle_from_last.abs() < EPSILON || node.heart_dist_from_last < EPSILON {
            return Self::new(-roll_pull, 0.0);
        }

        let (sin_roll, cos_roll) = node.roll.to_radians().sin_cos();
        let yaw_scale = node.pitch().abs().cos();
        let delta_pitch = node.pitch_from_last.to_radians();
        let delta_yaw = node.yaw_from_last.to_radians();

        let normal_angle = delta_pitch * cos_roll + yaw_scale * delta_yaw * sin_roll;
        let lateral_angle = -delta_pitch * sin_roll + yaw_scale * delta_yaw * cos_roll;

        let window = SMOOTHING_WINDOW / (1.0 + node.smooth_speed.max(0.0));
        let sweep = (normal_angle * HZ * window).abs().min(MAX_SWEEP);

        let normal = normal_angle * node.heart_dist_from_last * HZ * HZ / G - roll_pull;
        let lateral = lateral_angle * node.heart * HZ / (G * sweep.cos());

        Self::new(normal, lateral)
    }
}

impl Default for SmoothForces {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Node {
    /// Computes and stores [`smooth_normal`](Node::smooth_normal) and
    /// [`smooth_lateral`](Node::smooth_lateral).
    pub fn calc_smooth_forces(&mut self) {
        let forces = SmoothForces::compute(self);
        self.smooth_normal = forces.normal;
        self.smooth_lateral = forces.lateral;
    }

    /// Returns the last smoothed forces as a pair.
    #[must_use]
    pub fn smooth_forces(&self) -> SmoothForces {
        SmoothForces::new(self.smooth_normal, self.smooth_lateral)
    }
}
