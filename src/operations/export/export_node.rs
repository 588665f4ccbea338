use std::f64::consts::PI;

use crate::error::{ExportError, GeometryError, Result};
use crate::geometry::{BezierSegment, CubicBezier, Curve, SegmentFlags};
use crate::math::{slerp_direction, to_simulator_frame, Point3, UnitVector3, EPSILON, TOLERANCE};
use crate::node::Node;

/// Shortest parameter span a subdivided piece may cover.
const MIN_PIECE: f64 = 1.0 / 65536.0;

/// Handle length for a cubic approximating an arc of `turn` radians over
/// `distance` metres of heart line.
///
/// Reduces to `distance / 3` on straight track.
#[must_use]
pub fn handle_length(distance: f64, turn: f64) -> f64 {
    distance / 3.0 * (1.0 + turn.abs() / PI)
}

/// Exports the track arc ending at one node as Bezier segments.
///
/// The arc runs from `previous` to `current` along their tangents. It is
/// emitted as a single segment when its turn angle is at most
/// `max_segment_angle` degrees and bisected until every piece is within
/// that bound otherwise.
///
/// The anchor only serves as the banking reference for
/// [`SegmentFlags::continuous_roll`]; the turn angle and the arc itself come
/// from `previous` and `current` alone.
#[derive(Debug, Clone, Copy)]
pub struct ExportNode {
    start_param: f64,
    max_segment_angle: f64,
}

impl ExportNode {
    /// Creates a new `ExportNode` operation.
    ///
    /// `start_param` is the arc parameter in `[0, 1)` where export begins;
    /// pass `0.0` to export the whole arc.
    #[must_use]
    pub fn new(start_param: f64, max_segment_angle: f64) -> Self {
        Self {
            start_param,
            max_segment_angle,
        }
    }

    /// Executes the export, appending to `out` in track order.
    ///
    /// Existing entries of `out` are left untouched. Returns the number of
    /// segments appended.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidThreshold`] for a non-positive or
    /// non-finite angle bound, [`ExportError::InvalidStartParam`] for a start
    /// parameter outside `[0, 1)`, [`ExportError::InvalidNode`] when a node
    /// carries NaN geometry or `current`/`previous` have no heading, and
    /// [`ExportError::SubdivisionLimit`] when the turn is too sharp for the
    /// bound to be met by pieces of the shortest allowed span.
    pub fn execute(
        &self,
        current: &Node,
        previous: &Node,
        next: Option<&Node>,
        anchor: &Node,
        out: &mut Vec<BezierSegment>,
    ) -> Result<usize> {
        self.validate(current, previous, next, anchor)?;

        let start_dir = heading(previous, "previous")?;
        let end_dir = heading(current, "current")?;

        let turn = current.angle_from_last.abs();
        if turn * MIN_PIECE > self.max_segment_angle {
            return Err(ExportError::SubdivisionLimit {
                turn,
                max_segment_angle: self.max_segment_angle,
            }
            .into());
        }
        let distance = current.heart_dist_from_last.max(0.0);
        let full_handle = handle_length(distance, turn.to_radians());
        let arc = CubicBezier::from_tangents(
            Point3::from(previous.position),
            &start_dir,
            full_handle,
            Point3::from(current.position),
            &end_dir,
            full_handle,
        );

        let pieces = self.pieces(turn);
        let end_balance = next.map_or(1.0, |next| handle_balance(distance, next));
        let continuous_roll = roll_is_continuous(anchor, previous, current);
        let roll_at = |t: f64| previous.roll + (current.roll - previous.roll) * t;

        let appended = pieces.len();
        out.reserve(appended);

        let mut emitted_roll = None;
        for (s, e) in pieces {
            let span = e - s;
            let handle = handle_length(distance * span, (turn * span).to_radians());
            let end_handle = if e >= 1.0 {
                handle * end_balance
            } else {
                handle
            };

            let from = arc.evaluate(s)?;
            let to = arc.evaluate(e)?;
            let dir_from = slerp_direction(&start_dir, &end_dir, s);
            let dir_to = slerp_direction(&start_dir, &end_dir, e);

            let handle1 = from.coords + dir_from.into_inner() * handle;
            let handle2 = to.coords - dir_to.into_inner() * end_handle;

            let bank = roll_at(e);
            let (roll, flags) = match emitted_roll {
                None => (
                    bank,
                    SegmentFlags {
                        continuous_roll,
                        relative_roll: false,
                        equal_distance_control_points: equal_handles(handle, end_handle),
                    },
                ),
                Some(last) => (
                    bank - last,
                    SegmentFlags {
                        continuous_roll: true,
                        relative_roll: true,
                        equal_distance_control_points: equal_handles(handle, end_handle),
                    },
                ),
            };
            emitted_roll = Some(bank);

            #[allow(clippy::cast_possible_truncation)]
            out.push(BezierSegment::new(
                to_simulator_frame(&handle1),
                to_simulator_frame(&handle2),
                to_simulator_frame(&to.coords),
                roll.to_radians() as f32,
                flags,
            ));
        }

        Ok(appended)
    }

    fn validate(
        &self,
        current: &Node,
        previous: &Node,
        next: Option<&Node>,
        anchor: &Node,
    ) -> std::result::Result<(), ExportError> {
        if !self.max_segment_angle.is_finite() || self.max_segment_angle <= 0.0 {
            return Err(ExportError::InvalidThreshold(self.max_segment_angle));
        }
        if !self.start_param.is_finite() || !(0.0..1.0).contains(&self.start_param) {
            return Err(ExportError::InvalidStartParam(self.start_param));
        }
        current.validate("current", true)?;
        previous.validate("previous", true)?;
        anchor.validate("anchor", false)?;
        if let Some(next) = next {
            next.validate("next", false)?;
        }
        Ok(())
    }

    /// Splits `[start_param, 1]` into ascending ranges whose turn angle is
    /// within the bound.
    ///
    /// Callers reject turns that would need pieces below `MIN_PIECE`.
    fn pieces(&self, turn: f64) -> Vec<(f64, f64)> {
        let mut pending = vec![(self.start_param, 1.0)];
        let mut done = Vec::new();

        while let Some((s, e)) = pending.pop() {
            if turn * (e - s) <= self.max_segment_angle {
                done.push((s, e));
                continue;
            }
            let mid = 0.5 * (s + e);
            pending.push((mid, e));
            pending.push((s, mid));
        }

        done
    }
}

impl Node {
    /// Exports the arc from `previous` to this node into `out`.
    ///
    /// See [`ExportNode`] for the subdivision rules.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid geometry or an invalid threshold; nothing
    /// is appended in that case.
    pub fn export_node(
        &self,
        out: &mut Vec<BezierSegment>,
        previous: &Node,
        next: Option<&Node>,
        anchor: &Node,
        start_param: f64,
        max_segment_angle: f64,
    ) -> Result<usize> {
        ExportNode::new(start_param, max_segment_angle).execute(self, previous, next, anchor, out)
    }
}

fn heading(node: &Node, role: &'static str) -> std::result::Result<UnitVector3, ExportError> {
    node.unit_direction().ok_or(ExportError::InvalidNode {
        role,
        source: GeometryError::ZeroVector,
    })
}

/// Scale for the handle arriving at the current node so that it matches the
/// spacing of the following step.
fn handle_balance(distance: f64, next: &Node) -> f64 {
    let following = next.heart_dist_from_last;
    if distance < EPSILON || following < EPSILON {
        return 1.0;
    }
    2.0 * following / (distance + following)
}

/// Banking keeps turning the same way from the anchor through the current node.
fn roll_is_continuous(anchor: &Node, previous: &Node, current: &Node) -> bool {
    let before = previous.roll - anchor.roll;
    let after = current.roll - previous.roll;
    before * after >= 0.0
}

fn equal_handles(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE * a.abs().max(b.abs()).max(1.0)
}
