use tracing::{debug, trace};

use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::geometry::BezierSegment;
use crate::node::Node;

use super::ExportNode;

/// Exports a whole node chain in track order.
///
/// The chain is a flat slice; neighbours are looked up by index. The
/// anchor starts at the first node and moves to the previous node whenever
/// the banking reverses direction.
pub struct ExportChain {
    config: ExportConfig,
}

impl ExportChain {
    /// Creates a new `ExportChain` operation.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Executes the traversal, returning the segments in track order.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the chain has fewer
    /// than two nodes, or any node fails export.
    pub fn execute(&self, nodes: &[Node]) -> Result<Vec<BezierSegment>> {
        let mut out = Vec::with_capacity(nodes.len());
        self.execute_into(nodes, &mut out)?;
        Ok(out)
    }

    /// Executes the traversal, appending to `out`.
    ///
    /// On error `out` may hold the segments of the nodes exported so far;
    /// such a partial chain is not usable downstream.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn execute_into(&self, nodes: &[Node], out: &mut Vec<BezierSegment>) -> Result<usize> {
        self.config.validate()?;
        if nodes.len() < 2 {
            return Err(ExportError::ChainTooShort(nodes.len()).into());
        }

        let first_len = out.len();
        let mut anchor = 0;

        for index in 1..nodes.len() {
            let start_param = if index == 1 {
                self.config.start_param
            } else {
                0.0
            };
            let op = ExportNode::new(start_param, self.config.max_segment_angle);

            let before = out.len();
            op.execute(
                &nodes[index],
                &nodes[index - 1],
                nodes.get(index + 1),
                &nodes[anchor],
                out,
            )?;
            trace!(index, anchor, segments = out.len() - before, "exported node");

            if out.get(before).is_some_and(|s| !s.flags.continuous_roll) {
                anchor = index - 1;
            }
        }

        let appended = out.len() - first_len;
        debug!(nodes = nodes.len(), segments = appended, "exported chain");
        Ok(appended)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use crate::TrackError;
    use approx::assert_relative_eq;

    fn straight_chain(len: usize) -> Vec<Node> {
        (0..len)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let z = i as f64;
                let mut node = Node::new(Vector3::new(0.0, 0.0, z), Vector3::z(), 0.0, 1.1, 0.0, 0.0);
                node.total_length = z;
                node.heart_dist_from_last = if i == 0 { 0.0 } else { 1.0 };
                node
            })
            .collect()
    }

    #[test]
    fn one_segment_per_step_on_straight_track() {
        let nodes = straight_chain(5);
        let segments = ExportChain::new(ExportConfig::default())
            .execute(&nodes)
            .unwrap();

        assert_eq!(segments.len(), 4);
        for (i, seg) in segments.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let z = -((i + 1) as f64);
            assert_eq!(seg.p1, Vector3::new(0.0, 0.0, z));
        }
    }

    #[test]
    fn turns_are_subdivided_in_place() {
        let mut nodes = straight_chain(4);
        nodes[2].angle_from_last = 5.0;
        let config = ExportConfig::default().with_max_segment_angle(2.0);
        let segments = ExportChain::new(config).execute(&nodes).unwrap();

        // 5 -> 2.5 -> 1.25 gives four pieces for the middle step.
        assert_eq!(segments.len(), 1 + 4 + 1);
        assert_eq!(segments[4].p1, Vector3::new(0.0, 0.0, -2.0));
        assert_eq!(segments[5].p1, Vector3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn anchor_follows_roll_reversal() {
        let mut nodes = straight_chain(5);
        for (node, roll) in nodes.iter_mut().zip([0.0, 10.0, 20.0, 15.0, 10.0]) {
            node.roll = roll;
        }
        let segments = ExportChain::new(ExportConfig::default())
            .execute(&nodes)
            .unwrap();

        let continuous: Vec<bool> = segments.iter().map(|s| s.flags.continuous_roll).collect();
        // Reversal at node 3; node 4 keeps rolling back from the new anchor.
        assert_eq!(continuous, [true, true, false, true]);
    }

    #[test]
    fn inner_nodes_balance_against_following_step() {
        let mut nodes = straight_chain(4);
        nodes[2].position.z = 3.0;
        nodes[2].heart_dist_from_last = 2.0;
        nodes[3].position.z = 4.0;
        let segments = ExportChain::new(ExportConfig::default())
            .execute(&nodes)
            .unwrap();

        let equal: Vec<bool> = segments
            .iter()
            .map(|s| s.flags.equal_distance_control_points)
            .collect();
        assert_eq!(equal, [false, false, true]);

        let first = &segments[0];
        let leave = first.handle1.norm();
        let arrive = (first.p1 - first.handle2).norm();
        assert_relative_eq!(leave, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(arrive, 4.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn start_param_applies_to_first_arc_only() {
        let nodes = straight_chain(3);
        let config = ExportConfig::default().with_start_param(0.5);
        let segments = ExportChain::new(config).execute(&nodes).unwrap();

        assert_eq!(segments.len(), 2);
        assert_relative_eq!(segments[0].handle1.z, -(0.5 + 0.5 / 3.0), epsilon = 1e-12);
        assert_relative_eq!(segments[1].handle1.z, -(1.0 + 1.0 / 3.0), epsilon = 1e-12);
    }

    #[test]
    fn rejects_short_chain() {
        let nodes = straight_chain(1);
        let err = ExportChain::new(ExportConfig::default())
            .execute(&nodes)
            .unwrap_err();
        assert!(matches!(
            err,
            TrackError::Export(ExportError::ChainTooShort(1))
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let nodes = straight_chain(3);
        let config = ExportConfig::default().with_max_segment_angle(0.0);
        assert!(matches!(
            ExportChain::new(config).execute(&nodes),
            Err(TrackError::Config(_))
        ));
    }

    #[test]
    fn stops_at_first_bad_node() {
        let mut nodes = straight_chain(4);
        nodes[3].position.y = f64::NAN;
        let mut out = Vec::new();
        let result = ExportChain::new(ExportConfig::default()).execute_into(&nodes, &mut out);
        assert!(result.is_err());
        assert_eq!(out.len(), 1);
    }
}
