use crate::math::Vector3;

/// Byte written for a set flag.
pub const FLAG_SET: u8 = 0xFF;

/// Byte written for a cleared flag.
pub const FLAG_CLEAR: u8 = 0x00;

/// Interpretation hints attached to every exported segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentFlags {
    /// Banking continues smoothly from the preceding segment.
    pub continuous_roll: bool,
    /// `roll` is a delta on top of the preceding segment's roll.
    pub relative_roll: bool,
    /// Both handles sit at the same distance from their anchor points.
    pub equal_distance_control_points: bool,
}

impl SegmentFlags {
    /// Packs the flags in file order.
    #[must_use]
    pub fn to_bytes(self) -> [u8; 3] {
        let byte = |set: bool| if set { FLAG_SET } else { FLAG_CLEAR };
        [
            byte(self.continuous_roll),
            byte(self.relative_roll),
            byte(self.equal_distance_control_points),
        ]
    }

    /// Unpacks flags written by [`to_bytes`](Self::to_bytes). Any non-zero
    /// byte reads as set.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            continuous_roll: bytes[0] != FLAG_CLEAR,
            relative_roll: bytes[1] != FLAG_CLEAR,
            equal_distance_control_points: bytes[2] != FLAG_CLEAR,
        }
    }
}

/// One cubic Bezier piece of exported track, in the simulator's frame.
///
/// The curve runs from the previous segment's `p1` through `handle1` and
/// `handle2` to this segment's `p1`.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSegment {
    /// On-curve end point.
    pub p1: Vector3,
    /// Control point leaving the previous end point.
    pub handle1: Vector3,
    /// Control point arriving at `p1`.
    pub handle2: Vector3,
    /// Banking in radians.
    pub roll: f32,
    /// Continuity and encoding flags written after the roll.
    pub flags: SegmentFlags,
}

impl BezierSegment {
    /// Creates a segment; points must already be in the simulator's frame.
    #[must_use]
    pub fn new(
        handle1: Vector3,
        handle2: Vector3,
        p1: Vector3,
        roll: f32,
        flags: SegmentFlags,
    ) -> Self {
        Self {
            p1,
            handle1,
            handle2,
            roll,
            flags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_pack_in_file_order() {
        let flags = SegmentFlags {
            continuous_roll: false,
            relative_roll: true,
            equal_distance_control_points: false,
        };
        assert_eq!(flags.to_bytes(), [0x00, 0xFF, 0x00]);
        assert_eq!(SegmentFlags::default().to_bytes(), [0x00; 3]);
    }

    #[test]
    fn flags_unpack_what_they_pack() {
        let flags = SegmentFlags {
            continuous_roll: true,
            relative_roll: false,
            equal_distance_control_points: true,
        };
        assert_eq!(SegmentFlags::from_bytes(flags.to_bytes()), flags);
        assert!(SegmentFlags::from_bytes([0x01, 0x00, 0x00]).continuous_roll);
    }
}
