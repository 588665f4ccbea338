pub mod curve;
pub mod segment;

pub use curve::{CubicBezier, Curve, CurveDomain};
pub use segment::{BezierSegment, SegmentFlags};
