//! Track-spline export kernel for roller coaster design.
//!
//! Takes a chain of sampled track [`Node`]s, derives smoothed rider forces
//! per node, converts consecutive nodes into cubic [`BezierSegment`]s and
//! writes those to the simulator's binary interchange format.
//!
//! ```ignore
//! use trackspline::{io, ExportChain, ExportConfig};
//!
//! let segments = ExportChain::new(ExportConfig::default()).execute(&nodes)?;
//! io::write_export_path("track.nlbez", &segments)?;
//! ```

pub mod config;
pub mod error;
pub mod forces;
pub mod geometry;
pub mod io;
pub mod logging;
pub mod math;
pub mod node;
pub mod operations;

pub use config::ExportConfig;
pub use error::{Result, TrackError};
pub use forces::SmoothForces;
pub use geometry::{BezierSegment, SegmentFlags};
pub use node::Node;
pub use operations::export::{ExportChain, ExportNode};
