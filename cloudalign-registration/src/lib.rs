//! # cloudalign registration
//!
//! Coarse pre-alignment of point cloud pairs. The ICP routine is modelled
//! the way the session uses it: an opaque [`PointAligner`] that displaces
//! points toward a target and reports nothing else, plus the probe-based
//! [`recover_transform`] that reconstructs the 4x4 matrix such a mover
//! applied.

pub mod icp;
pub mod recover;

pub use icp::*;
pub use recover::*;
