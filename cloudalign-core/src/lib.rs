//! Core data structures for cloudalign
//!
//! This crate provides the fundamental types for point cloud alignment:
//! points, point clouds with optional per-point colors, and homogeneous
//! 4x4 transformations.

pub mod point;
pub mod point_cloud;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Common result type for cloudalign operations
pub type Result<T> = std::result::Result<T, Error>;
