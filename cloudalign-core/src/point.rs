//! Point types and related functionality

use nalgebra::{Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// An RGB color, 8 bits per channel
pub type Color = [u8; 3];
