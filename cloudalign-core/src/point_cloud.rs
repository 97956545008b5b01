//! Point cloud data structures and functionality

use crate::error::{Error, Result};
use crate::point::{Color, Point3d};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// An ordered sequence of 3D points, optionally paired with per-point colors.
///
/// The color array is either empty or exactly as long as the point array;
/// indices correspond between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    pub points: Vec<Point3d>,
    pub colors: Vec<Color>,
}

impl PointCloud {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Create a new point cloud with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            colors: Vec::new(),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<Point3d>) -> Self {
        Self {
            points,
            colors: Vec::new(),
        }
    }

    /// Create a point cloud from points and a matching color array.
    ///
    /// The color array must be empty or the same length as the point array.
    pub fn from_points_and_colors(points: Vec<Point3d>, colors: Vec<Color>) -> Result<Self> {
        if !colors.is_empty() && colors.len() != points.len() {
            return Err(Error::InvalidData(format!(
                "color count {} does not match point count {}",
                colors.len(),
                points.len()
            )));
        }
        Ok(Self { points, colors })
    }

    /// Get the number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the cloud carries a color for every point
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Add a point to the cloud
    pub fn push(&mut self, point: Point3d) {
        self.points.push(point);
    }

    /// Get an iterator over the points
    pub fn iter(&self) -> std::slice::Iter<Point3d> {
        self.points.iter()
    }

    /// Get a mutable iterator over the points
    pub fn iter_mut(&mut self) -> std::slice::IterMut<Point3d> {
        self.points.iter_mut()
    }

    /// Clear all points and colors from the cloud
    pub fn clear(&mut self) {
        self.points.clear();
        self.colors.clear();
    }

    /// Concatenate two clouds into a new one, this cloud's points first.
    ///
    /// Colors are kept only when both inputs carry them; otherwise the
    /// result is uncolored.
    pub fn concat(&self, other: &PointCloud) -> PointCloud {
        let mut points = Vec::with_capacity(self.len() + other.len());
        points.extend_from_slice(&self.points);
        points.extend_from_slice(&other.points);

        let colors = if self.has_colors() && other.has_colors() {
            let mut colors = Vec::with_capacity(self.len() + other.len());
            colors.extend_from_slice(&self.colors);
            colors.extend_from_slice(&other.colors);
            colors
        } else {
            Vec::new()
        };

        PointCloud { points, colors }
    }
}

impl Default for PointCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<usize> for PointCloud {
    type Output = Point3d;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IndexMut<usize> for PointCloud {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3d;
    type IntoIter = std::slice::Iter<'a, Point3d>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl Extend<Point3d> for PointCloud {
    fn extend<I: IntoIterator<Item = Point3d>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl FromIterator<Point3d> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3d>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
            colors: Vec::new(),
        }
    }
}
