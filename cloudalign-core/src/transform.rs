//! Homogeneous 4x4 transformations

use crate::point::{Point3d, Vector3d};
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// A 3D transformation in homogeneous coordinates.
///
/// Transforms produced by [`Transform3D::from_euler_translation`] are rigid
/// (orthonormal rotation block, translation column, bottom row `0 0 0 1`).
/// [`Transform3D::from_rows`] accepts arbitrary coefficients and makes no
/// such guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f64>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3d) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Build a rigid transformation from three rotation angles (radians)
    /// and three translation offsets.
    ///
    /// The result is `Rx * Ry * Rz * T`: the translation is applied to a
    /// point first, then the Z, Y and X rotations, each about the axes of
    /// the unrotated frame. Slider gestures compose predictably only under
    /// this exact ordering, so it must not change.
    #[rustfmt::skip]
    pub fn from_euler_translation(
        x_rotation: f64,
        y_rotation: f64,
        z_rotation: f64,
        x_translation: f64,
        y_translation: f64,
        z_translation: f64,
    ) -> Self {
        let (srx, crx) = x_rotation.sin_cos();
        let rx = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, crx, -srx, 0.0,
            0.0, srx, crx, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        let (sry, cry) = y_rotation.sin_cos();
        let ry = Matrix4::new(
            cry, 0.0, -sry, 0.0,
            0.0, 1.0, 0.0, 0.0,
            sry, 0.0, cry, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        let (srz, crz) = z_rotation.sin_cos();
        let rz = Matrix4::new(
            crz, -srz, 0.0, 0.0,
            srz, crz, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        let t = Matrix4::new(
            1.0, 0.0, 0.0, x_translation,
            0.0, 1.0, 0.0, y_translation,
            0.0, 0.0, 1.0, z_translation,
            0.0, 0.0, 0.0, 1.0,
        );

        Self {
            matrix: rx * ry * rz * t,
        }
    }

    /// Build a transformation from the twelve coefficients of the top
    /// three rows, in row-major order. The bottom row is fixed to
    /// `0 0 0 1`.
    ///
    /// The coefficients are applied verbatim; a non-invertible or
    /// non-rigid matrix is accepted as-is.
    #[rustfmt::skip]
    pub fn from_rows(rows: [f64; 12]) -> Self {
        Self {
            matrix: Matrix4::new(
                rows[0], rows[1], rows[2], rows[3],
                rows[4], rows[5], rows[6], rows[7],
                rows[8], rows[9], rows[10], rows[11],
                0.0, 0.0, 0.0, 1.0,
            ),
        }
    }

    /// Apply the transformation to a point.
    ///
    /// Computes `M * [p; 1]` and takes the first three coordinates.
    pub fn transform_point(&self, point: &Point3d) -> Point3d {
        let h = self.matrix * point.to_homogeneous();
        Point3d::new(h.x, h.y, h.z)
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Check if this is approximately the identity transformation
    pub fn is_identity(&self, epsilon: f64) -> bool {
        (self.matrix - Matrix4::identity()).norm() < epsilon
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f64>> for Transform3D {
    fn from(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }
}
