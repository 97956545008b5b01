//! Recovering a transformation matrix from an opaque point mover

use crate::icp::{Icp, PointAligner};
use cloudalign_core::{Matrix4, Point3d, Transform3D};

/// Correspondence cutoff used when registering whole entries, matching
/// the scale of the scans this tool is used on.
const MAX_CORRESPONDENCE_DISTANCE: f64 = 250.0;

/// Probe points appended to the source: the three unit basis vectors and
/// the origin. Their post-alignment positions encode the transformation
/// the aligner applied.
fn probe_points() -> [Point3d; 4] {
    [
        Point3d::new(1.0, 0.0, 0.0),
        Point3d::new(0.0, 1.0, 0.0),
        Point3d::new(0.0, 0.0, 1.0),
        Point3d::new(0.0, 0.0, 0.0),
    ]
}

/// Run `aligner` on a copy of `source` and reconstruct the 4x4 matrix it
/// applied.
///
/// The aligner only moves points; it reports no matrix. Appending the
/// probe points and reading them back afterwards recovers it: the
/// displaced origin probe is the translation column, and subtracting it
/// from each displaced basis probe cancels the shared translation,
/// leaving the rotation columns. The probes take part in the alignment
/// like any other source point.
pub fn recover_transform(
    aligner: &dyn PointAligner,
    source: &[Point3d],
    target: &[Point3d],
) -> Transform3D {
    let probes = probe_points();
    let mut points = Vec::with_capacity(source.len() + probes.len());
    points.extend_from_slice(source);
    points.extend_from_slice(&probes);

    aligner.align(&mut points, target);

    let n = points.len();
    let origin = points[n - 1];
    let x = points[n - 4] - origin;
    let y = points[n - 3] - origin;
    let z = points[n - 2] - origin;

    let mut matrix = Matrix4::identity();
    matrix.fixed_view_mut::<3, 1>(0, 0).copy_from(&x);
    matrix.fixed_view_mut::<3, 1>(0, 1).copy_from(&y);
    matrix.fixed_view_mut::<3, 1>(0, 2).copy_from(&z);
    matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(&origin.coords);

    Transform3D::from(matrix)
}

/// Align `source` onto `target` with default ICP settings and return the
/// equivalent transformation.
///
/// Callers are responsible for ensuring both inputs are meaningful (at
/// least two loaded entries); a poorly converging registration yields the
/// algorithm's natural output without further checks.
pub fn register(source: &[Point3d], target: &[Point3d]) -> Transform3D {
    let icp = Icp {
        max_correspondence_distance: Some(MAX_CORRESPONDENCE_DISTANCE),
        ..Icp::default()
    };
    recover_transform(&icp, source, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cloudalign_core::Vector3d;

    /// Applies a fixed transformation to every point, reporting nothing.
    struct FixedMover(Transform3D);

    impl PointAligner for FixedMover {
        fn align(&self, points: &mut [Point3d], _target: &[Point3d]) {
            for p in points.iter_mut() {
                *p = self.0.transform_point(p);
            }
        }
    }

    fn grid() -> Vec<Point3d> {
        let mut points = Vec::new();
        for x in -2..=2 {
            for y in -2..=2 {
                for z in 0..=1 {
                    points.push(Point3d::new(x as f64, y as f64, z as f64));
                }
            }
        }
        points
    }

    #[test]
    fn test_probe_recovery_reproduces_a_known_matrix() {
        let known = Transform3D::from_euler_translation(0.7, -0.3, 1.9, 4.0, -2.5, 11.0);
        let mover = FixedMover(known);

        let recovered = recover_transform(&mover, &grid(), &[]);
        assert_relative_eq!(recovered.matrix, known.matrix, epsilon = 1e-12);
    }

    #[test]
    fn test_probe_recovery_of_identity_mover() {
        struct Noop;
        impl PointAligner for Noop {
            fn align(&self, _points: &mut [Point3d], _target: &[Point3d]) {}
        }

        let recovered = recover_transform(&Noop, &grid(), &[]);
        assert!(recovered.is_identity(1e-15));
    }

    #[test]
    fn test_register_identical_sets_yields_identity() {
        let points = grid();
        let recovered = register(&points, &points);
        assert!(
            recovered.is_identity(1e-6),
            "expected identity, got {:?}",
            recovered.matrix
        );
    }

    #[test]
    fn test_register_recovers_translation() {
        let source = grid();
        let shift = Vector3d::new(0.4, 0.0, 0.0);
        let target: Vec<Point3d> = source.iter().map(|p| p + shift).collect();

        let recovered = register(&source, &target);
        let expected = Transform3D::translation(shift);
        assert_relative_eq!(recovered.matrix, expected.matrix, epsilon = 1e-6);
    }

    #[test]
    fn test_register_recovers_small_rotation() {
        let source = grid();
        let rotation = Transform3D::from_euler_translation(0.0, 0.0, 0.1, 0.0, 0.0, 0.0);
        let target: Vec<Point3d> = source.iter().map(|p| rotation.transform_point(p)).collect();

        let recovered = register(&source, &target);
        assert_relative_eq!(recovered.matrix, rotation.matrix, epsilon = 1e-6);
    }
}
