//! Point-to-point ICP as an opaque point mover

use cloudalign_core::{Error, Point3d, Result};
use nalgebra::{Isometry3, Matrix3, Translation3, UnitQuaternion};
use rayon::prelude::*;

/// A registration routine whose only observable effect is displacing a
/// mutable set of points toward rigid alignment with a target set.
///
/// Implementations report nothing about the transformation they applied;
/// callers that need the matrix recover it through
/// [`recover_transform`](crate::recover_transform).
pub trait PointAligner {
    fn align(&self, points: &mut [Point3d], target: &[Point3d]);
}

/// Iterative closest point alignment.
#[derive(Debug, Clone, Copy)]
pub struct Icp {
    /// Iteration cap.
    pub max_iterations: usize,
    /// Stop once the mean squared error changes by less than this between
    /// iterations.
    pub convergence_threshold: f64,
    /// Correspondences farther apart than this are discarded.
    pub max_correspondence_distance: Option<f64>,
}

impl Default for Icp {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            convergence_threshold: 1e-6,
            max_correspondence_distance: None,
        }
    }
}

impl PointAligner for Icp {
    fn align(&self, points: &mut [Point3d], target: &[Point3d]) {
        if points.is_empty() || target.is_empty() {
            return;
        }

        let mut previous_mse = f64::INFINITY;

        for iteration in 0..self.max_iterations {
            let correspondences =
                find_correspondences(points, target, self.max_correspondence_distance);

            let mut valid_source = Vec::new();
            let mut valid_target = Vec::new();
            for (src_idx, correspondence) in correspondences.iter().enumerate() {
                if let Some((tgt_idx, _)) = correspondence {
                    valid_source.push(points[src_idx]);
                    valid_target.push(target[*tgt_idx]);
                }
            }

            if valid_source.len() < 3 {
                log::debug!("icp: only {} correspondences, stopping", valid_source.len());
                return;
            }

            let delta = match compute_alignment(&valid_source, &valid_target) {
                Ok(delta) => delta,
                Err(_) => return,
            };

            for point in points.iter_mut() {
                *point = delta * *point;
            }

            let mse = valid_source
                .iter()
                .zip(&valid_target)
                .map(|(src, tgt)| (delta * src - tgt).norm_squared())
                .sum::<f64>()
                / valid_source.len() as f64;

            if (previous_mse - mse).abs() < self.convergence_threshold {
                log::debug!("icp: converged after {} iterations, mse {mse:e}", iteration + 1);
                return;
            }
            previous_mse = mse;
        }

        log::debug!("icp: iteration cap reached, mse {previous_mse:e}");
    }
}

/// Find the closest target point for each source point.
fn find_correspondences(
    source: &[Point3d],
    target: &[Point3d],
    max_distance: Option<f64>,
) -> Vec<Option<(usize, f64)>> {
    source
        .par_iter()
        .map(|source_point| {
            let mut best_distance = f64::INFINITY;
            let mut best_idx = None;

            for (target_idx, target_point) in target.iter().enumerate() {
                let distance = (source_point - target_point).norm();
                if distance < best_distance {
                    best_distance = distance;
                    best_idx = Some(target_idx);
                }
            }

            if let Some(max_dist) = max_distance {
                if best_distance > max_dist {
                    return None;
                }
            }

            best_idx.map(|idx| (idx, best_distance))
        })
        .collect()
}

/// Compute the rigid transformation minimizing the squared distance
/// between corresponding points, via SVD of the covariance matrix.
fn compute_alignment(source: &[Point3d], target: &[Point3d]) -> Result<Isometry3<f64>> {
    if source.len() != target.len() || source.is_empty() {
        return Err(Error::InvalidData(
            "point correspondence mismatch".to_string(),
        ));
    }

    let n = source.len() as f64;
    let source_centroid = source.iter().fold(Point3d::origin(), |acc, p| acc + p.coords) / n;
    let target_centroid = target.iter().fold(Point3d::origin(), |acc, p| acc + p.coords) / n;

    let mut h = Matrix3::zeros();
    for (src, tgt) in source.iter().zip(target.iter()) {
        let p = src - source_centroid;
        let q = tgt - target_centroid;
        h += p * q.transpose();
    }

    let svd = h.svd(true, true);
    let u = svd
        .u
        .ok_or_else(|| Error::Algorithm("SVD U matrix not available".to_string()))?;
    let v_t = svd
        .v_t
        .ok_or_else(|| Error::Algorithm("SVD V^T matrix not available".to_string()))?;

    let mut r = v_t.transpose() * u.transpose();

    // Flip the smallest singular direction if the solution is a reflection.
    if r.determinant() < 0.0 {
        let mut v_t_corrected = v_t;
        v_t_corrected.set_row(2, &(-v_t.row(2)));
        r = v_t_corrected.transpose() * u.transpose();
    }

    let rotation = UnitQuaternion::from_matrix(&r);
    let translation = target_centroid - rotation * source_centroid;

    Ok(Isometry3::from_parts(Translation3::from(translation), rotation))
}
