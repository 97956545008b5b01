//! # cloudalign I/O
//!
//! Point cloud loading with decode-progress reporting, and the verbatim
//! matrix-report writer.

pub mod ply;

use cloudalign_core::{Error, PointCloud, Result};
use std::path::Path;

/// Auto-detect format and read a point cloud.
///
/// `progress` receives fractions in `0.0..=1.0` zero or more times while
/// the file is decoded. On failure no cloud exists; the error carries the
/// cause for the caller to surface.
pub fn load_point_cloud<P, F>(path: P, progress: F) -> Result<PointCloud>
where
    P: AsRef<Path>,
    F: FnMut(f64),
{
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("ply") => ply::read_point_cloud(path, progress),
        _ => Err(Error::UnsupportedFormat(format!(
            "unsupported point cloud format: {:?}",
            path.extension()
        ))),
    }
}

/// Write a matrix report verbatim as UTF-8 text.
pub fn write_matrix_report<P: AsRef<Path>>(path: P, report: &str) -> Result<()> {
    std::fs::write(path, report)?;
    Ok(())
}
