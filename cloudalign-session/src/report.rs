//! Plain-text dump of an entry's transformation matrices

use crate::entry::CloudEntry;
use cloudalign_core::Matrix4;

/// Serialize the entry's (name, matrix) pairs as text.
///
/// An entry without origins produces a single block: its name followed by
/// the composed matrix. A merge result produces one block per origin, each
/// matrix pre-composed with the entry's own transform so it maps all the
/// way back to that source's original frame. Blocks are separated by a
/// blank line; rows are whitespace-separated, row-major.
pub fn matrix_report(entry: &CloudEntry) -> String {
    let composed = entry.composed_matrix();
    let mut out = String::new();

    if entry.origins().is_empty() {
        out.push_str(&entry.name);
        out.push('\n');
        write_matrix(&mut out, &composed.matrix);
    } else {
        for (name, matrix) in entry.origins() {
            out.push_str(name);
            out.push('\n');
            write_matrix(&mut out, &(composed * *matrix).matrix);
            out.push('\n');
        }
    }

    out
}

fn write_matrix(out: &mut String, m: &Matrix4<f64>) {
    for row in 0..4 {
        out.push_str(&format!(
            "{} {} {} {}\n",
            m[(row, 0)],
            m[(row, 1)],
            m[(row, 2)],
            m[(row, 3)]
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use cloudalign_core::{Point3d, PointCloud, Transform3D, Vector3d};

    fn entry(name: &str) -> CloudEntry {
        let mut entry =
            CloudEntry::from_cloud(PointCloud::from_points(vec![Point3d::new(0.0, 0.0, 0.0)]));
        entry.name = name.to_string();
        entry
    }

    #[test]
    fn test_leaf_entry_report() {
        let mut e = entry("scan_a");
        e.push_transform(Transform3D::translation(Vector3d::new(5.0, 0.0, 0.0)));

        let report = matrix_report(&e);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "scan_a");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "1 0 0 5");
        assert_eq!(lines[4], "0 0 0 1");
    }

    #[test]
    fn test_merged_entry_report_composes_origins() {
        let mut a = entry("a");
        a.push_transform(Transform3D::translation(Vector3d::new(1.0, 0.0, 0.0)));
        let b = entry("b");

        let mut merged = merge(&a, &b);
        merged.push_transform(Transform3D::translation(Vector3d::new(0.0, 2.0, 0.0)));

        let report = matrix_report(&merged);
        let blocks: Vec<&str> = report.split("\n\n").filter(|b| !b.is_empty()).collect();
        assert_eq!(blocks.len(), 2);

        // Origin 'a' carries both its own translation and the merged
        // entry's transform.
        let a_lines: Vec<&str> = blocks[0].lines().collect();
        assert_eq!(a_lines[0], "a");
        assert_eq!(a_lines[1], "1 0 0 1");
        assert_eq!(a_lines[2], "0 1 0 2");

        let b_lines: Vec<&str> = blocks[1].lines().collect();
        assert_eq!(b_lines[0], "b");
        assert_eq!(b_lines[1], "1 0 0 0");
        assert_eq!(b_lines[2], "0 1 0 2");
    }
}
