//! Merging entries while preserving the provenance of their sources

use crate::entry::CloudEntry;
use cloudalign_core::Transform3D;

/// Merge two entries into a new one.
///
/// The merged cloud is the concatenation of `a`'s current points followed
/// by `b`'s; both inputs' transforms are baked into the raw coordinates,
/// so the new entry starts with an empty stack. Each origin records the
/// matrix mapping the merged frame back to that source's original frame:
/// a leaf source contributes `(name, composed)`, a source that is itself a
/// merge result contributes every nested origin re-expressed through its
/// own composed matrix. This nests to arbitrary merge depth.
pub fn merge(a: &CloudEntry, b: &CloudEntry) -> CloudEntry {
    let cloud = a.current().concat(b.current());

    let mut origins = Vec::new();
    collect_origins(&mut origins, a);
    collect_origins(&mut origins, b);

    log::debug!(
        "merged '{}' and '{}' into {} points, {} origins",
        a.name,
        b.name,
        cloud.len(),
        origins.len()
    );

    CloudEntry::from_merge(cloud, origins)
}

fn collect_origins(out: &mut Vec<(String, Transform3D)>, source: &CloudEntry) {
    let composed = source.composed_matrix();

    if source.origins().is_empty() {
        out.push((source.name.clone(), composed));
    } else {
        for (name, matrix) in source.origins() {
            out.push((name.clone(), composed * *matrix));
        }
    }
}
