//! Cloud entries: a loaded point cloud plus its undoable transform stack

use cloudalign_core::{PointCloud, Transform3D};
use rayon::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Clouds with at least this many points are recomputed in parallel.
pub const PARALLEL_THRESHOLD: usize = 20_000;

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A process-wide unique token identifying an entry's geometry in the
/// rendering layer. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u64);

impl EntryId {
    fn next() -> Self {
        EntryId(ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cloud_{}", self.0)
    }
}

/// A loaded point cloud together with the transformations applied to it.
///
/// `base` holds the original geometry and is never mutated. `current` is a
/// cache: it always equals `base` with [`CloudEntry::composed_matrix`]
/// applied to every point, and is recomputed whenever the stack changes.
///
/// Cloning an entry keeps its [`EntryId`]; this is the safe-aliasing copy
/// used for working copies. Use [`CloudEntry::duplicate`] to create a
/// distinct entry with a fresh id.
#[derive(Debug, Clone)]
pub struct CloudEntry {
    base: PointCloud,
    current: PointCloud,
    transforms: Vec<Transform3D>,
    id: EntryId,
    /// User-editable display label. Uniqueness across a collection is the
    /// collection's concern, not the entry's.
    pub name: String,
    pub(crate) origins: Vec<(String, Transform3D)>,
}

impl CloudEntry {
    /// Wrap a point cloud in a fresh entry with an empty transform stack.
    pub fn from_cloud(cloud: PointCloud) -> Self {
        let id = EntryId::next();
        Self {
            current: cloud.clone(),
            base: cloud,
            transforms: Vec::new(),
            name: id.to_string(),
            id,
            origins: Vec::new(),
        }
    }

    pub(crate) fn from_merge(cloud: PointCloud, origins: Vec<(String, Transform3D)>) -> Self {
        let mut entry = Self::from_cloud(cloud);
        entry.origins = origins;
        entry
    }

    /// A distinct copy of this entry under a new identity token.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = EntryId::next();
        copy
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The original geometry, as loaded.
    pub fn base(&self) -> &PointCloud {
        &self.base
    }

    /// The geometry with the current transform stack applied.
    pub fn current(&self) -> &PointCloud {
        &self.current
    }

    /// The applied transformations, oldest first.
    pub fn transform_stack(&self) -> &[Transform3D] {
        &self.transforms
    }

    /// Source names and matrices this entry was merged from. Empty for
    /// entries loaded directly from a file.
    pub fn origins(&self) -> &[(String, Transform3D)] {
        &self.origins
    }

    /// The product of the transform stack.
    ///
    /// Transformations that get applied to a point first are on the right,
    /// so for a stack `[T1, .., Tn]` this is `Tn * .. * T1`.
    pub fn composed_matrix(&self) -> Transform3D {
        let mut result = Transform3D::identity();
        for t in &self.transforms {
            result = *t * result;
        }
        result
    }

    /// Append a transformation to the stack and recompute the current
    /// geometry.
    pub fn push_transform(&mut self, transform: Transform3D) {
        self.transforms.push(transform);
        self.recompute();
    }

    /// Remove and return the most recently applied transformation,
    /// recomputing the current geometry. Returns `None` and leaves the
    /// geometry untouched when the stack is empty.
    pub fn pop_transform(&mut self) -> Option<Transform3D> {
        let transform = self.transforms.pop()?;
        self.recompute();
        Some(transform)
    }

    /// Rebuild `current` from `base` and the composed matrix.
    fn recompute(&mut self) {
        let m = self.composed_matrix();

        if self.base.len() < PARALLEL_THRESHOLD {
            for (out, p) in self.current.points.iter_mut().zip(&self.base.points) {
                *out = m.transform_point(p);
            }
        } else {
            // One contiguous slice per worker thread; reads and writes are
            // disjoint, so the chunks need no synchronization beyond the join.
            let chunk = self
                .base
                .len()
                .div_ceil(rayon::current_num_threads().max(1));
            self.current
                .points
                .par_chunks_mut(chunk)
                .zip(self.base.points.par_chunks(chunk))
                .for_each(|(out, src)| {
                    for (o, p) in out.iter_mut().zip(src) {
                        *o = m.transform_point(p);
                    }
                });
        }
    }
}
