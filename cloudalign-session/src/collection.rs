//! The set of loaded entries and the working-copy editing discipline

use crate::entry::CloudEntry;
use cloudalign_core::{Error, Result};

/// Owns the canonical [`CloudEntry`] instances of a session.
///
/// Edits never touch a canonical entry in place: callers [`checkout`] an
/// aliasing working copy, mutate it, and [`commit`] it back, replacing the
/// canonical entry wholesale. The working copy shares the canonical
/// entry's id, so a renderer keyed on ids swaps the geometry rather than
/// duplicating it.
///
/// [`checkout`]: EntryCollection::checkout
/// [`commit`]: EntryCollection::commit
#[derive(Debug, Default)]
pub struct EntryCollection {
    entries: Vec<CloudEntry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add an entry, returning its index.
    pub fn add(&mut self, entry: CloudEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Remove and return the entry at `index`, or `None` if out of range.
    /// Removal has no further side effects.
    pub fn remove(&mut self, index: usize) -> Option<CloudEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&CloudEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<CloudEntry> {
        self.entries.iter()
    }

    /// Whether `name` is already used by an entry other than the one at
    /// `exclude`.
    pub fn is_name_taken(&self, name: &str, exclude: Option<usize>) -> bool {
        self.entries
            .iter()
            .enumerate()
            .any(|(i, e)| Some(i) != exclude && e.name == name)
    }

    /// Rename the entry at `index`, rejecting names already used by other
    /// entries. Renaming an entry to its own name is allowed.
    pub fn rename(&mut self, index: usize, name: &str) -> Result<()> {
        if self.is_name_taken(name, Some(index)) {
            return Err(Error::InvalidData(format!(
                "an entry named '{name}' already exists"
            )));
        }
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| Error::InvalidData(format!("no entry at index {index}")))?;
        entry.name = name.to_string();
        Ok(())
    }

    /// An aliasing working copy of the entry at `index`, for editing.
    pub fn checkout(&self, index: usize) -> Option<CloudEntry> {
        self.entries.get(index).cloned()
    }

    /// Write a working copy back, replacing the canonical entry at
    /// `index`.
    pub fn commit(&mut self, index: usize, entry: CloudEntry) -> Result<()> {
        let slot = self
            .entries
            .get_mut(index)
            .ok_or_else(|| Error::InvalidData(format!("no entry at index {index}")))?;
        *slot = entry;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a CloudEntry;
    type IntoIter = std::slice::Iter<'a, CloudEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudalign_core::{Point3d, PointCloud, Transform3D, Vector3d};

    fn entry_named(name: &str) -> CloudEntry {
        let mut entry =
            CloudEntry::from_cloud(PointCloud::from_points(vec![Point3d::new(0.0, 0.0, 0.0)]));
        entry.name = name.to_string();
        entry
    }

    #[test]
    fn test_name_checks() {
        let mut collection = EntryCollection::new();
        collection.add(entry_named("scan_a"));
        collection.add(entry_named("scan_b"));

        assert!(collection.is_name_taken("scan_a", None));
        assert!(!collection.is_name_taken("scan_a", Some(0)));
        assert!(!collection.is_name_taken("scan_c", None));

        assert!(collection.rename(1, "scan_a").is_err());
        assert!(collection.rename(1, "scan_b").is_ok());
        assert!(collection.rename(1, "scan_c").is_ok());
        assert_eq!(collection.get(1).unwrap().name, "scan_c");
    }

    #[test]
    fn test_checkout_commit_replaces_canonical_entry() {
        let mut collection = EntryCollection::new();
        let index = collection.add(entry_named("scan_a"));
        let id = collection.get(index).unwrap().id();

        let mut working = collection.checkout(index).unwrap();
        assert_eq!(working.id(), id);

        working.push_transform(Transform3D::translation(Vector3d::new(1.0, 0.0, 0.0)));
        // The canonical entry is untouched until commit.
        assert!(collection.get(index).unwrap().transform_stack().is_empty());

        collection.commit(index, working).unwrap();
        let committed = collection.get(index).unwrap();
        assert_eq!(committed.id(), id);
        assert_eq!(committed.transform_stack().len(), 1);
        assert_eq!(committed.current().points[0], Point3d::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut collection = EntryCollection::new();
        collection.add(entry_named("scan_a"));

        assert!(collection.remove(5).is_none());
        let removed = collection.remove(0).unwrap();
        assert_eq!(removed.name, "scan_a");
        assert!(collection.is_empty());
    }
}
