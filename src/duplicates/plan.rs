//! Deletion plans built from hash groups.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::groups::HashGroups;

/// One file scheduled for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedDeletion {
    /// Hash of the group the file belongs to
    pub hash: String,
    /// Path relative to the bag root
    pub path: String,
}

/// Ordered list of duplicates to remove from a bag.
///
/// Order is group first-seen order, then manifest line order within each
/// group. Paths are relative to [`DeletionPlan::bag_root`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionPlan {
    /// Root directory every path is resolved against
    pub bag_root: PathBuf,
    /// Files to delete, in order
    pub deletions: Vec<PlannedDeletion>,
}

impl DeletionPlan {
    /// Build a plan from the duplicates in `groups`.
    ///
    /// # Example
    ///
    /// ```
    /// use bagdupe::duplicates::{compute_local_groups, DeletionPlan};
    /// use bagdupe::manifest::ManifestEntry;
    /// use std::path::Path;
    ///
    /// let groups = compute_local_groups(&[
    ///     ManifestEntry::new("abc123", "data/a.txt", 1),
    ///     ManifestEntry::new("abc123", "data/c.txt", 2),
    ///     ManifestEntry::new("abc123", "data/d.txt", 3),
    /// ]);
    /// let plan = DeletionPlan::from_groups(Path::new("bag"), &groups);
    /// assert_eq!(plan.paths().collect::<Vec<_>>(), vec!["data/c.txt", "data/d.txt"]);
    /// ```
    #[must_use]
    pub fn from_groups(bag_root: &Path, groups: &HashGroups) -> Self {
        let deletions = groups
            .duplicates()
            .map(|(group, member)| PlannedDeletion {
                hash: group.hash.clone(),
                path: member.path.clone(),
            })
            .collect();

        Self {
            bag_root: bag_root.to_path_buf(),
            deletions,
        }
    }

    /// Number of planned deletions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deletions.len()
    }

    /// Check if there is nothing to delete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deletions.is_empty()
    }

    /// Relative paths in deletion order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.deletions.iter().map(|d| d.path.as_str())
    }

    /// Absolute target for a planned deletion.
    #[must_use]
    pub fn target(&self, deletion: &PlannedDeletion) -> PathBuf {
        self.bag_root.join(&deletion.path)
    }
}
