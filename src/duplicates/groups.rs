//! Hash grouping and canonical selection.
//!
//! # Overview
//!
//! Manifest entries are grouped by their hash string, byte-for-byte. Groups
//! keep the order in which their hash was first seen, and members keep
//! manifest line order. The first member of a group is canonical; every
//! other local member is a duplicate.
//!
//! A remote manifest can then be merged in with [`merge_remote`]. A remote
//! entry whose hash matches a local group is put in front of that group,
//! which demotes all local members, including a member that used to be the
//! only one. Remote hashes with no local group are ignored.
//!
//! # Example
//!
//! ```
//! use bagdupe::duplicates::{compute_local_groups, merge_remote};
//! use bagdupe::manifest::ManifestEntry;
//!
//! let local = vec![
//!     ManifestEntry::new("h1", "data/a.txt", 1),
//!     ManifestEntry::new("h1", "data/b.txt", 2),
//!     ManifestEntry::new("h2", "data/c.txt", 3),
//! ];
//! let mut groups = compute_local_groups(&local);
//! let duplicates: Vec<_> = groups.duplicates().map(|(_, m)| m.path.as_str()).collect();
//! assert_eq!(duplicates, vec!["data/b.txt"]);
//!
//! let remote = vec![ManifestEntry::new("h2", "store/c.txt", 1)];
//! merge_remote(&mut groups, &remote);
//! let duplicates: Vec<_> = groups.duplicates().map(|(_, m)| m.path.as_str()).collect();
//! assert_eq!(duplicates, vec!["data/b.txt", "data/c.txt"]);
//! ```

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::manifest::ManifestEntry;

/// Where a group member came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The bag's own manifest; the file lives under the bag root
    Local,
    /// The remote manifest; never deleted
    Remote,
}

/// One path in a hash group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupMember {
    /// Manifest-relative path
    pub path: String,
    /// Which manifest listed it
    pub origin: Origin,
}

impl GroupMember {
    /// Create a local member.
    #[must_use]
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            origin: Origin::Local,
        }
    }

    /// Create a remote member.
    #[must_use]
    pub fn remote(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            origin: Origin::Remote,
        }
    }

    /// Whether this member lives in the local bag.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.origin == Origin::Local
    }
}

/// All members sharing one hash, canonical first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashGroup {
    /// Hash string shared by all members
    pub hash: String,
    /// Members, canonical first
    pub members: VecDeque<GroupMember>,
}

impl HashGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            members: VecDeque::new(),
        }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The retained member, if any.
    #[must_use]
    pub fn canonical(&self) -> Option<&GroupMember> {
        self.members.front()
    }

    /// Whether a remote path was merged into this group.
    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.members.iter().any(|m| !m.is_local())
    }

    /// Local members after the canonical one, in order.
    ///
    /// Remote members are skipped even when they are not canonical, since
    /// their files do not live in the bag.
    pub fn duplicates(&self) -> impl Iterator<Item = &GroupMember> {
        self.members.iter().skip(1).filter(|m| m.is_local())
    }

    /// Number of local members scheduled for deletion.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates().count()
    }

    /// Whether any member of this group would be deleted.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.duplicates().next().is_some()
    }

    fn push_local(&mut self, path: &str) -> bool {
        if self.members.iter().any(|m| m.is_local() && m.path == path) {
            return false;
        }
        self.members.push_back(GroupMember::local(path));
        true
    }

    fn prepend_remote(&mut self, path: &str) {
        self.members.push_front(GroupMember::remote(path));
    }
}

/// Hash groups in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct HashGroups {
    groups: Vec<HashGroup>,
    index: HashMap<String, usize>,
}

impl HashGroups {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct hashes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up the group for a hash.
    #[must_use]
    pub fn get(&self, hash: &str) -> Option<&HashGroup> {
        self.index.get(hash).map(|&i| &self.groups[i])
    }

    /// Iterate groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &HashGroup> {
        self.groups.iter()
    }

    /// Groups that have at least one member to delete.
    pub fn with_duplicates(&self) -> impl Iterator<Item = &HashGroup> {
        self.groups.iter().filter(|g| g.has_duplicates())
    }

    /// Every duplicate in deletion order, paired with its group.
    pub fn duplicates(&self) -> impl Iterator<Item = (&HashGroup, &GroupMember)> {
        self.groups
            .iter()
            .flat_map(|g| g.duplicates().map(move |m| (g, m)))
    }

    /// Add a local entry. Returns `false` if the exact `(hash, path)` pair
    /// was already present.
    pub fn insert_local(&mut self, hash: &str, path: &str) -> bool {
        let index = match self.index.get(hash) {
            Some(&i) => i,
            None => {
                self.groups.push(HashGroup::new(hash));
                self.index.insert(hash.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[index].push_local(path)
    }

    fn get_mut(&mut self, hash: &str) -> Option<&mut HashGroup> {
        match self.index.get(hash) {
            Some(&i) => Some(&mut self.groups[i]),
            None => None,
        }
    }
}

impl<'a> IntoIterator for &'a HashGroups {
    type Item = &'a HashGroup;
    type IntoIter = std::slice::Iter<'a, HashGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group local manifest entries by hash.
///
/// Exact repeats of a `(hash, path)` pair are dropped with a warning so a
/// file is never planned for deletion as a copy of itself.
#[must_use]
pub fn compute_local_groups(entries: &[ManifestEntry]) -> HashGroups {
    let mut groups = HashGroups::new();

    for entry in entries {
        if !groups.insert_local(&entry.hash, &entry.path) {
            log::warn!(
                "Ignoring repeated manifest entry on line {}: {} {}",
                entry.line,
                entry.hash,
                entry.path
            );
        }
    }

    log::debug!(
        "Grouped {} entries into {} hash groups",
        entries.len(),
        groups.len()
    );

    groups
}

/// Statistics from merging a remote manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Remote entries considered
    pub remote_entries: usize,
    /// Remote entries whose hash matched a local group
    pub matched: usize,
    /// Remote entries with no local counterpart
    pub ignored: usize,
    /// Local groups of one member that became deletable
    pub demoted_unique: usize,
}

/// Merge remote entries into local groups.
///
/// Each matching remote entry is prepended unconditionally, so when the
/// remote manifest repeats a hash the last one processed ends up canonical.
pub fn merge_remote(groups: &mut HashGroups, remote: &[ManifestEntry]) -> MergeStats {
    let mut stats = MergeStats {
        remote_entries: remote.len(),
        ..MergeStats::default()
    };

    for entry in remote {
        match groups.get_mut(&entry.hash) {
            Some(group) => {
                if !group.has_remote() && group.len() == 1 {
                    stats.demoted_unique += 1;
                }
                log::trace!(
                    "Remote {} takes precedence for hash {}",
                    entry.path,
                    entry.hash
                );
                group.prepend_remote(&entry.path);
                stats.matched += 1;
            }
            None => stats.ignored += 1,
        }
    }

    log::debug!(
        "Remote merge: {} matched, {} ignored, {} previously unique file(s) demoted",
        stats.matched,
        stats.ignored,
        stats.demoted_unique
    );

    stats
}
