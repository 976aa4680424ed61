//! Plain-text report of a deletion plan.
//!
//! One line per planned deletion, `delete <relative_path>`, in plan order.
//! An empty plan produces no output at all.

use std::io::Write;

use crate::duplicates::{DeletionPlan, HashGroups, Origin};

/// Write the `delete <path>` report for a plan.
///
/// # Errors
///
/// Returns an error if writing fails.
///
/// # Example
///
/// ```
/// use bagdupe::duplicates::{compute_local_groups, DeletionPlan};
/// use bagdupe::manifest::ManifestEntry;
/// use bagdupe::output::text::write_report;
/// use std::path::Path;
///
/// let groups = compute_local_groups(&[
///     ManifestEntry::new("abc123", "data/a.txt", 1),
///     ManifestEntry::new("abc123", "data/c.txt", 2),
/// ]);
/// let plan = DeletionPlan::from_groups(Path::new("bag"), &groups);
///
/// let mut out = Vec::new();
/// write_report(&plan, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "delete data/c.txt\n");
/// ```
pub fn write_report<W: Write>(plan: &DeletionPlan, writer: &mut W) -> std::io::Result<()> {
    for path in plan.paths() {
        writeln!(writer, "delete {}", path)?;
    }
    writer.flush()
}

/// Write a human-readable listing of groups that have duplicates.
///
/// ```text
/// abc123
///   keep    data/a.txt
///   delete  data/c.txt
/// ```
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_groups<W: Write>(groups: &HashGroups, writer: &mut W) -> std::io::Result<()> {
    for group in groups.with_duplicates() {
        writeln!(writer, "{}", group.hash)?;
        for (i, member) in group.members.iter().enumerate() {
            let label = match (i, member.origin) {
                (0, Origin::Local) => "keep",
                (0, Origin::Remote) => "remote",
                (_, Origin::Remote) => "ignored",
                (_, Origin::Local) => "delete",
            };
            writeln!(writer, "  {:<8}{}", label, member.path)?;
        }
    }
    writer.flush()
}
