//! JSON output formatter for deletion plans.
//!
//! Provides machine-readable output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "bag_root": "bags/photos",
//!   "manifest": "bags/photos/manifest-md5.txt",
//!   "remote_manifest": null,
//!   "groups": [
//!     {
//!       "hash": "abc123",
//!       "members": [
//!         { "path": "data/a.txt", "origin": "local" },
//!         { "path": "data/c.txt", "origin": "local" }
//!       ]
//!     }
//!   ],
//!   "deletions": [
//!     { "hash": "abc123", "path": "data/c.txt" }
//!   ],
//!   "summary": {
//!     "manifest_entries": 3,
//!     "malformed_lines": 0,
//!     "hash_groups": 2,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "remote_entries": 0,
//!     "remote_matched": 0,
//!     "remote_ignored": 0,
//!     "demoted_unique": 0,
//!     "plan_duration_ms": 0
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{FinderResult, HashGroup, PlanSummary, PlannedDeletion};

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Entries parsed from the payload manifest
    pub manifest_entries: usize,
    /// Malformed lines skipped
    pub malformed_lines: usize,
    /// Distinct local hashes
    pub hash_groups: usize,
    /// Groups with at least one deletion
    pub duplicate_groups: usize,
    /// Files in the deletion plan
    pub duplicate_files: usize,
    /// Entries in the remote manifest
    pub remote_entries: usize,
    /// Remote entries that matched a local hash
    pub remote_matched: usize,
    /// Remote entries with no local hash
    pub remote_ignored: usize,
    /// Locally unique files demoted by the remote manifest
    pub demoted_unique: usize,
    /// Time spent planning in milliseconds
    pub plan_duration_ms: u64,
}

impl JsonSummary {
    /// Create a JSON summary from a [`PlanSummary`].
    #[must_use]
    pub fn from_plan_summary(summary: &PlanSummary) -> Self {
        let stats = summary.remote.as_ref().map(|(_, s)| *s).unwrap_or_default();
        Self {
            manifest_entries: summary.manifest_entries,
            malformed_lines: summary.malformed_lines,
            hash_groups: summary.hash_groups,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            remote_entries: stats.remote_entries,
            remote_matched: stats.matched,
            remote_ignored: stats.ignored,
            demoted_unique: stats.demoted_unique,
            plan_duration_ms: u64::try_from(summary.plan_duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput<'a> {
    /// Bag root directory
    pub bag_root: String,
    /// Payload manifest that was read
    pub manifest: String,
    /// Remote manifest, if one was merged
    pub remote_manifest: Option<String>,
    /// Groups that have at least one deletion, canonical member first
    pub groups: Vec<&'a HashGroup>,
    /// Planned deletions in order
    pub deletions: &'a [PlannedDeletion],
    /// Planning statistics
    pub summary: JsonSummary,
}

impl<'a> JsonOutput<'a> {
    /// Create a JSON output from a finder result.
    #[must_use]
    pub fn new(result: &'a FinderResult) -> Self {
        Self {
            bag_root: result.bag.root().to_string_lossy().into_owned(),
            manifest: result.summary.manifest.to_string_lossy().into_owned(),
            remote_manifest: result
                .summary
                .remote
                .as_ref()
                .map(|(path, _)| path.to_string_lossy().into_owned()),
            groups: result.groups.with_duplicates().collect(),
            deletions: &result.plan.deletions,
            summary: JsonSummary::from_plan_summary(&result.summary),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
