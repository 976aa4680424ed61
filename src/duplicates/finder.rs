//! Deduplication driver.
//!
//! # Overview
//!
//! [`DuplicateFinder`] composes the pieces of a run explicitly:
//! 1. **Open** the bag and locate its payload manifest
//! 2. **Group** local entries by hash ([`compute_local_groups`])
//! 3. **Merge** the remote manifest, when one is configured ([`merge_remote`])
//! 4. **Plan** the deletions ([`DeletionPlan::from_groups`])
//!
//! All inputs come from a [`DedupeConfig`]; nothing is read from global state.
//!
//! # Example
//!
//! ```no_run
//! use bagdupe::duplicates::{DedupeConfig, DuplicateFinder};
//!
//! let config = DedupeConfig::new("fixtures/dup-bag");
//! let result = DuplicateFinder::new(config).find_duplicates().unwrap();
//! for path in result.plan.paths() {
//!     println!("delete {}", path);
//! }
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::actions::DeleteMethod;
use crate::bag::{Bag, BagError};
use crate::manifest::{HashAlgorithm, MalformedLinePolicy, Manifest, ManifestError};

use super::groups::{compute_local_groups, merge_remote, HashGroups, MergeStats};
use super::plan::DeletionPlan;

/// Whether planned deletions are only reported or actually performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutionMode {
    /// Print the plan; touch nothing
    #[default]
    ReportOnly,
    /// Remove each planned file from the bag
    Delete,
}

/// Everything a deduplication run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeConfig {
    /// Bag root directory
    pub bag_root: PathBuf,
    /// Optional remote manifest whose copies take precedence
    pub remote_manifest: Option<PathBuf>,
    /// Report-only or delete
    pub mode: ExecutionMode,
    /// Force a specific payload manifest instead of the lookup order
    pub algorithm: Option<HashAlgorithm>,
    /// Handling of lines with fewer than two tokens
    pub malformed_lines: MalformedLinePolicy,
    /// How files are removed in delete mode
    pub delete_method: DeleteMethod,
}

impl DedupeConfig {
    /// Report-only configuration for a bag with no remote manifest.
    #[must_use]
    pub fn new(bag_root: impl Into<PathBuf>) -> Self {
        Self {
            bag_root: bag_root.into(),
            remote_manifest: None,
            mode: ExecutionMode::ReportOnly,
            algorithm: None,
            malformed_lines: MalformedLinePolicy::Skip,
            delete_method: DeleteMethod::Permanent,
        }
    }

    /// Set the remote manifest.
    #[must_use]
    pub fn with_remote_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.remote_manifest = Some(path.into());
        self
    }

    /// Set the execution mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Force a payload manifest algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the malformed line policy.
    #[must_use]
    pub fn with_malformed_lines(mut self, policy: MalformedLinePolicy) -> Self {
        self.malformed_lines = policy;
        self
    }

    /// Set the deletion method.
    #[must_use]
    pub fn with_delete_method(mut self, method: DeleteMethod) -> Self {
        self.delete_method = method;
        self
    }
}

/// Statistics from planning a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSummary {
    /// Payload manifest that was read
    pub manifest: PathBuf,
    /// Entries parsed from the payload manifest
    pub manifest_entries: usize,
    /// Malformed lines skipped across both manifests
    pub malformed_lines: usize,
    /// Distinct local hashes
    pub hash_groups: usize,
    /// Groups with at least one deletion
    pub duplicate_groups: usize,
    /// Files in the deletion plan
    pub duplicate_files: usize,
    /// Remote manifest path and merge statistics, when one was used
    pub remote: Option<(PathBuf, MergeStats)>,
    /// Time spent loading and planning
    pub plan_duration: Duration,
}

/// Output of [`DuplicateFinder::find_duplicates`].
#[derive(Debug, Clone)]
pub struct FinderResult {
    /// The opened bag
    pub bag: Bag,
    /// Hash groups after any remote merge
    pub groups: HashGroups,
    /// Files to delete, in order
    pub plan: DeletionPlan,
    /// Planning statistics
    pub summary: PlanSummary,
}

/// Errors that can occur while planning.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The bag or its payload manifest could not be located.
    #[error(transparent)]
    Bag(#[from] BagError),

    /// A manifest could not be read or parsed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Builds deletion plans for one bag.
#[derive(Debug, Clone)]
pub struct DuplicateFinder {
    config: DedupeConfig,
}

impl DuplicateFinder {
    /// Create a finder for the given configuration.
    #[must_use]
    pub fn new(config: DedupeConfig) -> Self {
        Self { config }
    }

    /// The configuration this finder was built with.
    #[must_use]
    pub fn config(&self) -> &DedupeConfig {
        &self.config
    }

    /// Load the manifests and compute the deletion plan.
    ///
    /// Both manifests are loaded before any grouping, so a missing remote
    /// manifest is reported without doing any work.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the bag root or either manifest is
    /// missing or unreadable, or if a manifest has a malformed line under
    /// [`MalformedLinePolicy::Fail`].
    pub fn find_duplicates(&self) -> Result<FinderResult, FinderError> {
        let start_time = Instant::now();

        let bag = Bag::open(&self.config.bag_root, self.config.algorithm)?;
        let local = Manifest::load(bag.manifest_path(), self.config.malformed_lines)?;
        let remote = match &self.config.remote_manifest {
            Some(path) => Some(Manifest::load(path, self.config.malformed_lines)?),
            None => None,
        };

        let mut groups = compute_local_groups(&local.entries);
        let mut malformed_lines = local.malformed.len();

        let remote_stats = remote.map(|remote| {
            malformed_lines += remote.malformed.len();
            let stats = merge_remote(&mut groups, &remote.entries);
            (remote.path, stats)
        });

        let plan = DeletionPlan::from_groups(bag.root(), &groups);

        let summary = PlanSummary {
            manifest: local.path,
            manifest_entries: local.entries.len(),
            malformed_lines,
            hash_groups: groups.len(),
            duplicate_groups: groups.with_duplicates().count(),
            duplicate_files: plan.len(),
            remote: remote_stats,
            plan_duration: start_time.elapsed(),
        };

        log::info!(
            "{} duplicate file(s) in {} group(s) across {} manifest entries",
            summary.duplicate_files,
            summary.duplicate_groups,
            summary.manifest_entries
        );

        Ok(FinderResult {
            bag,
            groups,
            plan,
            summary,
        })
    }
}
