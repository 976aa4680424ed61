//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Hash grouping of manifest entries (local deduplication)
//! - Remote manifest precedence (remote-aware resolution)
//! - Deletion plan construction

pub mod finder;
pub mod groups;
pub mod plan;

pub use finder::{
    DedupeConfig, DuplicateFinder, ExecutionMode, FinderError, FinderResult, PlanSummary,
};
pub use groups::{
    compute_local_groups, merge_remote, GroupMember, HashGroup, HashGroups, MergeStats, Origin,
};
pub use plan::{DeletionPlan, PlannedDeletion};
