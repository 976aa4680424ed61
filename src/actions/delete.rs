//! Execution of deletion plans.
//!
//! # Overview
//!
//! Planned files are removed one at a time, in plan order:
//! - Permanent removal (default)
//! - Move to system trash (recoverable, via the `trash` crate)
//!
//! Execution stops at the first failure. Files already removed stay removed;
//! there is no rollback. A target that no longer exists is a failure, since
//! it means the manifest and the bag have diverged.
//!
//! # Example
//!
//! ```no_run
//! use bagdupe::actions::delete::{execute_plan, DeleteMethod, NoProgress};
//! use bagdupe::duplicates::{DedupeConfig, DuplicateFinder};
//!
//! let result = DuplicateFinder::new(DedupeConfig::new("bag")).find_duplicates().unwrap();
//! match execute_plan(&result.plan, DeleteMethod::Permanent, None::<&NoProgress>) {
//!     Ok(batch) => println!("{}", batch.summary()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duplicates::DeletionPlan;
use crate::manifest::is_bag_relative;

/// How files are removed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMethod {
    /// Remove the file for good
    #[default]
    Permanent,
    /// Move the file to the system trash
    Trash,
}

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (removed out-of-band or never present).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Planned path is absolute or climbs out of the bag root.
    #[error("refusing to delete outside the bag: {0}")]
    OutsideBag(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// Permanent delete operation failed.
    #[error("permanent delete failed for {path}: {source}")]
    PermanentDeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Path the error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::OutsideBag(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::PermanentDeleteFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was deleted
    pub path: PathBuf,
    /// Size of the deleted file in bytes
    pub size: u64,
    /// How it was deleted
    pub method: DeleteMethod,
}

/// Results of executing a whole plan.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Deleted files, in order
    pub successes: Vec<DeleteResult>,
    /// Total bytes freed
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of deleted files.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Deleted {} file(s), freed {}",
            self.success_count(),
            bytesize::ByteSize::b(self.bytes_freed)
        )
    }
}

/// Callback trait for deletion progress reporting.
pub trait DeleteProgressCallback {
    /// Called before each file deletion.
    fn on_before_delete(&self, path: &Path, index: usize, total: usize);

    /// Called after successful deletion.
    fn on_delete_success(&self, path: &Path, size: u64);

    /// Called after failed deletion. Execution stops after this.
    fn on_delete_failure(&self, path: &Path, error: &str);

    /// Called when every planned file was deleted.
    fn on_complete(&self, result: &BatchDeleteResult);
}

/// Callback that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl DeleteProgressCallback for NoProgress {
    fn on_before_delete(&self, _: &Path, _: usize, _: usize) {}
    fn on_delete_success(&self, _: &Path, _: u64) {}
    fn on_delete_failure(&self, _: &Path, _: &str) {}
    fn on_complete(&self, _: &BatchDeleteResult) {}
}

fn map_metadata_error(path: &Path, e: io::Error) -> DeleteError {
    match e.kind() {
        io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied(path.to_path_buf()),
        _ => DeleteError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

/// Delete a single file.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if its metadata can't be read
/// - `TrashFailed` / `PermanentDeleteFailed` if the removal itself fails
pub fn delete_file(path: &Path, method: DeleteMethod) -> Result<DeleteResult, DeleteError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| map_metadata_error(path, e))?;
    let size = metadata.len();

    match method {
        DeleteMethod::Permanent => {
            fs::remove_file(path).map_err(|e| {
                log::error!("Permanent delete failed for {}: {}", path.display(), e);
                match e.kind() {
                    io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
                    _ => DeleteError::PermanentDeleteFailed {
                        path: path.to_path_buf(),
                        source: e,
                    },
                }
            })?;
            log::info!("Deleted {} ({} bytes)", path.display(), size);
        }
        DeleteMethod::Trash => {
            trash::delete(path).map_err(|e| {
                log::error!("Trash operation failed for {}: {}", path.display(), e);
                DeleteError::TrashFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            })?;
            log::info!("Moved to trash: {} ({} bytes)", path.display(), size);
        }
    }

    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
        method,
    })
}

/// Delete every file in a plan, in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the first [`DeleteError`]. Deletions before it are not undone and
/// deletions after it are not attempted. A planned path that is absolute or
/// contains `..` fails with [`DeleteError::OutsideBag`] without touching the
/// filesystem.
pub fn execute_plan<C: DeleteProgressCallback>(
    plan: &DeletionPlan,
    method: DeleteMethod,
    callback: Option<&C>,
) -> Result<BatchDeleteResult, DeleteError> {
    let mut result = BatchDeleteResult::default();
    let total = plan.len();

    for (index, deletion) in plan.deletions.iter().enumerate() {
        let target = plan.target(deletion);
        if let Some(cb) = callback {
            cb.on_before_delete(&target, index, total);
        }

        let outcome = if is_bag_relative(&deletion.path) {
            delete_file(&target, method)
        } else {
            Err(DeleteError::OutsideBag(target.clone()))
        };

        match outcome {
            Ok(deleted) => {
                result.bytes_freed += deleted.size;
                if let Some(cb) = callback {
                    cb.on_delete_success(&target, deleted.size);
                }
                result.successes.push(deleted);
            }
            Err(e) => {
                if let Some(cb) = callback {
                    cb.on_delete_failure(&target, &e.to_string());
                }
                log::error!(
                    "Stopping after {} of {} deletion(s): {}",
                    result.success_count(),
                    total,
                    e
                );
                return Err(e);
            }
        }
    }

    if let Some(cb) = callback {
        cb.on_complete(&result);
    }
    log::info!("{}", result.summary());

    Ok(result)
}
