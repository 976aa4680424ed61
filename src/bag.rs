//! Bag layout: the root directory and its payload manifest.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::manifest::HashAlgorithm;

/// Error type for locating a bag.
#[derive(Debug, Error)]
pub enum BagError {
    /// The bag root does not exist.
    #[error("bag not found: {0}")]
    NotFound(PathBuf),

    /// The bag root is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// No payload manifest was found in the bag root.
    #[error("no {expected} found in bag {root}")]
    ManifestNotFound { root: PathBuf, expected: String },
}

/// A bag on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bag {
    root: PathBuf,
    manifest_path: PathBuf,
    algorithm: HashAlgorithm,
}

impl Bag {
    /// Open a bag rooted at `root`.
    ///
    /// With an explicit `algorithm` the manifest must be
    /// `manifest-<algorithm>.txt`. Otherwise the first existing manifest in
    /// [`HashAlgorithm::LOOKUP_ORDER`] is used, MD5 first.
    ///
    /// # Errors
    ///
    /// Returns [`BagError`] if the root is missing or not a directory, or if
    /// no matching manifest exists.
    pub fn open(root: &Path, algorithm: Option<HashAlgorithm>) -> Result<Self, BagError> {
        if !root.exists() {
            return Err(BagError::NotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(BagError::NotADirectory(root.to_path_buf()));
        }

        let candidates: Vec<HashAlgorithm> = match algorithm {
            Some(alg) => vec![alg],
            None => HashAlgorithm::LOOKUP_ORDER.to_vec(),
        };

        for alg in &candidates {
            let manifest_path = root.join(alg.manifest_file_name());
            if manifest_path.is_file() {
                log::debug!("Using manifest {}", manifest_path.display());
                return Ok(Self {
                    root: root.to_path_buf(),
                    manifest_path,
                    algorithm: *alg,
                });
            }
        }

        let expected = match algorithm {
            Some(alg) => alg.manifest_file_name(),
            None => "payload manifest".to_string(),
        };
        Err(BagError::ManifestNotFound {
            root: root.to_path_buf(),
            expected,
        })
    }

    /// Bag root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the payload manifest.
    #[must_use]
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Algorithm of the payload manifest.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Resolve a manifest-relative path against the bag root.
    #[must_use]
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}
