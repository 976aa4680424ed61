//! Checksum algorithm detection from manifest file names.
//!
//! BagIt names payload manifests `manifest-<algorithm>.txt`. The engine never
//! computes hashes itself; the algorithm is only used to locate a bag's
//! manifest and to sanity-check the length of hash tokens.

use std::fmt;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Checksum algorithm named by a manifest file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (the conventional BagIt manifest)
    #[default]
    Md5,
    /// SHA-1
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Manifest lookup order used when no algorithm is configured.
    pub const LOOKUP_ORDER: [HashAlgorithm; 4] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha1,
    ];

    /// Lowercase name as it appears in manifest file names.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// File name of the payload manifest for this algorithm.
    ///
    /// ```
    /// use bagdupe::manifest::HashAlgorithm;
    ///
    /// assert_eq!(HashAlgorithm::Md5.manifest_file_name(), "manifest-md5.txt");
    /// ```
    #[must_use]
    pub fn manifest_file_name(self) -> String {
        format!("manifest-{}.txt", self.name())
    }

    /// Length of a hex-encoded digest for this algorithm.
    #[must_use]
    pub fn expected_hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Sha512 => 128,
        }
    }

    /// Detect the algorithm from a manifest path such as `manifest-sha256.txt`.
    ///
    /// Returns `None` when the file name mentions no known algorithm.
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        if filename.contains("md5") {
            Some(Self::Md5)
        } else if filename.contains("sha512") {
            Some(Self::Sha512)
        } else if filename.contains("sha256") {
            Some(Self::Sha256)
        } else if filename.contains("sha1") {
            Some(Self::Sha1)
        } else {
            None
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
