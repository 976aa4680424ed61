//! BagIt-style content manifests.
//!
//! A manifest is a UTF-8 text file with one `<hash> <relative_path>` pair per
//! line. This module loads such files into memory and parses them into
//! [`ManifestEntry`] values. Hash values are taken as-is; nothing here reads
//! or hashes payload files.
//!
//! # Example
//!
//! ```no_run
//! use bagdupe::manifest::{Manifest, MalformedLinePolicy};
//! use std::path::Path;
//!
//! let manifest = Manifest::load(
//!     Path::new("bag/manifest-md5.txt"),
//!     MalformedLinePolicy::Skip,
//! )
//! .unwrap();
//! for entry in &manifest.entries {
//!     println!("{} {}", entry.hash, entry.path);
//! }
//! ```

pub mod algorithm;
pub mod entry;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use algorithm::HashAlgorithm;
pub use entry::{
    is_bag_relative, parse_manifest, MalformedLine, MalformedLinePolicy, ManifestEntry,
    ManifestError, ParsedManifest,
};

/// A manifest file loaded into memory.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Path the manifest was read from
    pub path: PathBuf,
    /// Algorithm named by the file, if recognizable
    pub algorithm: Option<HashAlgorithm>,
    /// Entries in line order
    pub entries: Vec<ManifestEntry>,
    /// Lines skipped as malformed
    pub malformed: Vec<MalformedLine>,
}

impl Manifest {
    /// Read and parse a manifest file.
    ///
    /// The whole file is read at once. When the file name names an algorithm,
    /// hash tokens of the wrong length are counted and reported in a single
    /// warning; they are still used as-is.
    ///
    /// # Errors
    ///
    /// - [`ManifestError::NotFound`] if the file does not exist
    /// - [`ManifestError::Io`] if it cannot be read or is not valid UTF-8
    /// - [`ManifestError::Malformed`] under [`MalformedLinePolicy::Fail`]
    pub fn load(path: &Path, policy: MalformedLinePolicy) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ManifestError::NotFound(path.to_path_buf()),
            _ => ManifestError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let parsed = parse_manifest(&text, policy)?;
        for skipped in &parsed.malformed {
            log::warn!("{}", skip_warning(path, skipped));
        }
        let algorithm = HashAlgorithm::detect(path);

        if let Some(algorithm) = algorithm {
            let odd = parsed
                .entries
                .iter()
                .filter(|e| e.hash.len() != algorithm.expected_hex_len())
                .count();
            if odd > 0 {
                log::warn!(
                    "{} of {} hashes in {} do not look like {} digests",
                    odd,
                    parsed.entries.len(),
                    path.display(),
                    algorithm
                );
            }
        }

        log::debug!(
            "Loaded {} entries from {} ({} malformed line(s) skipped)",
            parsed.entries.len(),
            path.display(),
            parsed.malformed.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            algorithm,
            entries: parsed.entries,
            malformed: parsed.malformed,
        })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Warning logged for a line skipped under [`MalformedLinePolicy::Skip`].
fn skip_warning(path: &Path, skipped: &MalformedLine) -> String {
    format!(
        "Skipping malformed line {} in {}: '{}'",
        skipped.line,
        path.display(),
        skipped.content
    )
}
