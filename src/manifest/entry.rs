//! Manifest entries and line parsing.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use clap::ValueEnum;

/// One `hash path` pair from a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Hash token, compared byte-for-byte (no case folding)
    pub hash: String,
    /// Path relative to the bag root
    pub path: String,
    /// 1-based line number in the manifest file
    pub line: usize,
}

impl ManifestEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(hash: impl Into<String>, path: impl Into<String>, line: usize) -> Self {
        Self {
            hash: hash.into(),
            path: path.into(),
            line,
        }
    }
}

/// What to do with a malformed line: fewer than two tokens, or a path that
/// is not relative to the bag root.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Log a warning and continue with the next line
    #[default]
    Skip,
    /// Abort parsing with [`ManifestError::Malformed`]
    Fail,
}

/// A line that was skipped under [`MalformedLinePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedLine {
    /// 1-based line number
    pub line: usize,
    /// Trimmed line content
    pub content: String,
}

/// Error type for manifest loading and parsing.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest file does not exist.
    #[error("manifest not found: {0}")]
    NotFound(std::path::PathBuf),

    /// A line has fewer than two whitespace-separated tokens, or its path
    /// points outside the bag.
    #[error("malformed manifest line {line}: '{content}'")]
    Malformed { line: usize, content: String },

    /// The manifest could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of parsing manifest text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    /// Entries in line order
    pub entries: Vec<ManifestEntry>,
    /// Lines skipped as malformed
    pub malformed: Vec<MalformedLine>,
}

/// Whether `path` stays inside the directory it is joined to.
///
/// Absolute paths, drive or UNC prefixes and `..` components are rejected,
/// since `root.join(path)` would then name a file outside `root`.
///
/// ```
/// use bagdupe::manifest::is_bag_relative;
///
/// assert!(is_bag_relative("data/a.txt"));
/// assert!(!is_bag_relative("/etc/passwd"));
/// assert!(!is_bag_relative("data/../../x.txt"));
/// ```
#[must_use]
pub fn is_bag_relative(path: &str) -> bool {
    Path::new(path).components().all(|c| {
        matches!(c, Component::Normal(_) | Component::CurDir)
    })
}

/// Split one trimmed, non-empty line into hash and path.
///
/// The hash is the first token; the path is everything after the whitespace
/// that follows it, so paths containing spaces survive intact. Paths that
/// escape the bag root make the line malformed.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let (hash, rest) = line.split_once(char::is_whitespace)?;
    let path = rest.trim();
    if hash.is_empty() || path.is_empty() || !is_bag_relative(path) {
        None
    } else {
        Some((hash, path))
    }
}

/// Parse manifest text into entries.
///
/// Every line is trimmed first, so CRLF endings and a trailing newline are
/// tolerated. Blank lines are ignored without a warning. Skipped lines are
/// returned in [`ParsedManifest::malformed`]; [`Manifest::load`] logs them
/// with the file name.
///
/// [`Manifest::load`]: super::Manifest::load
///
/// # Errors
///
/// Returns [`ManifestError::Malformed`] for the first malformed line when
/// `policy` is [`MalformedLinePolicy::Fail`].
///
/// # Example
///
/// ```
/// use bagdupe::manifest::{parse_manifest, MalformedLinePolicy};
///
/// let text = "abc123 data/a.txt\nbroken\nabc123 data/b.txt\n";
/// let parsed = parse_manifest(text, MalformedLinePolicy::Skip).unwrap();
/// assert_eq!(parsed.entries.len(), 2);
/// assert_eq!(parsed.malformed[0].line, 2);
/// ```
pub fn parse_manifest(
    text: &str,
    policy: MalformedLinePolicy,
) -> Result<ParsedManifest, ManifestError> {
    let mut parsed = ParsedManifest::default();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        match split_line(trimmed) {
            Some((hash, path)) => parsed.entries.push(ManifestEntry::new(hash, path, line)),
            None => match policy {
                MalformedLinePolicy::Fail => {
                    return Err(ManifestError::Malformed {
                        line,
                        content: trimmed.to_string(),
                    });
                }
                MalformedLinePolicy::Skip => {
                    parsed.malformed.push(MalformedLine {
                        line,
                        content: trimmed.to_string(),
                    });
                }
            },
        }
    }

    Ok(parsed)
}
