//! Command-line interface definitions for bagdupe.
//!
//! All arguments, subcommands and options are defined with the clap derive
//! API. Global options (verbosity, color, config file) apply to every
//! subcommand.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates in a bag (nothing is deleted)
//! bagdupe dedupe bags/photos
//!
//! # Prefer copies listed in a remote manifest, then delete local ones
//! bagdupe dedupe bags/photos --remote archive/manifest-md5.txt --execute
//!
//! # Inspect hash groups as JSON
//! bagdupe groups bags/photos --json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::actions::DeleteMethod;
use crate::manifest::HashAlgorithm;
use crate::output::{OutputFormat, ScriptType};

/// Manifest-driven duplicate finder for BagIt bags.
///
/// Groups the files of a bag by the hashes recorded in its manifest and
/// removes all but one copy of each. A remote manifest can mark copies that
/// already exist elsewhere, so every local copy of those is removed.
#[derive(Debug, Parser)]
#[command(name = "bagdupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Report fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Path to a TOML config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for bagdupe.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report or delete duplicate files in a bag
    Dedupe(DedupeArgs),
    /// Show hash groups that contain duplicates
    Groups(GroupsArgs),
    /// Print the effective configuration as TOML
    Config,
}

/// Options shared by every subcommand that reads a bag.
#[derive(Debug, Args)]
pub struct BagArgs {
    /// Bag root directory (contains manifest-<algorithm>.txt)
    #[arg(value_name = "BAG_ROOT")]
    pub bag_root: PathBuf,

    /// Remote manifest; local copies of its hashes are all deleted
    #[arg(short, long, value_name = "MANIFEST")]
    pub remote: Option<PathBuf>,

    /// Payload manifest algorithm (default: first of md5, sha256, sha512, sha1 found)
    #[arg(short, long, value_enum)]
    pub algorithm: Option<HashAlgorithm>,

    /// Abort on malformed manifest lines instead of skipping them
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the dedupe subcommand.
#[derive(Debug, Args)]
pub struct DedupeArgs {
    #[command(flatten)]
    pub bag: BagArgs,

    /// Delete duplicates instead of only reporting them
    #[arg(short = 'x', long)]
    pub execute: bool,

    /// Move duplicates to the system trash instead of deleting permanently
    #[arg(long, requires = "execute")]
    pub trash: bool,

    /// Report format when not executing
    #[arg(short, long, value_enum, conflicts_with = "execute")]
    pub output: Option<OutputFormat>,

    /// Script flavor for `--output script` (default: current platform)
    #[arg(long, value_enum)]
    pub script: Option<ScriptType>,
}

impl DedupeArgs {
    /// Deletion method requested on the command line, if any.
    #[must_use]
    pub fn delete_method(&self) -> Option<DeleteMethod> {
        self.trash.then_some(DeleteMethod::Trash)
    }
}

/// Arguments for the groups subcommand.
#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(flatten)]
    pub bag: BagArgs,

    /// Emit JSON instead of a text listing
    #[arg(long)]
    pub json: bool,
}
