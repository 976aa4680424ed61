//! Output formatters for deletion plans.
//!
//! This module provides different output formats for report-only runs:
//! - Plain `delete <path>` lines (the default)
//! - JSON for automation and scripting
//! - Shell scripts for manual review and execution
//!
//! # Example
//!
//! ```no_run
//! use bagdupe::duplicates::{DedupeConfig, DuplicateFinder};
//! use bagdupe::output::json::JsonOutput;
//!
//! let result = DuplicateFinder::new(DedupeConfig::new("bag")).find_duplicates().unwrap();
//! println!("{}", JsonOutput::new(&result).to_json_pretty().unwrap());
//! ```

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod json;
pub mod script;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
pub use script::{ScriptOutput, ScriptType};

/// Report format for report-only runs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `delete <path>` line per planned deletion
    #[default]
    Text,
    /// JSON document with groups, deletions and a summary
    Json,
    /// Shell script for the current platform
    Script,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Script => write!(f, "script"),
        }
    }
}
